pub mod build;
pub mod compile;
pub mod fingerprint;
pub mod reader;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::build_search_index;
pub use reader::{read_index, IndexError};
pub use types::*;
pub use writer::{write_index, IndexFormat};
