//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`bigram`] - Bigram derivation for entry names and live queries
//! - [`summary`] - Leading-paragraph summaries of HTML descriptions
//! - [`deep_link`] - `?q=` query extraction from deep links
//! - [`app_data`] - Configuration file handling
//! - [`logging`] - Tracing subscriber setup
//! - [`progress`] - Build spinners
//!
//! ## Key Functions
//!
//! ```
//! use docsift::utils::{derive_bigrams, query_bigrams};
//!
//! // Every distinct 2-character window of the name's variants
//! let bigrams = derive_bigrams("ActiveSupport::Cache", None);
//! assert!(bigrams.contains(&"AS".to_string())); // initialism ":AS"
//!
//! // Query windows in typed order, the first one space-prefixed
//! assert_eq!(query_bigrams("ca"), vec![" c", "ca"]);
//! ```

pub mod app_data;
pub mod bigram;
pub mod deep_link;
pub mod logging;
pub mod progress;
pub mod summary;

pub use app_data::*;
pub use bigram::*;
pub use deep_link::*;
pub use progress::*;
pub use summary::*;
