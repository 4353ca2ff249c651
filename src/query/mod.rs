pub mod compiler;
pub mod scorer;
pub mod session;

pub use compiler::compile_query;
pub use scorer::{compute_score, top_hits, ScoreSlate, SearchHit};
pub use session::{ResultView, SearchSession};
