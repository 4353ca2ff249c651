//! # docsift - Offline Fuzzy Search for API Documentation
//!
//! docsift compiles the names of a documentation corpus (modules, classes
//! and their members) into a compact bigram-fingerprint index at build
//! time, then answers as-you-type queries against it with a linear scan
//! and a bounded top-K slate.
//!
//! ## Architecture
//!
//! - [`index`] - Corpus reading, bigram ranking, weights, fingerprints and
//!   the index artifact (JSON or ES module)
//! - [`query`] - Query compilation, scoring and search sessions
//! - [`tui`] - Keyboard navigation state machine and terminal front end
//! - [`output`] - Non-interactive result formatting
//! - [`utils`] - Bigram derivation, summaries, config, logging
//!
//! ## Quick Start
//!
//! ```
//! use docsift::index::{build_search_index, DocObject, IndexConfig};
//! use docsift::query::SearchSession;
//!
//! let corpus = vec![
//!     DocObject::container("Foo::Bar", "/Foo/Bar"),
//!     DocObject::member("Foo::Bar", "baz", "/Foo/Bar#baz"),
//! ];
//! let index = build_search_index(&corpus, &IndexConfig::default());
//!
//! let mut session = SearchSession::with_default_capacity(&index);
//! let hits = session.search("baz");
//! assert_eq!(hits[0].entry.url, "/Foo/Bar#baz");
//! ```
//!
//! ## Scoring
//!
//! Every bigram gets a bit position by descending corpus frequency, so
//! common bigrams stay in the first bytes of each fingerprint. A query
//! scores `weight + tiebreaker` per matched bit, where member-shaped
//! bigrams (`#`, `.`, `(`) weigh 50 and short names earn a slightly larger
//! tiebreaker.

pub mod index;
pub mod output;
pub mod query;
pub mod tui;
pub mod utils;
