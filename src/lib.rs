//! # docdex - documentation search index engine
//!
//! docdex reads the static full-text index a documentation build emits
//! (`searchindex.js`), checks its structure, and answers queries with the
//! ranking the documentation site's own search box uses.
//!
//! ## Architecture
//!
//! - [`index`] - Loading, validating and building indexes; object inventory
//! - [`query`] - Query parsing, scoring and execution
//! - [`session`] - Cached query session for repeated searches
//! - [`output`] - Result formatting (coloured text and JSON)
//! - [`utils`] - Stemmer, tokenizer, configuration and logging
//! - [`error`] - Library error type
//!
//! ## Quick Start
//!
//! ```no_run
//! use docdex::index::{find_search_index, reader};
//! use docdex::query::{QueryExecutor, parse_query};
//! use std::path::Path;
//!
//! let path = find_search_index(Path::new("docs/_build/html")).unwrap();
//! let index = reader::open(&path).unwrap();
//!
//! let query = parse_query("location_from_boresight");
//! let results = QueryExecutor::new(&index).execute(&query).unwrap();
//!
//! for result in results {
//!     println!("{} {}#{}", result.score, result.docname, result.anchor.unwrap_or_default());
//! }
//! ```
//!
//! Indexes are immutable once loaded; a [`index::DocIndex`] can be shared
//! between threads and queried concurrently.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod session;
pub mod utils;
