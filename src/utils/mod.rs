//! Utility functions shared by the index and query layers.
//!
//! ## Modules
//!
//! - [`app_data`] - User configuration (`config.json`, `DOCDEX_CONFIG`)
//! - [`logging`] - Log subscriber setup
//! - [`stemmer`] - Porter stemmer used for index and query terms
//! - [`tokenizer`] - Word splitting and stopwords
//!
//! ## Key Functions
//!
//! ```
//! use docdex::utils::{PorterStemmer, extract_terms};
//!
//! let terms = extract_terms("Rotating the detector modules", &PorterStemmer::new());
//! assert_eq!(terms, vec!["rotat", "detector", "modul"]);
//! ```

pub mod app_data;
pub mod logging;
pub mod stemmer;
pub mod tokenizer;

pub use app_data::*;
pub use logging::*;
pub use stemmer::*;
pub use tokenizer::*;
