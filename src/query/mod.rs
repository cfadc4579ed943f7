pub mod executor;
pub mod parser;
pub mod scorer;

pub use executor::{MatchKind, QueryExecutor, SearchResult};
pub use parser::{Query, QueryFilters, QueryOptions, parse_query};
pub use scorer::{Scorer, ScoringWeights, TermSource};
