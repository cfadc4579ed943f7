//! Search session with a result cache for repeated queries.

use crate::error::Result;
use crate::index::DocIndex;
use crate::query::{QueryExecutor, ScoringWeights, SearchResult, parse_query};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// LRU cache size for search results
pub const SEARCH_CACHE_SIZE: usize = 64;

/// Runs queries against one index, remembering recent answers
pub struct SearchSession {
    index: Arc<DocIndex>,
    weights: ScoringWeights,
    /// Limit for queries without `top:`
    default_limit: Option<usize>,
    cache: LruCache<String, Vec<SearchResult>>,
}

impl SearchSession {
    pub fn new(index: Arc<DocIndex>) -> Self {
        Self::with_scoring_weights(index, ScoringWeights::default())
    }

    pub fn with_scoring_weights(index: Arc<DocIndex>, weights: ScoringWeights) -> Self {
        Self {
            index,
            weights,
            default_limit: None,
            cache: LruCache::new(NonZeroUsize::new(SEARCH_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Limit applied when a query does not set one itself
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self.cache.clear();
        self
    }

    /// Run a query, serving repeats from the cache
    pub fn search(&mut self, input: &str) -> Result<Vec<SearchResult>> {
        if let Some(cached) = self.cache.get(input) {
            tracing::trace!(query = %input, "cache hit");
            return Ok(cached.clone());
        }

        let mut query = parse_query(input);
        if query.options.limit.is_none() {
            query.options.limit = self.default_limit;
        }

        let executor = QueryExecutor::with_scoring_weights(&self.index, self.weights.clone());
        let results = executor.execute(&query)?;
        self.cache.put(input.to_string(), results.clone());
        Ok(results)
    }

    /// Number of cached queries
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
