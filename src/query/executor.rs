use crate::error::Result;
use crate::index::types::*;
use crate::query::parser::Query;
use crate::query::scorer::{Scorer, ScoringWeights, TermSource};
use globset::{Glob, GlobMatcher};
use rayon::prelude::*;
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Section title covering the query text
    Title,
    /// API object name
    Object,
    /// Full-text page match
    Text,
}

/// A ranked search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub page: PageId,
    pub docname: String,
    pub filename: String,
    /// Page title, section path or object full name
    pub title: String,
    /// Fragment within the page, without `#`
    pub anchor: Option<String>,
    pub description: Option<String>,
    pub score: i32,
    pub kind: MatchKind,
}

impl SearchResult {
    fn new(page: &Page, title: String, kind: MatchKind, score: i32) -> Self {
        Self {
            page: page.id,
            docname: page.docname.clone(),
            filename: page.filename.clone(),
            title,
            anchor: None,
            description: None,
            score,
            kind,
        }
    }
}

/// Query executor
pub struct QueryExecutor<'a> {
    index: &'a DocIndex,
    scorer: Scorer,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a DocIndex) -> Self {
        Self {
            index,
            scorer: Scorer::with_defaults(),
        }
    }

    /// Create executor with custom scoring weights
    pub fn with_scoring_weights(index: &'a DocIndex, weights: ScoringWeights) -> Self {
        Self {
            index,
            scorer: Scorer::new(weights),
        }
    }

    /// Execute a query and return ranked matches
    pub fn execute(&self, query: &Query) -> Result<Vec<SearchResult>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let page_filter = query
            .filters
            .page
            .as_deref()
            .map(|p| Glob::new(p).map(|g| g.compile_matcher()))
            .transpose()?;
        let objtype = query.filters.objtype.as_deref();

        let mut results = Vec::new();

        if objtype.is_none() {
            let titles = self.search_section_titles(&query.text);
            tracing::trace!(count = titles.len(), "section title matches");
            results.extend(titles);
        }

        for term in &query.object_terms {
            let objects = self.search_objects(term, &query.object_terms, objtype);
            tracing::trace!(term = %term, count = objects.len(), "object matches");
            results.extend(objects);
        }

        if objtype.is_none() {
            let pages = self.search_terms(&query.search_terms);
            tracing::trace!(count = pages.len(), "full-text matches");
            results.extend(pages);
        }

        let excluded = self.excluded_pages(&query.excluded_terms);
        results.retain(|r| !excluded.contains(r.page) && page_matches(&page_filter, &r.docname));

        sort_results(&mut results);
        dedupe_results(&mut results);
        results.truncate(query.options.limit_or_default());

        Ok(results)
    }

    /// Section titles that the query text covers at least half of
    fn search_section_titles(&self, text: &str) -> Vec<SearchResult> {
        if text.is_empty() {
            return Vec::new();
        }
        let query_len = text.chars().count();
        let mut results = Vec::new();

        for (title, targets) in &self.index.alltitles {
            let title_lower = title.to_lowercase();
            let title_len = title_lower.chars().count();
            if !title_lower.contains(text) || query_len * 2 < title_len {
                continue;
            }

            let score = self.scorer.section_title_score(query_len, title_len);
            for target in targets {
                let Some(page) = self.index.page(target.page) else {
                    continue;
                };
                let display = if page.title != *title {
                    format!("{} > {}", page.title, title)
                } else {
                    title.clone()
                };
                let mut result = SearchResult::new(&page, display, MatchKind::Title, score);
                result.anchor = target.anchor.clone();
                results.push(result);
            }
        }

        results
    }

    /// Objects whose full name contains `term`; other query terms must occur
    /// in the object's name, category or page title
    fn search_objects(
        &self,
        term: &str,
        all_terms: &[String],
        objtype: Option<&str>,
    ) -> Vec<SearchResult> {
        let others: Vec<&str> = all_terms
            .iter()
            .map(String::as_str)
            .filter(|t| *t != term)
            .collect();

        self.index
            .objects
            .par_iter()
            .filter_map(|obj| {
                let fullname = obj.fullname();
                let fullname_lower = fullname.to_lowercase();
                if !fullname_lower.contains(term) {
                    return None;
                }

                let objname = self.index.objtype(obj.objtype);
                if let Some(filter) = objtype {
                    if !objname.is_some_and(|n| n.matches_role(filter)) {
                        return None;
                    }
                }

                let page = self.index.page(obj.page)?;
                let label = objname.map(|n| n.label.as_str()).unwrap_or_default();

                if !others.is_empty() {
                    let haystack =
                        format!("{} {} {} {}", obj.prefix, obj.name, label, page.title)
                            .to_lowercase();
                    if others.iter().any(|t| !haystack.contains(t)) {
                        return None;
                    }
                }

                let score = self.scorer.object_score(&fullname_lower, term, obj.priority);
                let mut result = SearchResult::new(&page, fullname, MatchKind::Object, score);
                result.anchor = Some(obj.resolved_anchor(objname));
                result.description = Some(format!("{}, in {}", label, page.title));
                Some(result)
            })
            .collect()
    }

    /// Full-text search over page text and title terms
    fn search_terms(&self, words: &[String]) -> Vec<SearchResult> {
        if words.is_empty() {
            return Vec::new();
        }

        // page -> word -> score; later records for the same word overwrite
        let mut scores: BTreeMap<PageId, FxHashMap<&str, i32>> = BTreeMap::new();

        for word in words {
            for (pages, score) in self.term_records(word) {
                for page in pages.iter() {
                    scores.entry(page).or_default().insert(word.as_str(), score);
                }
            }
        }

        let long_words: Vec<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|w| w.chars().count() > 2)
            .collect();
        let required: Vec<&str> = if long_words.is_empty() {
            words.iter().map(String::as_str).collect()
        } else {
            long_words
        };

        let mut results = Vec::new();
        for (page_id, word_scores) in scores {
            if !required.iter().all(|w| word_scores.contains_key(w)) {
                continue;
            }
            let Some(page) = self.index.page(page_id) else {
                continue;
            };
            let score = word_scores.values().copied().max().unwrap_or_default();
            let title = page.title.clone();
            results.push(SearchResult::new(&page, title, MatchKind::Text, score));
        }

        results
    }

    /// Posting lists matching a word, in overwrite order: exact text, exact
    /// title, then substring matches for words longer than two characters
    fn term_records(&self, word: &str) -> Vec<(&'a RoaringBitmap, i32)> {
        let index = self.index;
        let mut records = Vec::new();

        let exact_text = index.terms.get(word);
        let exact_title = index.titleterms.get(word);

        if let Some(pages) = exact_text {
            records.push((pages, self.scorer.term_score(TermSource::Text, false)));
        }
        if let Some(pages) = exact_title {
            records.push((pages, self.scorer.term_score(TermSource::Title, false)));
        }

        if word.chars().count() > 2 {
            if exact_text.is_none() {
                let score = self.scorer.term_score(TermSource::Text, true);
                records.extend(partial_matches(&index.terms, word).into_iter().map(|p| (p, score)));
            }
            if exact_title.is_none() {
                let score = self.scorer.term_score(TermSource::Title, true);
                records.extend(
                    partial_matches(&index.titleterms, word)
                        .into_iter()
                        .map(|p| (p, score)),
                );
            }
        }

        records
    }

    /// Pages containing any excluded word
    fn excluded_pages(&self, words: &[String]) -> RoaringBitmap {
        let mut pages = RoaringBitmap::new();
        for word in words {
            pages |= self.index.lookup_pages(word);
        }
        pages
    }
}

/// Posting lists of every term containing `word`
fn partial_matches<'m>(terms: &'m TermMap, word: &str) -> Vec<&'m RoaringBitmap> {
    terms
        .par_iter()
        .filter(|(term, _)| term.contains(word))
        .map(|(_, pages)| pages)
        .collect()
}

fn page_matches(filter: &Option<GlobMatcher>, docname: &str) -> bool {
    filter.as_ref().is_none_or(|m| m.is_match(docname))
}

/// Highest score first, then case-insensitive title, then page
fn sort_results(results: &mut [SearchResult]) {
    results.sort_by_cached_key(|r| {
        (
            std::cmp::Reverse(r.score),
            r.title.to_lowercase(),
            r.page,
            r.anchor.clone(),
        )
    });
}

/// Keep the first (highest-scoring) of identical results
fn dedupe_results(results: &mut Vec<SearchResult>) {
    let mut seen = HashSet::new();
    results.retain(|r| {
        seen.insert((
            r.page,
            r.anchor.clone(),
            r.title.clone(),
            r.description.clone(),
        ))
    });
}
