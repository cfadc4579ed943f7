use crate::utils::{PorterStemmer, is_ignored_term, split_query};

/// Default maximum number of results
pub const DEFAULT_LIMIT: usize = 100;

/// Parsed query representation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Words searched in object names (lowercased, unstemmed)
    pub object_terms: Vec<String>,
    /// Stemmed words searched in page text and titles
    pub search_terms: Vec<String>,
    /// Stemmed words whose pages are removed from the results
    pub excluded_terms: Vec<String>,
    /// Free text left after removing filters and exclusions, lowercased
    pub text: String,
    pub filters: QueryFilters,
    pub options: QueryOptions,
}

impl Query {
    /// Nothing to search for
    pub fn is_empty(&self) -> bool {
        self.object_terms.is_empty() && self.search_terms.is_empty()
    }
}

/// Query filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    /// Docname glob pattern (page:api/*)
    pub page: Option<String>,
    /// Object role (type:method or type:py:method); keeps object results only
    pub objtype: Option<String>,
}

impl QueryFilters {
    /// Check if any filter is set
    pub fn has_any(&self) -> bool {
        self.page.is_some() || self.objtype.is_some()
    }
}

/// Query options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Maximum results from `top:`; `None` leaves the choice to the caller
    pub limit: Option<usize>,
}

impl QueryOptions {
    /// Effective limit, falling back to [`DEFAULT_LIMIT`]
    pub fn limit_or_default(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Parse a query string into a Query structure
pub fn parse_query(input: &str) -> Query {
    let mut parser = QueryParser::new();
    parser.parse(input)
}

/// Query parser
struct QueryParser {
    stemmer: PorterStemmer,
    query: Query,
    text: Vec<String>,
}

impl QueryParser {
    fn new() -> Self {
        Self {
            stemmer: PorterStemmer::new(),
            query: Query::default(),
            text: Vec::new(),
        }
    }

    fn parse(&mut self, input: &str) -> Query {
        for chunk in input.split_whitespace() {
            if let Some(rest) = chunk.strip_prefix('-') {
                self.parse_excluded(rest);
                continue;
            }

            if let Some((field, value)) = chunk.split_once(':') {
                if self.parse_field(field, value) {
                    continue;
                }
            }

            self.parse_words(chunk);
        }

        let mut query = std::mem::take(&mut self.query);
        query.text = self.text.join(" ").to_lowercase();
        query
    }

    /// Returns false for unknown fields, which are searched as words
    fn parse_field(&mut self, field: &str, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }

        match field.to_lowercase().as_str() {
            "page" | "doc" => {
                self.query.filters.page = Some(value.to_string());
                true
            }
            "type" | "kind" => {
                self.query.filters.objtype = Some(value.to_lowercase());
                true
            }
            "top" | "limit" => {
                if let Ok(n) = value.parse() {
                    self.query.options.limit = Some(n);
                }
                true
            }
            _ => false,
        }
    }

    fn parse_excluded(&mut self, chunk: &str) {
        for word in split_query(chunk) {
            let lower = word.to_lowercase();
            if is_ignored_term(&lower) {
                continue;
            }
            push_unique(&mut self.query.excluded_terms, self.stemmer.stem(&lower));
        }
    }

    fn parse_words(&mut self, chunk: &str) {
        self.text.push(chunk.to_string());

        for word in split_query(chunk) {
            let lower = word.to_lowercase();
            push_unique(&mut self.query.object_terms, lower.clone());

            if is_ignored_term(&lower) {
                continue;
            }
            push_unique(&mut self.query.search_terms, self.stemmer.stem(&lower));
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_words() {
        let q = parse_query("Rotating modules");
        assert_eq!(q.search_terms, vec!["rotat", "modul"]);
        assert_eq!(q.object_terms, vec!["rotating", "modules"]);
        assert_eq!(q.text, "rotating modules");
        assert!(q.excluded_terms.is_empty());
        assert!(!q.is_empty());
    }

    #[test]
    fn test_stopwords_and_numbers() {
        let q = parse_query("the location of 2 modules");
        assert_eq!(q.search_terms, vec!["locat", "modul"]);
        assert_eq!(q.object_terms, vec!["the", "location", "of", "2", "modules"]);
    }

    #[test]
    fn test_dotted_names_split() {
        let q = parse_query("Instrument.add_module");
        assert_eq!(q.object_terms, vec!["instrument", "add_module"]);
        assert_eq!(q.search_terms, vec!["instrument", "add_modul"]);
    }

    #[test]
    fn test_excluded_terms() {
        let q = parse_query("camera -rotation");
        assert_eq!(q.search_terms, vec!["camera"]);
        assert_eq!(q.excluded_terms, vec!["rotat"]);
        assert_eq!(q.object_terms, vec!["camera"]);
        assert_eq!(q.text, "camera");
    }

    #[test]
    fn test_filters() {
        let q = parse_query("location page:api/* type:py:method top:5");
        assert_eq!(q.filters.page.as_deref(), Some("api/*"));
        assert_eq!(q.filters.objtype.as_deref(), Some("py:method"));
        assert_eq!(q.options.limit, Some(5));
        assert!(q.filters.has_any());
        assert_eq!(q.search_terms, vec!["locat"]);
    }

    #[test]
    fn test_unknown_field_is_searched() {
        let q = parse_query("units:deg");
        assert_eq!(q.object_terms, vec!["units", "deg"]);
        assert!(!q.filters.has_any());
    }

    #[test]
    fn test_duplicates_removed() {
        let q = parse_query("module modules Module");
        assert_eq!(q.search_terms, vec!["modul"]);
        assert_eq!(q.object_terms, vec!["module", "modules"]);
    }

    #[test]
    fn test_empty_query() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   ").is_empty());
        assert!(parse_query("-camera").is_empty());
        assert_eq!(parse_query("").options.limit, None);
        assert_eq!(parse_query("").options.limit_or_default(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_field_variants() {
        assert_eq!(parse_query("LIMIT:10 camera").options.limit, Some(10));
        // Unparseable limits are dropped, not searched
        let q = parse_query("camera top:many");
        assert_eq!(q.options.limit, None);
        assert_eq!(q.object_terms, vec!["camera"]);
        assert_eq!(parse_query("camera page:api/*").options.limit, None);
    }
}
