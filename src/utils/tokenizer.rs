use crate::utils::stemmer::PorterStemmer;

/// English stopwords skipped by the site search (and by the indexer)
pub const STOPWORDS: &[&str] = &[
    "a", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "near", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
    "these", "they", "this", "to", "was", "will", "with",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Split text into words on anything that is not alphanumeric or `_`
pub fn split_query(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether a lowercased word should be dropped from full-text terms
pub fn is_ignored_term(word: &str) -> bool {
    is_stopword(word) || word.chars().all(|c| c.is_ascii_digit())
}

/// Extract index terms: split, lowercase, drop stopwords and numbers, stem.
/// Order follows first occurrence; duplicates are removed.
pub fn extract_terms(text: &str, stemmer: &PorterStemmer) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for word in split_query(text) {
        let lower = word.to_lowercase();
        if is_ignored_term(&lower) {
            continue;
        }
        let stemmed = stemmer.stem(&lower);
        if !terms.contains(&stemmed) {
            terms.push(stemmed);
        }
    }

    terms
}
