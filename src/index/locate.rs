use crate::error::{IndexError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// File name emitted by the HTML builder
pub const INDEX_FILE_NAME: &str = "searchindex.js";

/// Deepest directory level searched below the starting path
const MAX_SEARCH_DEPTH: usize = 8;

/// Resolve a user-supplied path to a search index file.
///
/// A file path is returned as is. For a directory, `searchindex.js` directly
/// inside it wins; otherwise the shallowest one in the tree is used. Build
/// output is usually git-ignored, so ignore rules are disabled for the walk.
pub fn find_search_index(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.is_dir() {
        return Err(IndexError::NotFound(path.to_path_buf()));
    }

    let direct = path.join(INDEX_FILE_NAME);
    if direct.is_file() {
        return Ok(direct);
    }

    let mut best: Option<(usize, PathBuf)> = None;
    let walker = WalkBuilder::new(path)
        .standard_filters(false)
        .max_depth(Some(MAX_SEARCH_DEPTH))
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    for entry in walker.flatten() {
        let is_index = entry.file_type().is_some_and(|t| t.is_file())
            && entry.file_name() == INDEX_FILE_NAME;
        if !is_index {
            continue;
        }
        let depth = entry.depth();
        if best.as_ref().is_none_or(|(d, _)| depth < *d) {
            best = Some((depth, entry.into_path()));
        }
    }

    match best {
        Some((_, found)) => {
            tracing::debug!(path = %found.display(), "found search index");
            Ok(found)
        }
        None => Err(IndexError::NotFound(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_path_is_returned() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.js");
        fs::write(&file, "{}").unwrap();
        assert_eq!(find_search_index(&file).unwrap(), file);
    }

    #[test]
    fn test_direct_child_preferred() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(INDEX_FILE_NAME), "{}").unwrap();
        assert_eq!(
            find_search_index(dir.path()).unwrap(),
            dir.path().join(INDEX_FILE_NAME)
        );
    }

    #[test]
    fn test_shallowest_nested_index_wins() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("docs/_build/html/sub");
        let shallow = dir.path().join("docs/_build/html");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join(INDEX_FILE_NAME), "{}").unwrap();
        fs::write(shallow.join(INDEX_FILE_NAME), "{}").unwrap();
        // Build output is commonly ignored; the walk must still see it
        fs::write(dir.path().join(".gitignore"), "_build/\n").unwrap();

        assert_eq!(
            find_search_index(dir.path()).unwrap(),
            shallow.join(INDEX_FILE_NAME)
        );
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            find_search_index(dir.path()),
            Err(IndexError::NotFound(_))
        ));
        assert!(matches!(
            find_search_index(&dir.path().join("missing")),
            Err(IndexError::NotFound(_))
        ));
    }
}
