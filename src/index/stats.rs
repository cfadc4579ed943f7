use crate::index::types::DocIndex;
use crate::index::{find_search_index, reader, validate};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Summary counts for an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub pages: usize,
    pub objects: usize,
    /// Object count per category label
    pub objects_by_type: BTreeMap<String, usize>,
    pub terms: usize,
    pub title_terms: usize,
    pub section_titles: usize,
    pub violations: usize,
}

impl IndexStats {
    pub fn collect(index: &DocIndex) -> Self {
        let mut objects_by_type = BTreeMap::new();
        for obj in &index.objects {
            let label = index
                .objtype(obj.objtype)
                .map(|n| n.label.clone())
                .unwrap_or_else(|| format!("type {}", obj.objtype));
            *objects_by_type.entry(label).or_insert(0) += 1;
        }

        Self {
            pages: index.page_count(),
            objects: index.objects.len(),
            objects_by_type,
            terms: index.terms.len(),
            title_terms: index.titleterms.len(),
            section_titles: index.alltitles.len(),
            violations: validate::validate(index).len(),
        }
    }
}

/// Display index statistics
pub fn show_stats(path: &Path) -> Result<()> {
    let index_path = find_search_index(path)?;
    let index = reader::open(&index_path)?;
    let stats = IndexStats::collect(&index);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index location:   {}", index_path.display());
    if let Ok(meta) = std::fs::metadata(&index_path) {
        println!("Index size:       {}", format_size(meta.len()));
    }
    println!("Pages:            {}", stats.pages);
    println!("Objects:          {}", stats.objects);
    println!("Terms:            {}", stats.terms);
    println!("Title terms:      {}", stats.title_terms);
    println!("Section titles:   {}", stats.section_titles);
    println!("Violations:       {}", stats.violations);

    if !stats.objects_by_type.is_empty() {
        println!();
        println!("Objects by type:");
        let mut sorted: Vec<_> = stats.objects_by_type.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (label, count) in sorted.iter().take(15) {
            println!("  {:24} {}", label, count);
        }

        if sorted.len() > 15 {
            println!("  ... and {} more", sorted.len() - 15);
        }
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::index::types::priority;

    #[test]
    fn test_collect() {
        let mut builder = IndexBuilder::new();
        let class = builder.add_object_type("py", "class", "Python class");
        let method = builder.add_object_type("py", "method", "Python method");
        let page = builder.add_page("camera", "camera.rst", "Camera");
        builder.add_text(page, "Modules are placed on the focal plane.");
        builder
            .add_object("scanning.camera", "Instrument", page, class, priority::DEFAULT, "")
            .add_object("scanning.camera.Instrument", "add_module", page, method, priority::DEFAULT, "")
            .add_object("scanning.camera.Instrument", "get_module", page, method, priority::DEFAULT, "");
        let stats = IndexStats::collect(&builder.build());

        assert_eq!(stats.pages, 1);
        assert_eq!(stats.objects, 3);
        assert_eq!(stats.objects_by_type["Python method"], 2);
        assert_eq!(stats.title_terms, 1);
        assert_eq!(stats.violations, 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
