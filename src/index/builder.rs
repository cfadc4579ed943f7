use crate::index::types::*;
use crate::utils::{PorterStemmer, extract_terms};
use roaring::RoaringBitmap;
use std::collections::BTreeMap;

/// In-memory index builder.
///
/// Accumulates pages, objects and postings, then freezes them into a
/// [`DocIndex`]. Text and titles go through the same tokenizer and stemmer the
/// query side uses, so built indexes answer queries like generated ones.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    docnames: Vec<String>,
    filenames: Vec<String>,
    titles: Vec<String>,
    objects: Vec<IndexObject>,
    objnames: BTreeMap<ObjTypeId, ObjName>,
    objtypes: BTreeMap<ObjTypeId, String>,
    terms: BTreeMap<String, RoaringBitmap>,
    titleterms: BTreeMap<String, RoaringBitmap>,
    alltitles: BTreeMap<String, Vec<TitleTarget>>,
    stemmer: PorterStemmer,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page; its title words are indexed as title terms
    pub fn add_page(&mut self, docname: &str, filename: &str, title: &str) -> PageId {
        let page = self.docnames.len() as PageId;
        self.docnames.push(docname.to_string());
        self.filenames.push(filename.to_string());
        self.titles.push(title.to_string());

        for term in extract_terms(title, &self.stemmer) {
            self.titleterms.entry(term).or_default().insert(page);
        }
        self.add_section_title(page, title, None);

        page
    }

    /// Index body text of a page
    pub fn add_text(&mut self, page: PageId, text: &str) -> &mut Self {
        for term in extract_terms(text, &self.stemmer) {
            self.terms.entry(term).or_default().insert(page);
        }
        self
    }

    /// Insert a raw (already normalized) body term
    pub fn add_term(&mut self, page: PageId, term: &str) -> &mut Self {
        self.terms.entry(term.to_string()).or_default().insert(page);
        self
    }

    /// Insert a raw (already normalized) title term
    pub fn add_title_term(&mut self, page: PageId, term: &str) -> &mut Self {
        self.titleterms
            .entry(term.to_string())
            .or_default()
            .insert(page);
        self
    }

    /// Register a section title within a page
    pub fn add_section_title(&mut self, page: PageId, title: &str, anchor: Option<&str>) -> &mut Self {
        let target = TitleTarget {
            page,
            anchor: anchor.map(str::to_string),
        };
        let targets = self.alltitles.entry(title.to_string()).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
        self
    }

    /// Register an object category, reusing the code of an identical one
    pub fn add_object_type(&mut self, domain: &str, role: &str, label: &str) -> ObjTypeId {
        let name = ObjName::new(domain, role, label);
        if let Some((&id, _)) = self.objnames.iter().find(|(_, n)| **n == name) {
            return id;
        }

        let id = self.objnames.len() as ObjTypeId;
        self.objtypes.insert(id, name.qualified());
        self.objnames.insert(id, name);
        id
    }

    pub fn add_object(
        &mut self,
        prefix: &str,
        name: &str,
        page: PageId,
        objtype: ObjTypeId,
        priority: i8,
        anchor: &str,
    ) -> &mut Self {
        self.objects.push(IndexObject {
            prefix: prefix.to_string(),
            name: name.to_string(),
            page,
            objtype,
            priority,
            anchor: anchor.to_string(),
        });
        self
    }

    pub fn build(self) -> DocIndex {
        DocIndex {
            docnames: self.docnames,
            filenames: self.filenames,
            titles: self.titles,
            objects: self.objects,
            objnames: self.objnames,
            objtypes: self.objtypes,
            terms: self.terms.into_iter().collect(),
            titleterms: self.titleterms.into_iter().collect(),
            alltitles: self.alltitles,
        }
    }
}
