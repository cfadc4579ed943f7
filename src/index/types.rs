use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Position of a page in `docnames` / `filenames` / `titles`
pub type PageId = u32;

/// Small integer code naming an object category
pub type ObjTypeId = u16;

/// Term -> set of pages containing it
pub type TermMap = FxHashMap<String, RoaringBitmap>;

/// Object priority codes used by the documentation builder
pub mod priority {
    pub const IMPORTANT: i8 = 0;
    pub const DEFAULT: i8 = 1;
    pub const UNIMPORTANT: i8 = 2;
    pub const HIDDEN: i8 = -1;
}

/// A documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: PageId,
    pub docname: String,
    pub filename: String,
    pub title: String,
}

/// Object category: `(domain, role, label)`, e.g. `("py", "method", "Python method")`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjName {
    pub domain: String,
    pub role: String,
    pub label: String,
}

impl ObjName {
    pub fn new(domain: &str, role: &str, label: &str) -> Self {
        Self {
            domain: domain.to_string(),
            role: role.to_string(),
            label: label.to_string(),
        }
    }

    /// `domain:role` form, as used in the `objtypes` table
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.domain, self.role)
    }

    pub fn matches_role(&self, filter: &str) -> bool {
        role_matches(&self.domain, &self.role, filter)
    }
}

/// Match a role filter given either as `role` or `domain:role`
pub fn role_matches(domain: &str, role: &str, filter: &str) -> bool {
    match filter.split_once(':') {
        Some((d, r)) => domain.eq_ignore_ascii_case(d) && role.eq_ignore_ascii_case(r),
        None => role.eq_ignore_ascii_case(filter),
    }
}

/// A documented API object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexObject {
    /// Enclosing module or class path; may be empty
    pub prefix: String,
    pub name: String,
    pub page: PageId,
    pub objtype: ObjTypeId,
    pub priority: i8,
    /// Raw anchor: `""` means the full name, `"-"` means `role-fullname`
    pub anchor: String,
}

impl IndexObject {
    pub fn fullname(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.prefix, self.name)
        }
    }

    /// Resolve the anchor within the page
    pub fn resolved_anchor(&self, objname: Option<&ObjName>) -> String {
        match self.anchor.as_str() {
            "" => self.fullname(),
            "-" => match objname {
                Some(n) => format!("{}-{}", n.role, self.fullname()),
                None => self.fullname(),
            },
            other => other.to_string(),
        }
    }
}

/// Target of a section title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleTarget {
    pub page: PageId,
    pub anchor: Option<String>,
}

/// One page returned by a raw term lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermHit {
    pub page: PageId,
    /// The term occurs in the page title
    pub in_title: bool,
}

/// In-memory search index. Immutable once built or loaded.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    pub docnames: Vec<String>,
    pub filenames: Vec<String>,
    /// Empty when the source carried no titles
    pub titles: Vec<String>,
    pub objects: Vec<IndexObject>,
    pub objnames: BTreeMap<ObjTypeId, ObjName>,
    pub objtypes: BTreeMap<ObjTypeId, String>,
    pub terms: TermMap,
    pub titleterms: TermMap,
    pub alltitles: BTreeMap<String, Vec<TitleTarget>>,
}

impl DocIndex {
    pub fn page_count(&self) -> usize {
        self.docnames.len()
    }

    /// Page title, falling back to the docname
    pub fn title(&self, id: PageId) -> Option<&str> {
        let idx = id as usize;
        self.titles
            .get(idx)
            .or_else(|| self.docnames.get(idx))
            .map(String::as_str)
    }

    pub fn page(&self, id: PageId) -> Option<Page> {
        let idx = id as usize;
        let docname = self.docnames.get(idx)?;
        Some(Page {
            id,
            docname: docname.clone(),
            filename: self.filenames.get(idx).cloned().unwrap_or_default(),
            title: self.title(id).unwrap_or(docname).to_string(),
        })
    }

    pub fn objtype(&self, id: ObjTypeId) -> Option<&ObjName> {
        self.objnames.get(&id)
    }

    /// Pages whose body or title contains `term` (empty if absent)
    pub fn lookup_pages(&self, term: &str) -> RoaringBitmap {
        let key = term.to_lowercase();
        let mut pages = RoaringBitmap::new();
        if let Some(p) = self.terms.get(&key) {
            pages |= p;
        }
        if let Some(p) = self.titleterms.get(&key) {
            pages |= p;
        }
        pages
    }

    /// Pages containing `term`, title matches first
    pub fn lookup(&self, term: &str) -> Vec<TermHit> {
        let key = term.to_lowercase();
        let in_title = self.titleterms.get(&key);

        let mut hits: Vec<TermHit> = self
            .lookup_pages(&key)
            .iter()
            .map(|page| TermHit {
                page,
                in_title: in_title.is_some_and(|t| t.contains(page)),
            })
            .collect();

        hits.sort_by_key(|h| (!h.in_title, h.page));
        hits
    }

    /// Structural check; see [`crate::index::validate`]
    pub fn validate(&self) -> crate::error::Result<()> {
        let violations = crate::index::validate::validate(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(crate::error::IndexError::Invalid(violations))
        }
    }
}
