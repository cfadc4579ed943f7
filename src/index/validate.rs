//! Structural checks for a loaded index.
//!
//! A well-formed index has position-aligned page tables, page references that
//! stay inside those tables, and object type codes that resolve to names.

use crate::index::types::*;
use rayon::prelude::*;
use std::fmt;

/// A single broken invariant
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Violation {
    LengthMismatch { docnames: usize, filenames: usize },
    TitleCountMismatch { docnames: usize, titles: usize },
    ObjectPageOutOfRange { object: String, page: PageId },
    UnknownObjectType { object: String, objtype: ObjTypeId },
    ObjTypeWithoutName { objtype: ObjTypeId },
    TermPageOutOfRange { term: String, page: PageId, title: bool },
    TitlePageOutOfRange { title: String, page: PageId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::LengthMismatch { docnames, filenames } => write!(
                f,
                "{} docnames but {} filenames",
                docnames, filenames
            ),
            Violation::TitleCountMismatch { docnames, titles } => {
                write!(f, "{} docnames but {} titles", docnames, titles)
            }
            Violation::ObjectPageOutOfRange { object, page } => {
                write!(f, "object {} points at missing page {}", object, page)
            }
            Violation::UnknownObjectType { object, objtype } => {
                write!(f, "object {} has unknown type {}", object, objtype)
            }
            Violation::ObjTypeWithoutName { objtype } => {
                write!(f, "object type {} has no name entry", objtype)
            }
            Violation::TermPageOutOfRange { term, page, title } => write!(
                f,
                "{} {:?} points at missing page {}",
                if *title { "title term" } else { "term" },
                term,
                page
            ),
            Violation::TitlePageOutOfRange { title, page } => {
                write!(f, "section title {:?} points at missing page {}", title, page)
            }
        }
    }
}

/// Check every invariant and report all violations.
///
/// Order is stable: page tables, objects in index order, object types, then
/// terms, title terms and section titles sorted by key.
pub fn validate(index: &DocIndex) -> Vec<Violation> {
    let page_count = index.docnames.len();
    let mut violations = Vec::new();

    if index.filenames.len() != page_count {
        violations.push(Violation::LengthMismatch {
            docnames: page_count,
            filenames: index.filenames.len(),
        });
    }

    if !index.titles.is_empty() && index.titles.len() != page_count {
        violations.push(Violation::TitleCountMismatch {
            docnames: page_count,
            titles: index.titles.len(),
        });
    }

    for obj in &index.objects {
        if obj.page as usize >= page_count {
            violations.push(Violation::ObjectPageOutOfRange {
                object: obj.fullname(),
                page: obj.page,
            });
        }
        if !index.objnames.contains_key(&obj.objtype) {
            violations.push(Violation::UnknownObjectType {
                object: obj.fullname(),
                objtype: obj.objtype,
            });
        }
    }

    for &objtype in index.objtypes.keys() {
        if !index.objnames.contains_key(&objtype) {
            violations.push(Violation::ObjTypeWithoutName { objtype });
        }
    }

    violations.extend(check_terms(&index.terms, page_count, false));
    violations.extend(check_terms(&index.titleterms, page_count, true));

    for (title, targets) in &index.alltitles {
        for target in targets {
            if target.page as usize >= page_count {
                violations.push(Violation::TitlePageOutOfRange {
                    title: title.clone(),
                    page: target.page,
                });
            }
        }
    }

    violations
}

/// Report the largest out-of-range page of each term
fn check_terms(terms: &TermMap, page_count: usize, title: bool) -> Vec<Violation> {
    let mut found: Vec<Violation> = terms
        .par_iter()
        .filter_map(|(term, pages)| {
            pages
                .max()
                .filter(|&max| max as usize >= page_count)
                .map(|page| Violation::TermPageOutOfRange {
                    term: term.clone(),
                    page,
                    title,
                })
        })
        .collect();
    found.sort();
    found
}
