//! Serde mirror of the on-disk index layout.
//!
//! These types only exist to be deserialized and converted into a
//! [`DocIndex`]; nothing is ever serialized back.

use crate::error::{IndexError, Result};
use crate::index::types::*;
use roaring::RoaringBitmap;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A posting list is a single page or a list of pages
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawPostings {
    One(PageId),
    Many(Vec<PageId>),
}

impl RawPostings {
    fn into_bitmap(self) -> RoaringBitmap {
        match self {
            RawPostings::One(page) => {
                let mut bitmap = RoaringBitmap::new();
                bitmap.insert(page);
                bitmap
            }
            RawPostings::Many(pages) => pages.into_iter().collect(),
        }
    }
}

/// Objects grouped under one prefix
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawObjects {
    /// `[[page, objtype, priority, anchor, name], ...]`
    Rows(Vec<(PageId, ObjTypeId, i8, String, String)>),
    /// `{name: [page, objtype, priority, anchor]}` (older builders)
    Named(BTreeMap<String, (PageId, ObjTypeId, i8, String)>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawIndex {
    docnames: Vec<String>,
    #[serde(default)]
    filenames: Vec<String>,
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    objects: BTreeMap<String, RawObjects>,
    #[serde(default)]
    objnames: BTreeMap<String, (String, String, String)>,
    #[serde(default)]
    objtypes: BTreeMap<String, String>,
    #[serde(default)]
    terms: HashMap<String, RawPostings>,
    #[serde(default)]
    titleterms: HashMap<String, RawPostings>,
    #[serde(default)]
    alltitles: BTreeMap<String, Vec<(PageId, Option<String>)>>,
}

fn parse_objtype_key(key: String) -> Result<ObjTypeId> {
    key.parse().map_err(|_| IndexError::ObjTypeKey(key))
}

fn into_term_map(raw: HashMap<String, RawPostings>) -> TermMap {
    raw.into_iter()
        .map(|(term, postings)| (term, postings.into_bitmap()))
        .collect()
}

impl RawIndex {
    pub(crate) fn into_index(self) -> Result<DocIndex> {
        let mut objects = Vec::new();
        for (prefix, group) in self.objects {
            match group {
                RawObjects::Rows(rows) => {
                    for (page, objtype, priority, anchor, name) in rows {
                        objects.push(IndexObject {
                            prefix: prefix.clone(),
                            name,
                            page,
                            objtype,
                            priority,
                            anchor,
                        });
                    }
                }
                RawObjects::Named(named) => {
                    for (name, (page, objtype, priority, anchor)) in named {
                        objects.push(IndexObject {
                            prefix: prefix.clone(),
                            name,
                            page,
                            objtype,
                            priority,
                            anchor,
                        });
                    }
                }
            }
        }

        let mut objnames = BTreeMap::new();
        for (key, (domain, role, label)) in self.objnames {
            objnames.insert(
                parse_objtype_key(key)?,
                ObjName {
                    domain,
                    role,
                    label,
                },
            );
        }

        let mut objtypes = BTreeMap::new();
        for (key, qualified) in self.objtypes {
            objtypes.insert(parse_objtype_key(key)?, qualified);
        }

        let alltitles = self
            .alltitles
            .into_iter()
            .map(|(title, targets)| {
                let targets = targets
                    .into_iter()
                    .map(|(page, anchor)| TitleTarget { page, anchor })
                    .collect();
                (title, targets)
            })
            .collect();

        Ok(DocIndex {
            docnames: self.docnames,
            filenames: self.filenames,
            titles: self.titles,
            objects,
            objnames,
            objtypes,
            terms: into_term_map(self.terms),
            titleterms: into_term_map(self.titleterms),
            alltitles,
        })
    }
}
