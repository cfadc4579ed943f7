//! Object inventory: API symbol name -> documentation location.

use crate::index::types::*;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where an object is documented
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLocation {
    pub fullname: String,
    pub page: PageId,
    pub docname: String,
    pub filename: String,
    pub anchor: String,
    /// Category label, e.g. "Python method"
    pub label: String,
    pub domain: String,
    pub role: String,
    pub priority: i8,
}

impl ObjectLocation {
    pub fn matches_role(&self, filter: &str) -> bool {
        role_matches(&self.domain, &self.role, filter)
    }

    /// Link target relative to the site root
    pub fn url(&self, suffix: &str) -> String {
        format!("{}{}#{}", self.docname, suffix, self.anchor)
    }
}

/// Name-sorted view over the objects of an index
pub struct Inventory {
    entries: BTreeMap<String, ObjectLocation>,
}

impl Inventory {
    pub fn new(index: &DocIndex) -> Self {
        let mut entries = BTreeMap::new();

        for obj in &index.objects {
            let objname = index.objtype(obj.objtype);
            let fullname = obj.fullname();
            let page = obj.page as usize;
            let location = ObjectLocation {
                fullname: fullname.clone(),
                page: obj.page,
                docname: index.docnames.get(page).cloned().unwrap_or_default(),
                filename: index.filenames.get(page).cloned().unwrap_or_default(),
                anchor: obj.resolved_anchor(objname),
                label: objname.map(|n| n.label.clone()).unwrap_or_default(),
                domain: objname.map(|n| n.domain.clone()).unwrap_or_default(),
                role: objname.map(|n| n.role.clone()).unwrap_or_default(),
                priority: obj.priority,
            };
            entries.entry(fullname).or_insert(location);
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact name, else the single case-insensitive match
    pub fn resolve(&self, name: &str) -> Option<&ObjectLocation> {
        if let Some(location) = self.entries.get(name) {
            return Some(location);
        }

        let mut candidates = self
            .entries
            .values()
            .filter(|l| l.fullname.eq_ignore_ascii_case(name));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Objects whose full name matches `pattern`, optionally of one role
    /// (`method` or `py:method`)
    pub fn matching<'a>(
        &'a self,
        pattern: &'a Regex,
        role: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ObjectLocation> + 'a {
        self.entries.values().filter(move |l| {
            pattern.is_match(&l.fullname) && role.is_none_or(|r| l.matches_role(r))
        })
    }
}
