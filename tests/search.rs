//! End-to-end library tests against a generated index of the `scanning`
//! package documentation.

use docdex::error::IndexError;
use docdex::index::stats::IndexStats;
use docdex::index::{DocIndex, Inventory, TermHit, Violation, reader, validate};
use docdex::query::{MatchKind, QueryExecutor, SearchResult, parse_query};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("searchindex.js")
}

fn load() -> DocIndex {
    reader::open(&fixture_path()).expect("fixture index should load")
}

fn search(index: &DocIndex, q: &str) -> Vec<SearchResult> {
    QueryExecutor::new(index)
        .execute(&parse_query(q))
        .expect("query should run")
}

#[test]
fn test_fixture_is_valid() {
    let index = load();
    assert_eq!(index.docnames, vec!["camera", "coordinates", "index"]);
    assert_eq!(index.filenames.len(), index.docnames.len());
    assert!(validate::validate(&index).is_empty());
    assert!(index.validate().is_ok());
}

#[test]
fn test_stats() {
    let stats = IndexStats::collect(&load());
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.objects, 29);
    assert_eq!(stats.terms, 33);
    assert_eq!(stats.title_terms, 10);
    assert_eq!(stats.section_titles, 6);
    assert_eq!(stats.objects_by_type["Python method"], 13);
    assert_eq!(stats.objects_by_type["Python property"], 6);
    assert_eq!(stats.objects_by_type["Python class"], 8);
    assert_eq!(stats.objects_by_type["Python module"], 2);
    assert_eq!(stats.violations, 0);
}

#[test]
fn test_lookup_present_and_absent() {
    let index = load();

    assert_eq!(
        index.lookup("scan"),
        vec![
            TermHit { page: 0, in_title: true },
            TermHit { page: 1, in_title: true },
            TermHit { page: 2, in_title: true },
        ]
    );
    assert_eq!(index.lookup("rotat"), vec![TermHit { page: 0, in_title: false }]);

    assert!(!index.lookup_pages("boresight").is_empty());
    assert!(index.lookup_pages("spectrograph").is_empty());
    assert!(index.lookup("spectrograph").is_empty());
}

#[test]
fn test_exact_object_match() {
    let index = load();
    let results = search(&index, "add_module");

    assert_eq!(results.len(), 1);
    let hit = &results[0];
    assert_eq!(hit.kind, MatchKind::Object);
    assert_eq!(hit.title, "scanning.camera.Instrument.add_module");
    assert_eq!(hit.docname, "camera");
    assert_eq!(hit.anchor.as_deref(), Some("scanning.camera.Instrument.add_module"));
    assert_eq!(hit.description.as_deref(), Some("Python method, in scanning.camera"));
    assert_eq!(hit.score, 16);
}

#[test]
fn test_objects_rank_above_text() {
    let index = load();
    let results = search(&index, "boresight");

    let summary: Vec<(MatchKind, &str, i32)> = results
        .iter()
        .map(|r| (r.kind, r.title.as_str(), r.score))
        .collect();
    assert_eq!(
        summary,
        vec![
            (MatchKind::Object, "scanning.camera.Instrument.location_from_boresight", 11),
            (MatchKind::Text, "scanning.camera", 5),
            (MatchKind::Text, "scanning.coordinates", 5),
        ]
    );
}

#[test]
fn test_exclusion_removes_pages() {
    let index = load();
    let results = search(&index, "camera -rotation");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].docname, "index");
    assert_eq!(results[0].kind, MatchKind::Text);
}

#[test]
fn test_section_title_ranks_first() {
    let index = load();
    let results = search(&index, "placing modules");

    let first = &results[0];
    assert_eq!(first.kind, MatchKind::Title);
    assert_eq!(first.title, "scanning.camera > Placing modules");
    assert_eq!(first.anchor.as_deref(), Some("placing-modules"));
    assert_eq!(first.score, 100);

    // Only the camera page has both words
    let text: Vec<&str> = results
        .iter()
        .filter(|r| r.kind == MatchKind::Text)
        .map(|r| r.docname.as_str())
        .collect();
    assert_eq!(text, vec!["camera"]);
}

#[test]
fn test_type_filter() {
    let index = load();
    let titles: Vec<String> = search(&index, "instrument type:property")
        .into_iter()
        .map(|r| {
            assert_eq!(r.kind, MatchKind::Object);
            r.title
        })
        .collect();
    assert_eq!(
        titles,
        vec![
            "scanning.camera.Instrument.instr_offset",
            "scanning.camera.Instrument.instr_rot",
            "scanning.camera.Instrument.modules",
            "scanning.camera.Instrument.slots",
        ]
    );
}

#[test]
fn test_page_filter() {
    let index = load();
    let results = search(&index, "save_data page:coordinates");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "scanning.coordinates.SkyPattern.save_data");
    assert_eq!(
        results[0].description.as_deref(),
        Some("Python method, in scanning.coordinates")
    );
}

#[test]
fn test_limit() {
    let index = load();
    assert!(search(&index, "scanning").len() > 3);
    assert_eq!(search(&index, "scanning top:3").len(), 3);
}

#[test]
fn test_inventory_resolution() {
    let index = load();
    let inventory = Inventory::new(&index);
    assert_eq!(inventory.len(), 29);

    let module = inventory.resolve("scanning.camera").unwrap();
    assert_eq!(module.url(".html"), "camera.html#module-scanning.camera");

    let method = inventory.resolve("scanning.camera.instrument.get_module").unwrap();
    assert_eq!(method.fullname, "scanning.camera.Instrument.get_module");
    assert_eq!(method.label, "Python method");

    // Three objects share the short name
    assert!(inventory.resolve("save_data").is_none());
}

#[test]
fn test_broken_index_reports_violations() {
    let source = r#"Search.setIndex({
        "docnames": ["camera", "coordinates"],
        "filenames": ["camera.rst"],
        "objects": {"scanning.camera": [[4, 1, 1, "", "Instrument"]]},
        "objnames": {"0": ["py", "module", "Python module"]},
        "objtypes": {"0": "py:module", "1": "py:class"},
        "terms": {"boresight": [0, 7]},
        "titleterms": {}
    });"#;
    let index = reader::from_str(source).unwrap();
    let violations = validate::validate(&index);

    assert!(violations.contains(&Violation::LengthMismatch { docnames: 2, filenames: 1 }));
    assert!(violations.contains(&Violation::ObjectPageOutOfRange {
        object: "scanning.camera.Instrument".into(),
        page: 4,
    }));
    assert!(violations.contains(&Violation::UnknownObjectType {
        object: "scanning.camera.Instrument".into(),
        objtype: 1,
    }));
    assert!(violations.contains(&Violation::ObjTypeWithoutName { objtype: 1 }));
    assert!(violations.contains(&Violation::TermPageOutOfRange {
        term: "boresight".into(),
        page: 7,
        title: false,
    }));

    match index.validate() {
        Err(IndexError::Invalid(v)) => assert_eq!(v, violations),
        other => panic!("expected validation failure, got {:?}", other),
    }
}
