#![no_main]

use docdex::index::IndexBuilder;
use docdex::query::{QueryExecutor, parse_query};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing and executing arbitrary query text must not panic
    let query = parse_query(data);

    let mut b = IndexBuilder::new();
    let method = b.add_object_type("py", "method", "Python method");
    let page = b.add_page("camera", "camera.rst", "Camera");
    b.add_text(page, "Instrument modules rotate around the boresight.");
    b.add_object("scanning.camera.Instrument", "add_module", page, method, 1, "");
    let index = b.build();

    let _ = QueryExecutor::new(&index).execute(&query);
});
