#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loading arbitrary bytes must fail cleanly; loaded indexes must validate
    // without panicking
    if let Ok(index) = docdex::index::reader::from_bytes(data) {
        let _ = docdex::index::validate::validate(&index);
        let _ = index.lookup("instrument");
        let _ = docdex::index::Inventory::new(&index).resolve("scanning.camera");
    }
});
