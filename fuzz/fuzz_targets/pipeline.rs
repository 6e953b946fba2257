#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(page) = mini_engine::parse_document(input) {
        for id in page.flex_layouts.keys() {
            assert!(page.document.element(*id).is_some());
        }
    }
});
