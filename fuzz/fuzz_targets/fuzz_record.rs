#![no_main]

use exfor::dataset::{extract_request, ExtractConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let lines: Vec<&str> = text.lines().collect();

    // Tokenizing and table decoding of arbitrary text
    if let Ok(entry) = exfor::record::Entry::from_lines(&lines) {
        let _ = entry.exfor_style();
    }
    let _ = exfor::record::Table::parse(&lines);

    // Every failure lands in the report
    let config = ExtractConfig::default()
        .with_simplify(true)
        .with_make_all_columns(true);
    let _ = extract_request(&lines, &config);
});
