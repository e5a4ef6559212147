#![no_main]

use libfuzzer_sys::fuzz_target;
use perfcmp::dataset::TabularDataset;

fuzz_target!(|data: &[u8]| {
    // Result tables are text; anything else is rejected before parsing
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(dataset) = TabularDataset::parse(input) {
            if let Some(header) = dataset.header() {
                assert_eq!(header.len(), dataset.column_count());
            }
        }
    }
});
