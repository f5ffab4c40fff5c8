#![no_main]

use libfuzzer_sys::fuzz_target;
use population_box_analyzer::io::{read_csv_from_bytes, TextEncoding};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary input, in either encoding
    let _ = read_csv_from_bytes(data, "fuzz", TextEncoding::Utf8, 2012);
    let _ = read_csv_from_bytes(data, "fuzz", TextEncoding::EucKr, 2012);
});
