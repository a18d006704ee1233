#![no_main]

use css::{parse_stylesheet, tokenize_stylesheet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(segments) = tokenize_stylesheet(input) else {
        return;
    };
    // Segments tile the input.
    let mut pos = 0;
    for segment in &segments {
        assert_eq!(segment.span.start, pos);
        assert!(segment.span.end > segment.span.start);
        let _ = segment.text(input);
        pos = segment.span.end;
    }
    assert_eq!(pos, input.len());
    assert!(parse_stylesheet(input).is_ok());
});
