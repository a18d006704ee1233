pub mod fixtures;

pub use fixtures::{
    ExpectedError, FIXTURE_FORMAT_V1, FixtureCase, FixtureFile, FixtureMode, load_fixture_dir,
    substitute_placeholders,
};

use std::fmt::Write;

/// `text` on one line, with quotes, newlines and control characters escaped.
pub fn escape_text(text: &str) -> String {
    text.escape_debug().to_string()
}

/// Byte offset of the first difference between `expected` and `actual`,
/// rounded down to a character boundary of both.
pub fn first_difference(expected: &str, actual: &str) -> Option<usize> {
    if expected == actual {
        return None;
    }
    let common = expected
        .bytes()
        .zip(actual.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    let mut offset = common;
    while !(expected.is_char_boundary(offset) && actual.is_char_boundary(offset)) {
        offset -= 1;
    }
    Some(offset)
}

/// Failure report for two style texts: where they first differ (byte offset,
/// line and column) and the surrounding lines of both.
pub fn diff_css(expected: &str, actual: &str) -> String {
    let Some(offset) = first_difference(expected, actual) else {
        return String::from("texts are equal\n");
    };
    let line = expected[..offset].matches('\n').count();
    let column = offset - expected[..offset].rfind('\n').map_or(0, |nl| nl + 1);

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        "first difference at byte {offset} (line {}, column {}):",
        line + 1,
        column + 1
    );
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let start = line.saturating_sub(1);
    let end = (line + 2).min(expected_lines.len().max(actual_lines.len()));
    for idx in start..end {
        let marker = if idx == line { ">" } else { " " };
        let left = expected_lines.get(idx).map_or("<missing>".into(), |l| escape_text(l));
        let right = actual_lines.get(idx).map_or("<missing>".into(), |l| escape_text(l));
        let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", idx + 1);
        let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", idx + 1);
    }
    let _ = writeln!(
        &mut out,
        "expected {} bytes, actual {} bytes",
        expected.len(),
        actual.len()
    );
    out
}
