/// Assemble a style template: `parts[0] + values[0] + parts[1] + values[1] + ...`.
///
/// Each part is followed by the value at the same index, if any. Values past
/// the last part are ignored.
pub fn interpolate<S: AsRef<str>>(parts: &[&str], values: &[S]) -> String {
    let capacity = parts.iter().map(|p| p.len()).sum::<usize>()
        + values.iter().map(|v| v.as_ref().len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    for (idx, part) in parts.iter().enumerate() {
        out.push_str(part);
        if let Some(value) = values.get(idx) {
            out.push_str(value.as_ref());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_parts_and_values() {
        let css = interpolate(&[".a { color: ", "; margin: ", "px; }"], &["red", "4"]);
        assert_eq!(css, ".a { color: red; margin: 4px; }");
    }

    #[test]
    fn missing_values_are_empty() {
        let css = interpolate::<&str>(&[".a { color: ", "; }"], &[]);
        assert_eq!(css, ".a { color: ; }");
    }

    #[test]
    fn owned_values() {
        let size = 16.to_string();
        let css = interpolate(&[".a { width: ", "px; }"], &[size]);
        assert_eq!(css, ".a { width: 16px; }");
    }
}
