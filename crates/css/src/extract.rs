use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CssError;
use crate::syntax::{Segment, SegmentKind, tokenize_stylesheet};

static CLASS_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z0-9_-]+)").expect("class token regex"));

/// A `.name` occurrence in selector text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassToken {
    /// Span of the name, without the leading `.`.
    pub name: Range<usize>,
}

impl ClassToken {
    pub fn name<'a>(&self, input: &'a str) -> &'a str {
        &input[self.name.clone()]
    }
}

/// Class tokens of every selector prelude, in source order.
///
/// Matches are greedy over identifier characters, so `.foo-bar` is one token
/// and never yields `foo`.
pub fn class_tokens(input: &str, segments: &[Segment]) -> Vec<ClassToken> {
    let mut tokens = Vec::new();
    for segment in segments.iter().filter(|s| s.kind == SegmentKind::Prelude) {
        let base = segment.span.start;
        for caps in CLASS_TOKEN_REGEX.captures_iter(segment.text(input)) {
            if let Some(name) = caps.get(1) {
                tokens.push(ClassToken {
                    name: base + name.start()..base + name.end(),
                });
            }
        }
    }
    tokens
}

/// Set of class names used by the selectors of `css`.
///
/// An empty set is not an error here; the scoping pipeline decides that.
pub fn extract_class_names(css: &str) -> Result<BTreeSet<String>, CssError> {
    let segments = tokenize_stylesheet(css)?;
    Ok(class_tokens(css, &segments)
        .iter()
        .map(|token| token.name(css).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(css: &str) -> Vec<String> {
        extract_class_names(css).unwrap().into_iter().collect()
    }

    #[test]
    fn collects_each_name_once() {
        assert_eq!(
            names(".container { padding: 16px; } .container:hover { opacity: 0.8; }"),
            vec!["container"]
        );
    }

    #[test]
    fn compound_and_combined_selectors() {
        assert_eq!(
            names("div.card > .card__title + .card-body, .a.b::before, :not(.hidden) {}"),
            vec!["a", "b", "card", "card-body", "card__title", "hidden"]
        );
    }

    #[test]
    fn ignores_declarations_comments_and_opaque_text() {
        assert_eq!(
            names(
                "/* .commented {} */ a[href$=\".pdf\"].file { background: url(icon.png); width: 1.5em; }"
            ),
            vec!["file"]
        );
    }

    #[test]
    fn ignores_at_rule_preludes() {
        assert_eq!(names("@import url(theme.css); .x {}"), vec!["x"]);
    }

    #[test]
    fn no_classes_is_an_empty_set() {
        assert!(extract_class_names("body { color: black; }").unwrap().is_empty());
    }

    #[test]
    fn token_spans_point_at_names() {
        let css = ".a:hover, p.b {}";
        let segments = tokenize_stylesheet(css).unwrap();
        let spans: Vec<_> = class_tokens(css, &segments)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(spans, vec![1..2, 12..13]);
    }
}
