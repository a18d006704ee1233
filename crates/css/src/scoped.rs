use tools::hash::base36_digest;

use crate::error::CssError;
use crate::syntax::{parse_stylesheet, pseudo_element_start};

/// Deterministic scope class for a component's style text.
pub fn unique_scope_class(css: &str) -> String {
    format!("scoped-{}", base36_digest(css))
}

/// Restrict every selector of `css` to elements carrying `unique_class`.
///
/// `.a:hover, p::before { ... }` becomes
/// `.a:hover.{unique_class}, p.{unique_class}::before { ... }`.
pub fn scope_selectors(css: &str, unique_class: &str) -> Result<String, CssError> {
    let sheet = parse_stylesheet(css)?;
    Ok(sheet.render_with(|selector| {
        let suffix = format!(".{unique_class}");
        match pseudo_element_start(selector) {
            Some(idx) => format!("{}{suffix}{}", &selector[..idx], &selector[idx..]),
            None => format!("{selector}{suffix}"),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_scope_to_every_selector() {
        let out = scope_selectors(".a, .b:hover { color: red; }\np { margin: 0; }", "scoped-x").unwrap();
        assert_eq!(
            out,
            ".a.scoped-x, .b:hover.scoped-x { color: red; }\np.scoped-x { margin: 0; }"
        );
    }

    #[test]
    fn scope_goes_before_pseudo_elements() {
        let out = scope_selectors(".a::before, .b > i::after {}", "s").unwrap();
        assert_eq!(out, ".a.s::before, .b > i.s::after {}");
    }

    #[test]
    fn pseudo_lookalikes_in_attribute_values_are_kept() {
        let out = scope_selectors(r#"a[title="x::y"] { color: red; }"#, "s").unwrap();
        assert_eq!(out, r#"a[title="x::y"].s { color: red; }"#);
        let out = scope_selectors(r#"q[cite='a::b']::before {}"#, "s").unwrap();
        assert_eq!(out, r#"q[cite='a::b'].s::before {}"#);
    }

    #[test]
    fn keeps_comments_and_at_rules() {
        let out = scope_selectors("/* x */ @font-face { font-family: f; } :root { --c: 1; }", "s")
            .unwrap();
        assert_eq!(
            out,
            "/* x */\n@font-face { font-family: f; }\n:root.s { --c: 1; }"
        );
    }

    #[test]
    fn unique_class_is_deterministic() {
        let css = "div { color: red; }";
        assert_eq!(unique_scope_class(css), unique_scope_class(css));
        assert!(unique_scope_class(css).starts_with("scoped-"));
        assert_ne!(unique_scope_class(css), unique_scope_class("div { color: blue; }"));
    }
}
