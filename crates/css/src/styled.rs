use tools::hash::base36_digest;

use crate::error::CssError;
use memchr::memchr_iter;

use crate::syntax::{mask_opaque, parse_stylesheet, pseudo_element_start};

/// Key of a styled template: used as the wrapper class and as the attribute
/// set on every descendant.
pub fn styled_key(css: &str) -> String {
    format!("css_{}", base36_digest(css))
}

/// Bind the selectors of a styled template to `key`.
///
/// `&` stands for the wrapper element and becomes `.key`; any other selector
/// is limited to descendants carrying the `key` attribute. Attribute values
/// and quoted strings are left as written.
///
/// ```text
/// &:hover { }      ->  .key:hover { }
/// span, a::after { } ->  span[key], a[key]::after { }
/// ```
pub fn styled_css(css: &str, key: &str) -> Result<String, CssError> {
    let sheet = parse_stylesheet(css)?;
    Ok(sheet.render_with(|selector| {
        let masked = mask_opaque(selector);
        if masked.contains(&b'&') {
            let mut out = String::with_capacity(selector.len() + key.len());
            let mut copied = 0;
            for idx in memchr_iter(b'&', &masked) {
                out.push_str(&selector[copied..idx]);
                out.push('.');
                out.push_str(key);
                copied = idx + 1;
            }
            out.push_str(&selector[copied..]);
            return out;
        }
        let attr = format!("[{key}]");
        match pseudo_element_start(selector) {
            Some(idx) => format!("{}{attr}{}", &selector[..idx], &selector[idx..]),
            None => format!("{selector}{attr}"),
        }
    }))
}
