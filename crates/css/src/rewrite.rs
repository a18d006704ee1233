use core_types::ClassNameMap;

use crate::error::CssError;
use crate::extract::class_tokens;
use crate::syntax::tokenize_stylesheet;

/// Replace every mapped class token of `css` with its scoped name.
///
/// Single pass over the tokens found by [`class_tokens`]: replacements are
/// never re-scanned, suffixes such as `:hover` or `::after` stay where they
/// are, and names missing from `map` are left untouched. Every byte outside
/// a replaced name is copied as is.
pub fn rewrite(css: &str, map: &ClassNameMap) -> Result<String, CssError> {
    let segments = tokenize_stylesheet(css)?;
    let mut out = String::with_capacity(css.len() + map.len() * 8);
    let mut copied = 0;

    for token in class_tokens(css, &segments) {
        let name = token.name(css);
        let Some(scoped) = map.get(name) else {
            continue;
        };
        log::trace!(target: "css.module", "rewrite .{name} -> .{scoped}");
        out.push_str(&css[copied..token.name.start]);
        out.push_str(scoped);
        copied = token.name.end;
    }
    out.push_str(&css[copied..]);
    Ok(out)
}
