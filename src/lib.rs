//! Scoped CSS class names.
//!
//! Style text is hashed, every class selector in it is renamed to a
//! collision-resistant `css-xxxxxx` name, and the rewritten text is appended
//! to a document once per distinct content. The returned [`ClassNameMap`]
//! tells UI code which scoped name to put where it wrote the original.
//!
//! ```
//! use stylescope::{DocumentHost, css_module};
//!
//! let mut host = DocumentHost::new();
//! let styles = css_module(&mut host, ".container { padding: 16px; }").unwrap();
//! assert!(styles.get("container").unwrap().starts_with("css-"));
//! ```
//!
//! The functions here use [`StyleRegistry::global`] and the default
//! [`ScopeConfig`]. Pass a registry and config explicitly through
//! [`runtime_css::css_module`] to scope independently.

pub use core_types::{ClassNameMap, ContentHash, StyleId};
pub use css::{CssError, ScopeConfig, ScopedStylesheet, extract_class_names, rewrite, scope_css};
pub use html::{VNode, map_elements};
pub use runtime_css::{
    ClassLookup, DetachedHost, DocumentHost, InjectError, ModuleError, ModuleOutcome,
    ScopedStyles, StyleHost, StyleRegistry, Styled, StyledComponent, apply_class_map,
};

pub use css;
pub use html;
pub use runtime_css;

/// Scoped class names for `css`, injecting it into `host` the first time
/// this text is seen in the process. `None` when `css` has no class
/// selectors or cannot be scoped.
pub fn css_module<H: StyleHost + ?Sized>(host: &mut H, css: &str) -> Option<ClassNameMap> {
    runtime_css::css_module(host, StyleRegistry::global(), css, &ScopeConfig::default())
}

/// [`css_module`] over template `parts` interleaved with `values`.
pub fn css_module_template<H: StyleHost + ?Sized, S: AsRef<str>>(
    host: &mut H,
    parts: &[&str],
    values: &[S],
) -> Option<ClassNameMap> {
    runtime_css::css_module_template(
        host,
        StyleRegistry::global(),
        parts,
        values,
        &ScopeConfig::default(),
    )
}

/// Drop every remembered injection from the process-wide registry.
///
/// Styles already in a document stay there; the next [`css_module`] call
/// with the same text injects again.
pub fn reset() {
    StyleRegistry::global().clear();
    log::debug!(target: "css.module", "global style registry cleared");
}
