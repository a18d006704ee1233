pub mod error;
pub mod extract;
pub mod module;
pub mod rewrite;
pub mod scoped;
pub mod styled;
pub mod syntax;
pub mod template;

// Re-exports so other crates can just use `css::...` nicely.
pub use error::CssError;
pub use extract::{ClassToken, class_tokens, extract_class_names};
pub use module::{
    ScopeConfig, ScopedStylesheet, class_map_for, content_hash, scope_css, scoped_class_name,
};
pub use rewrite::rewrite;
pub use scoped::{scope_selectors, unique_scope_class};
pub use styled::{styled_css, styled_key};
pub use syntax::{
    Item, Segment, SegmentKind, StyleRule, Stylesheet, parse_stylesheet, tokenize_stylesheet,
};
pub use template::interpolate;
