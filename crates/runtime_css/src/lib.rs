//! Runtime half of scoped styles: injects rewritten CSS into a document and
//! remembers what was injected.

mod apply;
mod error;
mod host;
mod module;
mod registry;
mod scoped;
mod styled;

pub use apply::{ClassLookup, apply_class_map, kebab_to_camel, transform_class_name};
pub use error::{InjectError, ModuleError};
pub use host::{DetachedHost, DocumentHost, StyleHost};
pub use module::{ModuleOutcome, css_module, css_module_template, inject, try_css_module};
pub use registry::{Lookup, StyleRegistry};
pub use scoped::{SCOPE_ATTRIBUTE, ScopedStyles};
pub use styled::{SHARED_STYLE_ID, Styled, StyledComponent};
