use std::fmt;

use core_types::StyleId;
use css::CssError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InjectError {
    /// No document (or no `<head>`) to append to, e.g. when rendering on a server.
    EnvironmentUnavailable,
    /// The style element was removed or never existed.
    MissingElement(StyleId),
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::EnvironmentUnavailable => {
                f.write_str("no document head available for style injection")
            }
            InjectError::MissingElement(id) => write!(f, "style element {} not found", id.0),
        }
    }
}

impl std::error::Error for InjectError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleError {
    Css(CssError),
    Inject(InjectError),
    /// Anything else, including a panic caught at the boundary.
    Internal(String),
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::Css(err) => write!(f, "style text rejected: {err}"),
            ModuleError::Inject(err) => write!(f, "style injection failed: {err}"),
            ModuleError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ModuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModuleError::Css(err) => Some(err),
            ModuleError::Inject(err) => Some(err),
            ModuleError::Internal(_) => None,
        }
    }
}

impl From<CssError> for ModuleError {
    fn from(err: CssError) -> Self {
        ModuleError::Css(err)
    }
}

impl From<InjectError> for ModuleError {
    fn from(err: InjectError) -> Self {
        ModuleError::Inject(err)
    }
}
