use std::fmt;

/// Failure of the pure style-text layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CssError {
    /// The text contains no class selector to scope.
    NoClassNamesFound,
    /// A construct outside the supported grammar subset (for example a nested
    /// `@media` block).
    Unsupported {
        construct: &'static str,
        offset: usize,
    },
    /// Unbalanced or unterminated input.
    Malformed {
        reason: &'static str,
        offset: usize,
    },
}

impl fmt::Display for CssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssError::NoClassNamesFound => {
                write!(f, "no class selectors found (expected rules like `.name {{ ... }}`)")
            }
            CssError::Unsupported { construct, offset } => {
                write!(f, "unsupported construct at byte {offset}: {construct}")
            }
            CssError::Malformed { reason, offset } => {
                write!(f, "malformed style text at byte {offset}: {reason}")
            }
        }
    }
}

impl std::error::Error for CssError {}
