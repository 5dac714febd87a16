//! WidthError for column width parsing

/// Error type for parsing and resolving declared column widths.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WidthError {
    /// The value is not a number, a whole percentage or an `fr` unit.
    #[error("Width '{value}' is not a supported format, expected a number (150), percentage (50%) or fr unit (2fr)")]
    Malformed { value: String },

    /// A flexible width was used where a static width is required.
    #[error("Width '{value}' is not static, only percentages or numbers are supported here")]
    NotStatic { value: String },
}

impl WidthError {
    /// Creates a new malformed width error.
    pub fn malformed(value: impl Into<String>) -> Self {
        Self::Malformed {
            value: value.into(),
        }
    }

    /// Creates a new non-static width error.
    pub fn not_static(value: impl Into<String>) -> Self {
        Self::NotStatic {
            value: value.into(),
        }
    }
}
