//! # Error Taxonomy for Row Access
//!
//! Fallible operations in this crate return `eyre::Result`. Failures that
//! callers are expected to distinguish carry an [`AccessError`] inside the
//! report, recoverable with `Report::downcast_ref::<AccessError>()`.
//!
//! ## Kinds
//!
//! | Kind | Meaning |
//! |------|---------|
//! | `TypeMismatch` | Coercion cannot produce the requested type from the actual value |
//! | `Unsupported` | Operation is intentionally not implemented |
//! | `Encoding` | A stream byte is not valid in its declared character encoding |
//!
//! Failures originating in the row source or in stream I/O propagate as
//! plain reports and are not classified here.

/// Classified failure raised by the accessor and coercion layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The actual column value cannot be converted to the requested type.
    TypeMismatch {
        actual: &'static str,
        requested: &'static str,
    },
    /// The operation is intentionally unsupported.
    Unsupported(&'static str),
    /// A byte of a character stream is not valid in the declared encoding.
    Encoding {
        encoding: &'static str,
        byte: u8,
        offset: u64,
    },
}

impl AccessError {
    pub fn type_mismatch(actual: &'static str, requested: &'static str) -> Self {
        AccessError::TypeMismatch { actual, requested }
    }

    pub fn unsupported(feature: &'static str) -> Self {
        AccessError::Unsupported(feature)
    }

    pub fn encoding(encoding: &'static str, byte: u8, offset: u64) -> Self {
        AccessError::Encoding {
            encoding,
            byte,
            offset,
        }
    }
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::TypeMismatch { actual, requested } => {
                write!(f, "cannot convert {} to {}", actual, requested)
            }
            AccessError::Unsupported(feature) => {
                write!(f, "unsupported feature: {}", feature)
            }
            AccessError::Encoding {
                encoding,
                byte,
                offset,
            } => {
                write!(
                    f,
                    "invalid {} stream: byte 0x{:02x} at offset {}",
                    encoding, byte, offset
                )
            }
        }
    }
}

impl std::error::Error for AccessError {}
