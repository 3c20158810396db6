//! Error types for the normalization core.
//!
//! Every failure here is scoped to a single input or record — nothing is
//! fatal to the process, and previously stored records are never touched by
//! a failed import. The CLI boundary wraps these in `anyhow` with context.

use thiserror::Error;

/// Reason code for a structurally malformed CSV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvErrorKind {
    /// The file contained no non-blank lines.
    Empty,
    /// The file contained a header line but no data rows.
    HeaderOnly,
    /// A row carried fewer fields than the header declares.
    ColumnMismatch,
}

impl CsvErrorKind {
    /// Stable lowercase reason code, suitable for user-facing messages.
    pub fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::HeaderOnly => "header_only",
            Self::ColumnMismatch => "column_mismatch",
        }
    }
}

/// A recoverable parse failure in one input (URL, CSV, or API payload).
///
/// The caller decides whether to surface the message or fall back; prior
/// state is unaffected either way.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not a well-formed URL: {0}")]
    InvalidUrl(String),
    #[error("malformed CSV ({})", .0.code())]
    Csv(CsvErrorKind),
    #[error("malformed API payload: {0}")]
    InvalidPayload(String),
}

/// A record that breaches the metrics invariant after coercion.
///
/// Coercion fails closed to zero, so this should be unreachable in practice.
/// When it does fire, only the one record fails — never the batch.
#[derive(Debug, Error)]
#[error("metric '{field}' is not a finite non-negative number ({value})")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_reason_codes_are_stable() {
        assert_eq!(CsvErrorKind::Empty.code(), "empty");
        assert_eq!(CsvErrorKind::HeaderOnly.code(), "header_only");
        assert_eq!(CsvErrorKind::ColumnMismatch.code(), "column_mismatch");
    }

    #[test]
    fn parse_error_messages_carry_reason() {
        let err = ParseError::Csv(CsvErrorKind::HeaderOnly);
        assert!(err.to_string().contains("header_only"));

        let err = ParseError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("not a well-formed URL"));
    }
}
