// Error definitions for LaTeX parsing

use thiserror::Error;

/// Result type for LaTeX parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Why a group or environment is unbalanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    /// `{` or `\begin` without a matching close before the end of input
    Unclosed,
    /// `}` or `\end` without a matching open
    UnexpectedClose,
    /// `\end{X}` closing a different `\begin{Y}`
    MismatchedEnd,
}

impl std::fmt::Display for Imbalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Imbalance::Unclosed => f.write_str("group opened but never closed"),
            Imbalance::UnexpectedClose => f.write_str("group closed without a matching open"),
            Imbalance::MismatchedEnd => f.write_str("environment closed with a different name"),
        }
    }
}

/// Reason code of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnbalancedGroup,
    UnknownEnvironment,
    UnequalColumns,
    UnsupportedCommand,
    NestingTooDeep,
}

/// Structural errors raised by the LaTeX parser.
///
/// Offsets are character offsets into the formula as written by the
/// author, before command normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Brace or environment opened but never closed, or closed without a
    /// matching open
    #[error("unbalanced group at offset {offset}: {reason}")]
    UnbalancedGroup { offset: usize, reason: Imbalance },

    /// `\begin{X}` naming an unsupported environment
    #[error("unknown environment '{name}' at offset {offset}")]
    UnknownEnvironment { offset: usize, name: String },

    /// A matrix or cases row with a different cell count than the first row
    #[error("row {row} has {found} columns but the first row has {expected} (offset {offset})")]
    UnequalColumns {
        offset: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A LaTeX command without an OMML mapping
    #[error("unsupported command '\\{name}' at offset {offset}")]
    UnsupportedCommand { offset: usize, name: String },

    /// Groups, environments or commands nested deeper than the parser allows
    #[error("formula nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },
}

impl ParseError {
    /// Character offset where the error was detected
    #[inline]
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnbalancedGroup { offset, .. }
            | ParseError::UnknownEnvironment { offset, .. }
            | ParseError::UnequalColumns { offset, .. }
            | ParseError::UnsupportedCommand { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => *offset,
        }
    }

    /// Reason code of this error
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnbalancedGroup { .. } => ParseErrorKind::UnbalancedGroup,
            ParseError::UnknownEnvironment { .. } => ParseErrorKind::UnknownEnvironment,
            ParseError::UnequalColumns { .. } => ParseErrorKind::UnequalColumns,
            ParseError::UnsupportedCommand { .. } => ParseErrorKind::UnsupportedCommand,
            ParseError::NestingTooDeep { .. } => ParseErrorKind::NestingTooDeep,
        }
    }

    /// Rewrite the offset, e.g. from normalized-text bytes to source characters
    pub(crate) fn map_offset(mut self, map: impl FnOnce(usize) -> usize) -> Self {
        match &mut self {
            ParseError::UnbalancedGroup { offset, .. }
            | ParseError::UnknownEnvironment { offset, .. }
            | ParseError::UnequalColumns { offset, .. }
            | ParseError::UnsupportedCommand { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => *offset = map(*offset),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offset() {
        let err = ParseError::UnbalancedGroup {
            offset: 10,
            reason: Imbalance::Unclosed,
        };
        let msg = err.to_string();
        assert!(msg.contains("offset 10"));
        assert!(msg.contains("never closed"));
        assert_eq!(err.kind(), ParseErrorKind::UnbalancedGroup);
    }

    #[test]
    fn test_map_offset() {
        let err = ParseError::UnsupportedCommand {
            offset: 4,
            name: "sqrt".to_string(),
        }
        .map_offset(|o| o * 2);
        assert_eq!(err.offset(), 8);
        assert_eq!(err.to_string(), "unsupported command '\\sqrt' at offset 8");
    }
}
