// Matrix and cases environments
//
// Rows are split on `\\`, cells on `&`. Every row must have as many cells as
// the first one.

use super::error::{Imbalance, ParseError, Result};
use super::lexer::Token;
use super::parser::{Parser, Stop};
use crate::formula::ast::{ExprNode, MatrixKind};
use phf::phf_map;

/// Layout selected by an environment name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvLayout {
    Matrix(MatrixKind),
    Cases,
}

/// Supported environments
pub static ENVIRONMENTS: phf::Map<&'static str, EnvLayout> = phf_map! {
    "matrix" => EnvLayout::Matrix(MatrixKind::None),
    "smallmatrix" => EnvLayout::Matrix(MatrixKind::None),
    "pmatrix" => EnvLayout::Matrix(MatrixKind::Round),
    "bmatrix" => EnvLayout::Matrix(MatrixKind::Square),
    "Bmatrix" => EnvLayout::Matrix(MatrixKind::Brace),
    "cases" => EnvLayout::Cases,
};

impl<'a> Parser<'a> {
    /// Parse an environment body after `\begin{name}` up to and including
    /// the matching `\end{name}`.
    pub(super) fn parse_environment(&mut self, name: &'a str, begin: usize) -> Result<ExprNode> {
        let Some(&layout) = ENVIRONMENTS.get(name) else {
            return Err(ParseError::UnknownEnvironment {
                offset: begin,
                name: name.to_string(),
            });
        };

        // (offset of the row's first token, cells)
        let mut rows: Vec<(usize, Vec<ExprNode>)> = Vec::new();
        let mut row = Vec::new();
        let mut row_start = self.lexer.offset();

        loop {
            let cell = self.parse_sequence(Stop::Cell)?;
            row.push(ExprNode::from_children(cell));

            let Some(separator) = self.lexer.next_token() else {
                return Err(self.unclosed());
            };
            match separator.token {
                Token::Ampersand => {},
                Token::RowSeparator => {
                    rows.push((row_start, std::mem::take(&mut row)));
                    row_start = self.lexer.offset();
                },
                Token::EndEnv(end) if end == name => {
                    rows.push((row_start, std::mem::take(&mut row)));
                    break;
                },
                Token::EndEnv(_) => {
                    return Err(ParseError::UnbalancedGroup {
                        offset: separator.start,
                        reason: Imbalance::MismatchedEnd,
                    });
                },
                _ => {
                    return Err(ParseError::UnbalancedGroup {
                        offset: separator.start,
                        reason: Imbalance::UnexpectedClose,
                    });
                },
            }
        }

        // A final `\\` before `\end` does not open a new row
        if rows.len() > 1 && rows.last().is_some_and(|(_, cells)| is_blank_row(cells)) {
            rows.pop();
        }

        let expected = rows.first().map_or(0, |(_, cells)| cells.len());
        for (index, (offset, cells)) in rows.iter().enumerate().skip(1) {
            if cells.len() != expected {
                return Err(ParseError::UnequalColumns {
                    offset: *offset,
                    row: index,
                    expected,
                    found: cells.len(),
                });
            }
        }

        let rows = rows.into_iter().map(|(_, cells)| cells).collect();
        Ok(match layout {
            EnvLayout::Matrix(kind) => ExprNode::Matrix { kind, rows },
            EnvLayout::Cases => ExprNode::Cases { rows },
        })
    }
}

#[inline]
fn is_blank_row(cells: &[ExprNode]) -> bool {
    matches!(cells, [only] if only.is_empty())
}
