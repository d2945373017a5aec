// LaTeX front end
//
// A formula goes through three stages:
// 1. `normalize` rewrites Greek and symbol commands to glyphs
// 2. `Lexer` splits the normalized text into tokens
// 3. `Parser` builds an `ExprNode` tree
//
// `parse_formula` runs all of them and reports error offsets against the
// formula as written.

pub mod error;
pub mod lexer;
mod matrix;
pub mod normalize;
mod parser;
pub mod symbols;

pub use error::{Imbalance, ParseError, ParseErrorKind, Result};
pub use lexer::{Lexer, Spanned, Token};
pub use matrix::{ENVIRONMENTS, EnvLayout};
pub use normalize::{Normalized, normalize};
pub use parser::{MAX_DEPTH, Parser};

use crate::formula::ast::ExprNode;

/// Parse a formula body (delimiters already stripped) into an expression tree.
///
/// Error offsets are character offsets into `source`.
///
/// # Example
/// ```
/// use latex_omml::formula::ast::ExprNode;
/// use latex_omml::formula::latex::parse_formula;
///
/// let node = parse_formula(r"\alpha^2").unwrap();
/// assert_eq!(
///     node,
///     ExprNode::superscript(ExprNode::symbol("α"), ExprNode::symbol("2"))
/// );
///
/// let err = parse_formula(r"\beta+\frac{a}{b").unwrap_err();
/// assert_eq!(err.offset(), 16);
/// ```
pub fn parse_formula(source: &str) -> Result<ExprNode> {
    let normalized = normalize(source);
    Parser::new(normalized.as_str())
        .parse()
        .map_err(|err| err.map_offset(|offset| normalized.source_offset(offset)))
}
