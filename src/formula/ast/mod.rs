// Abstract Syntax Tree for LaTeX formulas
//
// The parser produces an `ExprNode` tree per formula; the OMML emitter
// consumes it read-only.

mod node;

pub use node::{ExprNode, MatrixKind};
