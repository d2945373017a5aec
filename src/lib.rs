//! latex-omml - Convert LaTeX math to Office Math Markup Language
//!
//! This library turns the LaTeX math subset found in technical Markdown
//! (subscripts, superscripts, fractions, Greek letters, named functions,
//! matrices and piecewise cases) into the OMML element trees Word stores in
//! `.docx` files.
//!
//! # Features
//!
//! - **Three-stage pipeline**: normalizer, recursive-descent parser and OMML emitter
//! - **Total conversion**: formulas that do not parse fall back to their raw text
//! - **Precise errors**: every parse error carries the character offset where it was found
//! - **Batch conversion**: independent formulas convert in parallel (`parallel` feature)
//! - **Paragraph assembly**: `w:p` elements for body text with inline formulas and display formulas
//!
//! # Example - Converting a formula
//!
//! ```
//! use latex_omml::{ConvertOptions, convert};
//!
//! let output = convert(r"\frac{a}{b}", &ConvertOptions::default());
//! assert!(output.warning.is_none());
//!
//! let fraction = output.element.find("m:f").unwrap();
//! assert!(fraction.find("m:num").is_some());
//! ```
//!
//! # Example - Strict parsing
//!
//! ```
//! use latex_omml::{ConvertOptions, ParseErrorKind, try_convert};
//!
//! let err = try_convert(r"\frac{a}{b", &ConvertOptions::default()).unwrap_err();
//! assert_eq!(err.kind(), ParseErrorKind::UnbalancedGroup);
//! assert_eq!(err.offset(), 10);
//! ```
//!
//! # Example - Writing XML
//!
//! ```
//! use latex_omml::{ConvertOptions, WriteOptions, convert, to_xml};
//!
//! let output = convert("x_d", &ConvertOptions::default());
//! let xml = to_xml(&output.element, &WriteOptions::new().with_namespaces(true));
//! assert!(xml.starts_with("<m:oMath xmlns:m="));
//! ```

/// Conversion options
///
/// Fonts, style markers and paragraph style ids written into the output.
pub mod config;

/// Paragraph assembly
///
/// Scans paragraph text for `$...$` and `$$...$$` formulas and builds `w:p`
/// elements around the converted OMML.
pub mod document;

/// LaTeX to OMML formula conversion
///
/// Normalizer, parser, expression tree, OMML emitter and XML writer.
pub mod formula;

// Re-export commonly used types for convenience
pub use config::{ConvertOptions, Language, MathStyle, ParagraphStyles};
pub use document::{Assembled, ParagraphAssembler};
pub use formula::omml::{Element, WriteOptions, to_xml};
pub use formula::{
    ExprNode, FormulaOutput, FormulaWarning, ParseError, ParseErrorKind, convert, convert_all,
    try_convert,
};
