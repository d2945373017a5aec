/// Word paragraph assembly around converted formulas.
///
/// Paragraph text is scanned for `$...$` inline formulas and `$$...$$`
/// display formulas; each formula is converted to OMML and placed in a `w:p`
/// element next to the surrounding text runs.
///
/// # Example
///
/// ```rust
/// use latex_omml::ConvertOptions;
/// use latex_omml::document::{ParagraphAssembler, block_formula};
///
/// let assembler = ParagraphAssembler::new(ConvertOptions::default());
///
/// let line = r"$$\frac{a}{b}$$";
/// let assembled = match block_formula(line) {
///     Some(body) => assembler.block_paragraph(body),
///     None => assembler.inline_paragraph(line),
/// };
/// assert!(assembled.warnings.is_empty());
/// ```
mod paragraph;
mod scan;

pub use paragraph::{Assembled, ParagraphAssembler};
pub use scan::{Segment, TextSpan, block_formula, scan_inline, scan_strong, strip_delimiters};
