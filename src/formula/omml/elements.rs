/// OMML and WordprocessingML element kinds produced by the emitter
///
/// Each kind has exactly one prefixed tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    // Math structure
    Math,
    Run,
    Text,
    Fraction,
    FractionProperties,
    Numerator,
    Denominator,
    Base,
    Subscript,
    SubscriptProperties,
    Superscript,
    SuperscriptProperties,
    SubSup,
    SubSupProperties,
    SubscriptElement,
    SuperscriptElement,
    Delimiter,
    DelimiterProperties,
    BeginChar,
    EndChar,
    Matrix,
    MatrixProperties,
    MatrixColumns,
    MatrixColumn,
    MatrixColumnProperties,
    ColumnCount,
    ColumnJustification,
    PlaceholderHide,
    MatrixRow,
    ControlProperties,
    RunProperties,
    Style,

    // WordprocessingML
    Paragraph,
    ParagraphProperties,
    ParagraphStyle,
    TextRun,
    TextRunProperties,
    Fonts,
    RunText,
    Tab,
    Bold,
    Italic,
    Language,
    Bidi,
}

impl ElementType {
    /// Prefixed tag name written to the document
    pub fn as_tag(self) -> &'static str {
        match self {
            ElementType::Math => "m:oMath",
            ElementType::Run => "m:r",
            ElementType::Text => "m:t",
            ElementType::Fraction => "m:f",
            ElementType::FractionProperties => "m:fPr",
            ElementType::Numerator => "m:num",
            ElementType::Denominator => "m:den",
            ElementType::Base => "m:e",
            ElementType::Subscript => "m:sSub",
            ElementType::SubscriptProperties => "m:sSubPr",
            ElementType::Superscript => "m:sSup",
            ElementType::SuperscriptProperties => "m:sSupPr",
            ElementType::SubSup => "m:sSubSup",
            ElementType::SubSupProperties => "m:sSubSupPr",
            ElementType::SubscriptElement => "m:sub",
            ElementType::SuperscriptElement => "m:sup",
            ElementType::Delimiter => "m:d",
            ElementType::DelimiterProperties => "m:dPr",
            ElementType::BeginChar => "m:begChr",
            ElementType::EndChar => "m:endChr",
            ElementType::Matrix => "m:m",
            ElementType::MatrixProperties => "m:mPr",
            ElementType::MatrixColumns => "m:mcs",
            ElementType::MatrixColumn => "m:mc",
            ElementType::MatrixColumnProperties => "m:mcPr",
            ElementType::ColumnCount => "m:count",
            ElementType::ColumnJustification => "m:mcJc",
            ElementType::PlaceholderHide => "m:plcHide",
            ElementType::MatrixRow => "m:mr",
            ElementType::ControlProperties => "m:ctrlPr",
            ElementType::RunProperties => "m:rPr",
            ElementType::Style => "m:sty",
            ElementType::Paragraph => "w:p",
            ElementType::ParagraphProperties => "w:pPr",
            ElementType::ParagraphStyle => "w:pStyle",
            ElementType::TextRun => "w:r",
            ElementType::TextRunProperties => "w:rPr",
            ElementType::Fonts => "w:rFonts",
            ElementType::RunText => "w:t",
            ElementType::Tab => "w:tab",
            ElementType::Bold => "w:b",
            ElementType::Italic => "w:i",
            ElementType::Language => "w:lang",
            ElementType::Bidi => "w:bidi",
        }
    }
}
