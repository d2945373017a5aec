//! WordprocessingML paragraphs carrying converted formulas.

use super::scan::{Segment, TextSpan, scan_inline, scan_strong, strip_delimiters};
use crate::config::ConvertOptions;
use crate::formula::omml::{Element, ElementType};
use crate::formula::{FormulaOutput, FormulaWarning, convert, convert_all};

/// An assembled paragraph and the formulas that fell back to plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    /// The `w:p` element
    pub paragraph: Element,
    /// One entry per formula written as plain text, in document order
    pub warnings: Vec<FormulaWarning>,
}

/// Builds `w:p` elements for body text with inline formulas and for
/// display formulas.
///
/// # Examples
///
/// ```rust
/// use latex_omml::ConvertOptions;
/// use latex_omml::document::ParagraphAssembler;
///
/// let assembler = ParagraphAssembler::new(ConvertOptions::default());
/// let assembled = assembler.inline_paragraph(r"where $\omega_e$ is the speed");
/// assert!(assembled.warnings.is_empty());
/// assert_eq!(assembled.paragraph.children_named("m:oMath").count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParagraphAssembler {
    options: ConvertOptions,
}

impl ParagraphAssembler {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Body paragraph: text runs and inline `$...$` formulas in source order.
    ///
    /// `**bold**` spans in the text become bold runs. Whitespace-only text
    /// between formulas is dropped.
    pub fn inline_paragraph(&self, text: &str) -> Assembled {
        let segments = scan_inline(text);
        let formulas: Vec<&str> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Math(body) => Some(*body),
                Segment::Text(_) => None,
            })
            .collect();
        let mut converted = convert_all(formulas.as_slice(), &self.options).into_iter();

        let mut paragraph = Element::of(ElementType::Paragraph).with_child(self.body_properties());
        let mut warnings = Vec::new();

        for segment in segments {
            match segment {
                Segment::Text(text) => {
                    for span in scan_strong(text) {
                        match span {
                            TextSpan::Plain(plain) if plain.trim().is_empty() => {},
                            TextSpan::Plain(plain) => paragraph.push(self.text_run(plain, false)),
                            TextSpan::Strong(strong) => paragraph.push(self.text_run(strong, true)),
                        }
                    }
                },
                Segment::Math(body) => {
                    let Some(output) = converted.next() else {
                        break;
                    };
                    if !body.trim().is_empty() {
                        Self::take_output(output, &mut paragraph, &mut warnings);
                    }
                },
            }
        }

        Assembled {
            paragraph,
            warnings,
        }
    }

    /// Display paragraph: formula style, a tab, the formula, a closing tab.
    ///
    /// `formula` may still carry its `$$` or `$` delimiters.
    pub fn block_paragraph(&self, formula: &str) -> Assembled {
        let body = strip_delimiters(formula);

        let mut paragraph = Element::of(ElementType::Paragraph)
            .with_child(self.formula_properties())
            .with_child(self.tab_run());
        let mut warnings = Vec::new();

        if !body.is_empty() {
            Self::take_output(convert(body, &self.options), &mut paragraph, &mut warnings);
        }
        paragraph.push(self.tab_run());

        Assembled {
            paragraph,
            warnings,
        }
    }

    fn take_output(output: FormulaOutput, paragraph: &mut Element, warnings: &mut Vec<FormulaWarning>) {
        paragraph.push(output.element);
        warnings.extend(output.warning);
    }

    fn body_properties(&self) -> Element {
        let options = &self.options;
        Element::of(ElementType::ParagraphProperties)
            .with_child(Self::style(&options.paragraph_styles.body))
            .with_child(
                Element::of(ElementType::TextRunProperties)
                    .with_child(Element::of(ElementType::Fonts).with_attr("w:hint", options.greek_hint.as_str()))
                    .with_child(
                        Element::of(ElementType::Language)
                            .with_attr("w:eastAsia", options.language.east_asia.as_str()),
                    ),
            )
    }

    fn formula_properties(&self) -> Element {
        let options = &self.options;
        Element::of(ElementType::ParagraphProperties)
            .with_child(Self::style(&options.paragraph_styles.formula))
            .with_child(Element::of(ElementType::Bidi).with_attr("w:val", "0"))
            .with_child(
                Element::of(ElementType::TextRunProperties)
                    .with_child(
                        Element::of(ElementType::Fonts)
                            .with_attr("w:hint", options.default_hint.as_str())
                            .with_attr("w:eastAsia", options.east_asia_font.as_str()),
                    )
                    .with_child(self.language()),
            )
    }

    fn style(id: &str) -> Element {
        Element::of(ElementType::ParagraphStyle).with_attr("w:val", id)
    }

    fn language(&self) -> Element {
        Element::of(ElementType::Language)
            .with_attr("w:val", self.options.language.val.as_str())
            .with_attr("w:eastAsia", self.options.language.east_asia.as_str())
    }

    fn text_run(&self, text: &str, bold: bool) -> Element {
        let mut properties = Element::of(ElementType::TextRunProperties)
            .with_child(Element::of(ElementType::Fonts).with_attr("w:hint", self.options.greek_hint.as_str()));
        if bold {
            properties.push(Element::of(ElementType::Bold));
            properties.push(self.language());
        }

        let mut t = Element::of(ElementType::RunText).with_text(text);
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            t.set_attr("xml:space", "preserve");
        }
        Element::of(ElementType::TextRun).with_child(properties).with_child(t)
    }

    /// Tab run around a display formula, explicitly upright and not bold
    fn tab_run(&self) -> Element {
        Element::of(ElementType::TextRun)
            .with_child(
                Element::of(ElementType::TextRunProperties)
                    .with_child(
                        Element::of(ElementType::Fonts)
                            .with_attr("w:hint", self.options.greek_hint.as_str())
                            .with_attr("w:hAnsi", self.options.math_font.as_str()),
                    )
                    .with_child(Element::of(ElementType::Bold).with_attr("w:val", "0"))
                    .with_child(Element::of(ElementType::Italic).with_attr("w:val", "0"))
                    .with_child(self.language()),
            )
            .with_child(Element::of(ElementType::Tab))
    }
}
