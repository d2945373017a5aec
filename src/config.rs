/// Configuration types for formula conversion.
///
/// These options fix the fonts, style markers and paragraph styles written
/// into the generated markup. The defaults reproduce the Word conventions
/// for a Cambria Math equation.
///
/// # Examples
///
/// ```rust
/// use latex_omml::{ConvertOptions, MathStyle};
///
/// // Create with defaults
/// let options = ConvertOptions::default();
/// assert_eq!(options.math_font, "Cambria Math");
///
/// // Or customize
/// let options = ConvertOptions::new()
///     .with_math_font("STIX Two Math")
///     .with_math_style(MathStyle::Italic)
///     .with_control_properties(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Font written to `w:ascii` and `w:hAnsi` of every math run
    pub math_font: String,
    /// Value of the `m:sty` style marker on every math run
    pub math_style: MathStyle,
    /// Font hint for runs made only of Greek letters
    pub greek_hint: String,
    /// Font hint for all other runs
    pub default_hint: String,
    /// Whether structures and slots carry an `m:ctrlPr` block
    pub control_properties: bool,
    /// Whether matrices hide empty cell placeholders (`m:plcHide`)
    pub hide_placeholders: bool,
    /// Paragraph style ids used by the paragraph assembler
    pub paragraph_styles: ParagraphStyles,
    /// Proofing languages written as `w:lang` by the paragraph assembler
    pub language: Language,
    /// East Asian font of the display formula paragraph mark
    pub east_asia_font: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            math_font: "Cambria Math".to_string(),
            math_style: MathStyle::Plain,
            greek_hint: "eastAsia".to_string(),
            default_hint: "default".to_string(),
            control_properties: true,
            hide_placeholders: true,
            paragraph_styles: ParagraphStyles::default(),
            language: Language::default(),
            east_asia_font: "宋体".to_string(),
        }
    }
}

impl ConvertOptions {
    /// Create a new `ConvertOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the math font.
    #[inline]
    pub fn with_math_font(mut self, font: impl Into<String>) -> Self {
        self.math_font = font.into();
        self
    }

    /// Set the run style marker.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use latex_omml::{ConvertOptions, MathStyle};
    ///
    /// let options = ConvertOptions::new().with_math_style(MathStyle::Bold);
    /// assert_eq!(options.math_style.as_val(), "b");
    /// ```
    #[inline]
    pub fn with_math_style(mut self, style: MathStyle) -> Self {
        self.math_style = style;
        self
    }

    /// Set the font hints for Greek and other runs.
    #[inline]
    pub fn with_font_hints(mut self, greek: impl Into<String>, default: impl Into<String>) -> Self {
        self.greek_hint = greek.into();
        self.default_hint = default.into();
        self
    }

    /// Set whether to emit `m:ctrlPr` blocks.
    #[inline]
    pub fn with_control_properties(mut self, enabled: bool) -> Self {
        self.control_properties = enabled;
        self
    }

    /// Set whether matrices hide empty placeholders.
    #[inline]
    pub fn with_hide_placeholders(mut self, hide: bool) -> Self {
        self.hide_placeholders = hide;
        self
    }

    /// Set the paragraph style ids.
    #[inline]
    pub fn with_paragraph_styles(mut self, styles: ParagraphStyles) -> Self {
        self.paragraph_styles = styles;
        self
    }

    /// Set the proofing languages.
    #[inline]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the East Asian font of display formula paragraphs.
    #[inline]
    pub fn with_east_asia_font(mut self, font: impl Into<String>) -> Self {
        self.east_asia_font = font.into();
        self
    }
}

/// Math run style written as the `m:sty` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MathStyle {
    /// Upright (`p`)
    #[default]
    Plain,
    /// Bold (`b`)
    Bold,
    /// Italic (`i`)
    Italic,
    /// Bold italic (`bi`)
    BoldItalic,
}

impl MathStyle {
    #[inline]
    pub fn as_val(self) -> &'static str {
        match self {
            MathStyle::Plain => "p",
            MathStyle::Bold => "b",
            MathStyle::Italic => "i",
            MathStyle::BoldItalic => "bi",
        }
    }
}

/// Paragraph style ids for body text and display formulas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphStyles {
    pub body: String,
    pub formula: String,
}

impl Default for ParagraphStyles {
    fn default() -> Self {
        Self {
            body: "29".to_string(),
            formula: "41".to_string(),
        }
    }
}

impl ParagraphStyles {
    pub fn new(body: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            formula: formula.into(),
        }
    }
}

/// `w:lang` values: `val` for Latin text, `east_asia` for CJK text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub val: String,
    pub east_asia: String,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            val: "en-US".to_string(),
            east_asia: "zh-CN".to_string(),
        }
    }
}

impl Language {
    pub fn new(val: impl Into<String>, east_asia: impl Into<String>) -> Self {
        Self {
            val: val.into(),
            east_asia: east_asia.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.math_style.as_val(), "p");
        assert_eq!(options.greek_hint, "eastAsia");
        assert_eq!(options.default_hint, "default");
        assert!(options.control_properties);
        assert!(options.hide_placeholders);
        assert_eq!(options.paragraph_styles, ParagraphStyles::new("29", "41"));
        assert_eq!(options.language, Language::new("en-US", "zh-CN"));
        assert_eq!(options.east_asia_font, "宋体");
    }

    #[test]
    fn test_builder() {
        let options = ConvertOptions::new()
            .with_math_style(MathStyle::BoldItalic)
            .with_font_hints("cs", "default")
            .with_paragraph_styles(ParagraphStyles::new("Normal", "Equation"))
            .with_language(Language::new("de-DE", "ja-JP"))
            .with_east_asia_font("MS Mincho");
        assert_eq!(options.math_style.as_val(), "bi");
        assert_eq!(options.language.east_asia, "ja-JP");
        assert_eq!(options.east_asia_font, "MS Mincho");
        assert_eq!(options.greek_hint, "cs");
        assert_eq!(options.paragraph_styles.formula, "Equation");
    }
}
