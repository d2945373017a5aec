// Command normalization
//
// Rewrites Greek letter and simple symbol commands to their Unicode glyphs
// before parsing. Unknown commands are left untouched for the parser.

use super::symbols::{GREEK_LETTERS, SYMBOL_COMMANDS};
use memchr::memchr;
use smallvec::SmallVec;
use std::borrow::Cow;

/// A replaced command: where the glyph sits in the output and which bytes of
/// the source it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Splice {
    at: usize,
    len: usize,
    source_at: usize,
    source_len: usize,
}

/// Normalized formula text together with the mapping back to the source.
#[derive(Debug, Clone)]
pub struct Normalized<'a> {
    source: &'a str,
    text: Cow<'a, str>,
    splices: SmallVec<[Splice; 4]>,
}

impl<'a> Normalized<'a> {
    /// The normalized text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether no command was rewritten
    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.splices.is_empty()
    }

    /// Map a byte offset in the normalized text to a character offset in the
    /// source formula.
    ///
    /// Offsets that fall inside a substituted glyph map to the backslash of
    /// the command it replaced.
    pub fn source_offset(&self, offset: usize) -> usize {
        let mut target = offset;
        let mut text_base = 0;
        let mut source_base = 0;

        for splice in &self.splices {
            if target < splice.at + splice.len {
                if target > splice.at {
                    target = splice.at;
                }
                break;
            }
            text_base = splice.at + splice.len;
            source_base = splice.source_at + splice.source_len;
        }

        let source_byte = source_base + target.saturating_sub(text_base);
        match self.source.get(..source_byte) {
            Some(prefix) => prefix.chars().count(),
            None => self.source.chars().count(),
        }
    }
}

/// Replace every recognized Greek or symbol command with its glyph.
///
/// A command name is the maximal run of ASCII letters after a backslash, so
/// `\alphax` is not `\alpha`. An escaped backslash (`\\`, the row separator)
/// never starts a command.
///
/// # Example
/// ```
/// use latex_omml::formula::latex::normalize;
///
/// assert_eq!(normalize(r"\alpha^2").as_str(), "α^2");
/// assert_eq!(normalize(r"a\\beta").as_str(), r"a\\beta");
/// ```
pub fn normalize(source: &str) -> Normalized<'_> {
    let bytes = source.as_bytes();
    let mut output: Option<String> = None;
    let mut splices = SmallVec::new();
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memchr(b'\\', &bytes[pos..]) {
        let start = pos + found;
        let name_start = start + 1;

        if bytes.get(name_start) == Some(&b'\\') {
            pos = name_start + 1;
            continue;
        }

        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let name_end = name_start + name_len;
        pos = name_end;
        if name_len == 0 {
            continue;
        }

        let name = &source[name_start..name_end];
        let mut glyph_buf = [0u8; 4];
        let replacement = match GREEK_LETTERS.get(name) {
            Some(glyph) => Some(&*glyph.encode_utf8(&mut glyph_buf)),
            None => SYMBOL_COMMANDS.get(name).copied(),
        };

        if let Some(replacement) = replacement {
            let buffer = output.get_or_insert_with(|| String::with_capacity(source.len()));
            buffer.push_str(&source[copied..start]);
            splices.push(Splice {
                at: buffer.len(),
                len: replacement.len(),
                source_at: start,
                source_len: name_end - start,
            });
            buffer.push_str(replacement);
            copied = name_end;
        }
    }

    let text = match output {
        Some(mut buffer) => {
            buffer.push_str(&source[copied..]);
            Cow::Owned(buffer)
        },
        None => Cow::Borrowed(source),
    };

    Normalized {
        source,
        text,
        splices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_substitution() {
        assert_eq!(normalize(r"\alpha^2").as_str(), "α^2");
        assert_eq!(normalize(r"\omega_e^*").as_str(), "ω_e^*");
        assert_eq!(normalize(r"\Delta x").as_str(), "Δ x");
    }

    #[test]
    fn test_symbol_substitution() {
        assert_eq!(normalize(r"a \cdot b \leq c").as_str(), "a ⋅ b ≤ c");
    }

    #[test]
    fn test_unknown_commands_pass_through() {
        let normalized = normalize(r"\frac{a}{b}");
        assert_eq!(normalized.as_str(), r"\frac{a}{b}");
        assert!(normalized.is_unchanged());

        assert_eq!(normalize(r"\alphax").as_str(), r"\alphax");
        assert_eq!(normalize(r"\sin x").as_str(), r"\sin x");
    }

    #[test]
    fn test_escaped_backslash_is_not_a_command() {
        assert_eq!(normalize(r"a\\beta").as_str(), r"a\\beta");
        assert_eq!(normalize(r"a\\\beta").as_str(), r"a\\β");
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(normalize("x\\").as_str(), "x\\");
        assert_eq!(normalize(r"\,x").as_str(), r"\,x");
    }

    #[test]
    fn test_source_offset_mapping() {
        let normalized = normalize(r"\alpha+\beta{");
        assert_eq!(normalized.as_str(), "α+β{");
        // '+' sits at byte 2 after the two-byte α
        assert_eq!(normalized.source_offset(2), 6);
        // '{' follows β
        assert_eq!(normalized.source_offset(5), 12);
        // end of text
        assert_eq!(normalized.source_offset(6), 13);
        // inside the α glyph maps to its backslash
        assert_eq!(normalized.source_offset(1), 0);
    }

    #[test]
    fn test_source_offset_counts_characters() {
        let normalized = normalize("αβ{");
        assert!(normalized.is_unchanged());
        assert_eq!(normalized.source_offset(4), 2);
    }
}
