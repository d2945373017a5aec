//! Formula delimiter scanning for paragraph text.

use memchr::{memchr, memmem};

/// A piece of paragraph text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text, written as an ordinary run
    Text(&'a str),
    /// Inline formula body without its `$` delimiters
    Math(&'a str),
}

/// Split paragraph text on inline `$...$` formulas.
///
/// A formula body is non-empty and contains no `$`. A `$` that does not open
/// such a body stays in the surrounding text. Empty text pieces are omitted.
///
/// # Examples
///
/// ```rust
/// use latex_omml::document::{Segment, scan_inline};
///
/// assert_eq!(
///     scan_inline("speed $v_d$ in m/s"),
///     vec![Segment::Text("speed "), Segment::Math("v_d"), Segment::Text(" in m/s")]
/// );
/// ```
pub fn scan_inline(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut search = 0;

    while let Some(found) = memchr(b'$', &bytes[search..]) {
        let open = search + found;
        let body_start = open + 1;
        let Some(len) = memchr(b'$', &bytes[body_start..]) else {
            break;
        };
        if len == 0 {
            // `$$`: the first dollar cannot open a formula
            search = body_start;
            continue;
        }

        let close = body_start + len;
        if open > text_start {
            segments.push(Segment::Text(&text[text_start..open]));
        }
        segments.push(Segment::Math(&text[body_start..close]));
        text_start = close + 1;
        search = text_start;
    }

    if text_start < text.len() {
        segments.push(Segment::Text(&text[text_start..]));
    }
    segments
}

/// A piece of body text between formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSpan<'a> {
    Plain(&'a str),
    /// `**...**` body without its markers
    Strong(&'a str),
}

/// Split body text on `**bold**` spans.
///
/// A span body is non-empty and contains no `*`; other asterisks stay plain
/// text.
///
/// # Examples
///
/// ```rust
/// use latex_omml::document::{TextSpan, scan_strong};
///
/// assert_eq!(
///     scan_strong("the **rotor** speed"),
///     vec![TextSpan::Plain("the "), TextSpan::Strong("rotor"), TextSpan::Plain(" speed")]
/// );
/// ```
pub fn scan_strong(text: &str) -> Vec<TextSpan<'_>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut text_start = 0;
    let mut search = 0;

    while let Some(found) = memmem::find(&bytes[search..], b"**") {
        let open = search + found;
        let body_start = open + 2;
        let Some(len) = memchr(b'*', &bytes[body_start..]) else {
            break;
        };
        let close = body_start + len;
        if len == 0 || bytes.get(close + 1) != Some(&b'*') {
            search = open + 1;
            continue;
        }

        if open > text_start {
            spans.push(TextSpan::Plain(&text[text_start..open]));
        }
        spans.push(TextSpan::Strong(&text[body_start..close]));
        text_start = close + 2;
        search = text_start;
    }

    if text_start < text.len() {
        spans.push(TextSpan::Plain(&text[text_start..]));
    }
    spans
}

/// Body of a display formula written as `$$...$$`, trimmed.
///
/// The text may span several lines. Returns `None` when `text` is not a
/// display formula.
pub fn block_formula(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.len() < 4 {
        return None;
    }
    trimmed
        .strip_prefix("$$")
        .and_then(|rest| rest.strip_suffix("$$"))
        .map(str::trim)
}

/// Remove one surrounding `$$` or `$` pair and the whitespace inside it.
pub fn strip_delimiters(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(body) = block_formula(trimmed) {
        return body;
    }
    match trimmed
        .strip_prefix('$')
        .and_then(|rest| rest.strip_suffix('$'))
    {
        Some(body) => body.trim(),
        None => trimmed,
    }
}
