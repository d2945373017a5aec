// Tokenizer for normalized LaTeX formulas
//
// The lexer walks the formula with a byte cursor and hands out one token at a
// time with its span. The input string is never copied or modified.

/// Lexical unit of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Any character without special meaning
    Char(char),
    /// `\name` or a single-character command such as `\,`
    Command(&'a str),
    OpenBrace,
    CloseBrace,
    /// `_`
    Subscript,
    /// `^`
    Superscript,
    /// `&`, the column separator
    Ampersand,
    /// `\\`, the row separator
    RowSeparator,
    /// `\begin{name}`
    BeginEnv(&'a str),
    /// `\end{name}`
    EndEnv(&'a str),
}

/// A token and its byte span in the normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub start: usize,
    pub end: usize,
}

/// Cursor-based tokenizer with one token of lookahead
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    peeked: Option<Option<Spanned<'a>>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            peeked: None,
        }
    }

    /// Length of the input in bytes
    #[inline]
    pub fn end(&self) -> usize {
        self.src.len()
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> Option<Spanned<'a>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex());
        }
        self.peeked.flatten()
    }

    /// Consume the next token
    pub fn next_token(&mut self) -> Option<Spanned<'a>> {
        match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lex(),
        }
    }

    /// Byte offset where the next token starts, or the end of input
    pub fn offset(&mut self) -> usize {
        self.peek().map_or(self.src.len(), |t| t.start)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    fn lex(&mut self) -> Option<Spanned<'a>> {
        self.skip_whitespace();
        let start = self.pos;
        let c = self.src[start..].chars().next()?;
        self.pos += c.len_utf8();

        let token = match c {
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            '_' => Token::Subscript,
            '^' => Token::Superscript,
            '&' => Token::Ampersand,
            '\\' => self.lex_command(),
            _ => Token::Char(c),
        };

        Some(Spanned {
            token,
            start,
            end: self.pos,
        })
    }

    /// Lex what follows a backslash; `self.pos` is just past it.
    fn lex_command(&mut self) -> Token<'a> {
        let src = self.src;
        let rest = &src[self.pos..];
        let Some(first) = rest.chars().next() else {
            return Token::Char('\\');
        };

        if first == '\\' {
            self.pos += 1;
            return Token::RowSeparator;
        }

        if !first.is_ascii_alphabetic() {
            self.pos += first.len_utf8();
            return Token::Command(&rest[..first.len_utf8()]);
        }

        let name_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
        let name = &rest[..name_len];
        self.pos += name_len;

        match name {
            "begin" => self.lex_environment_name().map_or(Token::Command(name), Token::BeginEnv),
            "end" => self.lex_environment_name().map_or(Token::Command(name), Token::EndEnv),
            _ => Token::Command(name),
        }
    }

    /// Read `{name}` after `\begin` or `\end`; leaves the cursor untouched
    /// when no well-formed name follows.
    fn lex_environment_name(&mut self) -> Option<&'a str> {
        let src = self.src;
        let rest = &src[self.pos..];
        let after_space = rest.trim_start();
        let body = after_space.strip_prefix('{')?;
        let name_len = body
            .bytes()
            .take_while(|b| b.is_ascii_alphabetic() || *b == b'*')
            .count();
        if body.as_bytes().get(name_len) != Some(&b'}') {
            return None;
        }

        let skipped = rest.len() - after_space.len();
        self.pos += skipped + 1 + name_len + 1;
        Some(&body[..name_len])
    }
}
