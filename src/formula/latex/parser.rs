// Recursive descent parser for the supported LaTeX subset
//
// expr    := atom ( '_' atom | '^' atom ){0,2}
// atom    := symbol | '{' sequence '}' | command | environment
//
// The parser holds a single token of lookahead and never backtracks. Error
// offsets are byte offsets into the text handed to `Parser::new`.

use super::error::{Imbalance, ParseError, Result};
use super::lexer::{Lexer, Spanned, Token};
use super::symbols::{
    ESCAPED_CHARS, FRACTION_COMMANDS, FUNCTION_NAMES, GREEK_LETTERS, SIZING_COMMANDS,
    SPACING_COMMANDS, SYMBOL_COMMANDS, UNSUPPORTED_COMMANDS,
};
use crate::formula::ast::ExprNode;

/// Deepest atom nesting accepted before parsing stops with an error
pub const MAX_DEPTH: usize = 128; // Prevent stack overflow on hostile input

/// Where a sequence ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stop {
    /// End of input
    End,
    /// Matching `}`
    Brace,
    /// Matching `)` of a function call
    Paren,
    /// `&`, `\\` or `\end` inside an environment
    Cell,
    /// Matching `\right`
    Right,
}

/// LaTeX expression parser over normalized formula text
pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(normalized: &'a str) -> Self {
        Self {
            lexer: Lexer::new(normalized),
            depth: 0,
        }
    }

    /// Parse the whole input.
    ///
    /// A formula consisting of a single expression yields that expression;
    /// anything else yields a `Sequence`.
    pub fn parse(mut self) -> Result<ExprNode> {
        let children = self.parse_sequence(Stop::End)?;
        Ok(ExprNode::from_children(children))
    }

    #[inline]
    pub(super) fn peek_token(&mut self) -> Option<Token<'a>> {
        self.lexer.peek().map(|t| t.token)
    }

    pub(super) fn unclosed(&self) -> ParseError {
        ParseError::UnbalancedGroup {
            offset: self.lexer.end(),
            reason: Imbalance::Unclosed,
        }
    }

    fn unexpected_close(offset: usize) -> ParseError {
        ParseError::UnbalancedGroup {
            offset,
            reason: Imbalance::UnexpectedClose,
        }
    }

    /// Parse sibling expressions until `stop`; the terminating token is left
    /// for the caller.
    pub(super) fn parse_sequence(&mut self, stop: Stop) -> Result<Vec<ExprNode>> {
        self.parse_siblings(stop).map(wrap_parentheses)
    }

    fn parse_siblings(&mut self, stop: Stop) -> Result<Vec<ExprNode>> {
        let mut children = Vec::new();
        let mut paren_depth = 0usize;

        loop {
            let Some(next) = self.lexer.peek() else {
                return match stop {
                    Stop::End | Stop::Paren => Ok(children),
                    Stop::Brace | Stop::Cell | Stop::Right => Err(self.unclosed()),
                };
            };

            match next.token {
                Token::CloseBrace => {
                    if matches!(stop, Stop::Brace | Stop::Paren) {
                        return Ok(children);
                    }
                    return Err(Self::unexpected_close(next.start));
                },
                Token::Command("right") if stop == Stop::Right => return Ok(children),
                Token::Ampersand | Token::RowSeparator | Token::EndEnv(_)
                    if matches!(stop, Stop::Cell | Stop::Paren) =>
                {
                    return Ok(children);
                },
                Token::EndEnv(_) => return Err(Self::unexpected_close(next.start)),
                Token::Ampersand | Token::RowSeparator => {
                    // Separators outside an environment carry no layout
                    self.lexer.next_token();
                    continue;
                },
                Token::Char(')') if stop == Stop::Paren => {
                    if paren_depth == 0 {
                        return Ok(children);
                    }
                    paren_depth -= 1;
                },
                Token::Char('(') if stop == Stop::Paren => paren_depth += 1,
                _ => {},
            }

            if let Some(node) = self.parse_expr()? {
                match node {
                    ExprNode::Group { children: inner } => children.extend(inner),
                    other => children.push(other),
                }
            }
        }
    }

    /// Parse one atom together with its sub/superscripts.
    ///
    /// Returns `None` when the consumed tokens produce no node (sizing
    /// commands, negative space).
    fn parse_expr(&mut self) -> Result<Option<ExprNode>> {
        let base = match self.peek_token() {
            Some(Token::Subscript | Token::Superscript) => ExprNode::empty(),
            _ => match self.parse_atom(false)? {
                Some(node) => node,
                None => return Ok(None),
            },
        };
        self.parse_scripts(base).map(Some)
    }

    /// Attach at most one subscript and one superscript, in either order.
    fn parse_scripts(&mut self, base: ExprNode) -> Result<ExprNode> {
        Ok(match self.parse_affixes()? {
            (None, None) => base,
            (Some(sub), None) => ExprNode::subscript(unwrap_group(base), sub),
            (None, Some(sup)) => ExprNode::superscript(unwrap_group(base), sup),
            (Some(sub), Some(sup)) => ExprNode::sub_sup(unwrap_group(base), sub, sup),
        })
    }

    /// Read `_x` and `^y` affixes in either order, each at most once.
    fn parse_affixes(&mut self) -> Result<(Option<ExprNode>, Option<ExprNode>)> {
        let mut sub = None;
        let mut sup = None;

        loop {
            match self.peek_token() {
                Some(Token::Subscript) if sub.is_none() => {
                    self.lexer.next_token();
                    sub = Some(self.parse_operand()?);
                },
                Some(Token::Superscript) if sup.is_none() => {
                    self.lexer.next_token();
                    sup = Some(self.parse_operand()?);
                },
                _ => return Ok((sub, sup)),
            }
        }
    }

    /// Parse a script or fraction operand: a single atom, with a one-node
    /// group standing for its only child. Missing operands are empty groups.
    pub(super) fn parse_operand(&mut self) -> Result<ExprNode> {
        match self.peek_token() {
            None
            | Some(
                Token::CloseBrace
                | Token::Ampersand
                | Token::RowSeparator
                | Token::EndEnv(_)
                | Token::Subscript
                | Token::Superscript,
            ) => Ok(ExprNode::empty()),
            _ => Ok(self
                .parse_atom(true)?
                .map_or_else(ExprNode::empty, unwrap_group)),
        }
    }

    /// Parse a single atom. With `single_char`, digits are taken one at a
    /// time as LaTeX does for script operands.
    ///
    /// Every recursive construct passes through here, so this is where
    /// nesting depth is bounded.
    fn parse_atom(&mut self, single_char: bool) -> Result<Option<ExprNode>> {
        let Some(spanned) = self.lexer.next_token() else {
            return Ok(None);
        };
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::NestingTooDeep {
                offset: spanned.start,
                limit: MAX_DEPTH,
            });
        }

        self.depth += 1;
        let atom = self.parse_token(spanned, single_char);
        self.depth -= 1;
        atom
    }

    fn parse_token(&mut self, spanned: Spanned<'a>, single_char: bool) -> Result<Option<ExprNode>> {
        match spanned.token {
            Token::Char(c) if c.is_ascii_digit() && !single_char => {
                let mut number = String::from(c);
                while let Some(Spanned {
                    token: Token::Char(d @ ('0'..='9' | '.')),
                    ..
                }) = self.lexer.peek()
                {
                    number.push(d);
                    self.lexer.next_token();
                }
                Ok(Some(ExprNode::symbol(number)))
            },
            Token::Char(c) => Ok(Some(ExprNode::symbol(c))),
            Token::OpenBrace => {
                let children = self.parse_sequence(Stop::Brace)?;
                self.lexer.next_token();
                Ok(Some(ExprNode::group(children)))
            },
            Token::Command(name) => self.parse_command(name, spanned.start),
            Token::BeginEnv(name) => self.parse_environment(name, spanned.start).map(Some),
            Token::CloseBrace | Token::EndEnv(_) => Err(Self::unexpected_close(spanned.start)),
            Token::Ampersand | Token::RowSeparator | Token::Subscript | Token::Superscript => {
                Ok(None)
            },
        }
    }

    fn parse_command(&mut self, name: &'a str, offset: usize) -> Result<Option<ExprNode>> {
        if FRACTION_COMMANDS.contains(name) {
            let numerator = self.parse_operand()?;
            let denominator = self.parse_operand()?;
            return Ok(Some(ExprNode::fraction(numerator, denominator)));
        }

        if FUNCTION_NAMES.contains(name) {
            return self.parse_function(name).map(Some);
        }

        if name == "left" {
            let open = self.parse_delimiter();
            let children = self.parse_sequence(Stop::Right)?;
            // `\right`
            self.lexer.next_token();
            let close = self.parse_delimiter();
            return Ok(Some(ExprNode::delimited(
                open,
                close,
                ExprNode::from_children(children),
            )));
        }

        if SIZING_COMMANDS.contains(name) {
            // A `\right` without `\left` and the `\big` family only size
            // their delimiter, which stays an ordinary symbol
            if self.peek_token() == Some(Token::Char('.')) {
                self.lexer.next_token();
            }
            return Ok(None);
        }

        if let Some(space) = SPACING_COMMANDS.get(name) {
            return Ok((!space.is_empty()).then(|| ExprNode::symbol(*space)));
        }

        if let Some(c) = escaped_char(name) {
            return Ok(Some(ExprNode::symbol(c)));
        }

        if let Some(glyph) = GREEK_LETTERS.get(name) {
            return Ok(Some(ExprNode::symbol(*glyph)));
        }

        if let Some(glyph) = SYMBOL_COMMANDS.get(name) {
            return Ok(Some(ExprNode::symbol(*glyph)));
        }

        if UNSUPPORTED_COMMANDS.contains(name) {
            return Err(ParseError::UnsupportedCommand {
                offset,
                name: name.to_string(),
            });
        }

        match name {
            // `\begin` without a `{name}` argument
            "begin" => Err(ParseError::UnknownEnvironment {
                offset,
                name: String::new(),
            }),
            "end" => Err(Self::unexpected_close(offset)),
            // Unknown commands degrade to their name
            _ => Ok(Some(ExprNode::symbol(name))),
        }
    }

    /// Delimiter character after `\left` or `\right`; `.` and a missing
    /// delimiter are invisible.
    fn parse_delimiter(&mut self) -> String {
        let delimiter = match self.peek_token() {
            Some(Token::Char('.')) => String::new(),
            Some(Token::Char(c)) => c.to_string(),
            Some(Token::Command(name)) => match escaped_char(name) {
                Some(c) => c.to_string(),
                None => return String::new(),
            },
            _ => return String::new(),
        };
        self.lexer.next_token();
        delimiter
    }

    /// Parse the affixes and argument of a named function.
    ///
    /// Affixes directly after the name belong to the name (`\sin^2 x`).
    /// Call parentheses are optional; without them the argument is the next
    /// expression.
    fn parse_function(&mut self, name: &str) -> Result<ExprNode> {
        let (sub, sup) = self.parse_affixes()?;

        let argument = match self.peek_token() {
            Some(Token::Char('(')) => {
                self.lexer.next_token();
                let children = self.parse_sequence(Stop::Paren)?;
                if self.peek_token() == Some(Token::Char(')')) {
                    self.lexer.next_token();
                }
                ExprNode::from_children(children)
            },
            None
            | Some(
                Token::CloseBrace
                | Token::Ampersand
                | Token::RowSeparator
                | Token::EndEnv(_)
                | Token::Subscript
                | Token::Superscript,
            ) => ExprNode::empty(),
            _ => self
                .parse_expr()?
                .map_or_else(ExprNode::empty, unwrap_group),
        };

        Ok(ExprNode::function_with_scripts(name, sub, sup, argument))
    }
}

/// A group with exactly one child stands for that child.
fn unwrap_group(node: ExprNode) -> ExprNode {
    match node {
        ExprNode::Group { mut children } if children.len() == 1 => children.remove(0),
        other => other,
    }
}

/// `\{`, `\}`, `\|` and the other escaped characters
fn escaped_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ESCAPED_CHARS.contains(&c) => Some(c),
        _ => None,
    }
}

/// Turn `(` ... `)` pairs among siblings into `Delimited` nodes when they
/// enclose a structure, so the parentheses stretch with it. Parentheses
/// around plain symbols and unmatched ones stay literal.
fn wrap_parentheses(children: Vec<ExprNode>) -> Vec<ExprNode> {
    if !children.iter().any(|c| c.is_symbol("(")) {
        return children;
    }

    let mut root = Vec::with_capacity(children.len());
    // Siblings after each unclosed `(`, innermost last
    let mut open: Vec<Vec<ExprNode>> = Vec::new();

    for mut node in children {
        if node.is_symbol("(") {
            open.push(Vec::new());
            continue;
        }

        if !open.is_empty()
            && let Some(slot) = closing_paren(&mut node)
        {
            let inner = open.pop().unwrap_or_default();
            if inner.iter().any(|c| !matches!(c, ExprNode::Symbol { .. })) {
                *slot = ExprNode::delimited("(", ")", ExprNode::from_children(inner));
                open.last_mut().unwrap_or(&mut root).push(node);
            } else {
                let target = open.last_mut().unwrap_or(&mut root);
                target.push(ExprNode::symbol("("));
                target.extend(inner);
                target.push(node);
            }
            continue;
        }

        open.last_mut().unwrap_or(&mut root).push(node);
    }

    for inner in open {
        root.push(ExprNode::symbol("("));
        root.extend(inner);
    }
    root
}

/// The `)` a node ends with: the node itself, or the base of a script
/// written on it as in `(...)^2`.
fn closing_paren(node: &mut ExprNode) -> Option<&mut ExprNode> {
    if node.is_symbol(")") {
        return Some(node);
    }
    match node {
        ExprNode::Subscript { base, .. }
        | ExprNode::Superscript { base, .. }
        | ExprNode::SubSup { base, .. }
            if base.is_symbol(")") =>
        {
            Some(&mut **base)
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ast::MatrixKind;
    use crate::formula::latex::error::ParseErrorKind;

    fn parse(src: &str) -> Result<ExprNode> {
        Parser::new(src).parse()
    }

    fn sym(text: &str) -> ExprNode {
        ExprNode::symbol(text)
    }

    #[test]
    fn test_subscript() {
        assert_eq!(parse("x_d").unwrap(), ExprNode::subscript(sym("x"), sym("d")));
    }

    #[test]
    fn test_subsup_collapses_in_either_order() {
        let expected = ExprNode::sub_sup(sym("u"), sym("d"), sym("*"));
        assert_eq!(parse("u_d^*").unwrap(), expected);
        assert_eq!(parse("u^*_d").unwrap(), expected);
        assert_eq!(parse("u_{d}^{*}").unwrap(), expected);
    }

    #[test]
    fn test_superscript_of_greek() {
        assert_eq!(parse("α^2").unwrap(), ExprNode::superscript(sym("α"), sym("2")));
    }

    #[test]
    fn test_script_operand_takes_single_digit() {
        assert_eq!(
            parse("x^12").unwrap(),
            ExprNode::sequence(vec![ExprNode::superscript(sym("x"), sym("1")), sym("2")])
        );
    }

    #[test]
    fn test_numbers_are_grouped() {
        assert_eq!(
            parse("3.14r").unwrap(),
            ExprNode::sequence(vec![sym("3.14"), sym("r")])
        );
    }

    #[test]
    fn test_fraction() {
        assert_eq!(parse(r"\frac{a}{b}").unwrap(), ExprNode::fraction(sym("a"), sym("b")));
        assert_eq!(
            parse(r"\frac{a+b}{2}").unwrap(),
            ExprNode::fraction(ExprNode::group(vec![sym("a"), sym("+"), sym("b")]), sym("2"))
        );
        assert_eq!(parse(r"\frac12").unwrap(), ExprNode::fraction(sym("1"), sym("2")));
    }

    #[test]
    fn test_groups_are_transparent_in_sequences() {
        assert_eq!(
            parse("a{bc}d").unwrap(),
            ExprNode::sequence(vec![sym("a"), sym("b"), sym("c"), sym("d")])
        );
    }

    #[test]
    fn test_group_base_keeps_group() {
        assert_eq!(
            parse("{ab}^2").unwrap(),
            ExprNode::superscript(ExprNode::group(vec![sym("a"), sym("b")]), sym("2"))
        );
    }

    #[test]
    fn test_missing_base_and_operand() {
        assert_eq!(parse("^2").unwrap(), ExprNode::superscript(ExprNode::empty(), sym("2")));
        assert_eq!(parse("x_").unwrap(), ExprNode::subscript(sym("x"), ExprNode::empty()));
        assert_eq!(
            parse("{x_}").unwrap(),
            ExprNode::subscript(sym("x"), ExprNode::empty())
        );
    }

    #[test]
    fn test_function_with_parentheses() {
        assert_eq!(
            parse(r"\cos(ωt)").unwrap(),
            ExprNode::function("cos", ExprNode::sequence(vec![sym("ω"), sym("t")]))
        );
        assert_eq!(
            parse(r"\sin(a(b))").unwrap(),
            ExprNode::function(
                "sin",
                ExprNode::sequence(vec![sym("a"), sym("("), sym("b"), sym(")")])
            )
        );
    }

    #[test]
    fn test_function_without_parentheses() {
        assert_eq!(
            parse(r"\sin x^2").unwrap(),
            ExprNode::function("sin", ExprNode::superscript(sym("x"), sym("2")))
        );
        assert_eq!(parse(r"\ln").unwrap(), ExprNode::function("ln", ExprNode::empty()));
    }

    #[test]
    fn test_function_with_unclosed_call_parenthesis() {
        assert_eq!(
            parse(r"\sin(x").unwrap(),
            ExprNode::function("sin", sym("x"))
        );
    }

    #[test]
    fn test_sizing_commands_are_transparent() {
        assert_eq!(
            parse(r"\bigl(x\bigr)").unwrap(),
            ExprNode::sequence(vec![sym("("), sym("x"), sym(")")])
        );
        assert_eq!(parse(r"x\right.").unwrap(), sym("x"));
    }

    #[test]
    fn test_left_right_delimiters() {
        assert_eq!(
            parse(r"\left(\frac{a}{b}\right)").unwrap(),
            ExprNode::delimited("(", ")", ExprNode::fraction(sym("a"), sym("b")))
        );
        assert_eq!(
            parse(r"\left\{x\right.").unwrap(),
            ExprNode::delimited("{", "", sym("x"))
        );
        assert_eq!(
            parse(r"\left[a\left|b\right|\right]").unwrap(),
            ExprNode::delimited(
                "[",
                "]",
                ExprNode::sequence(vec![sym("a"), ExprNode::delimited("|", "|", sym("b"))])
            )
        );
    }

    #[test]
    fn test_left_without_right() {
        let err = parse(r"\left(x").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnbalancedGroup {
                offset: 7,
                reason: Imbalance::Unclosed
            }
        );
    }

    #[test]
    fn test_parentheses_around_structure_stretch() {
        assert_eq!(
            parse(r"(\frac{a}{b})").unwrap(),
            ExprNode::delimited("(", ")", ExprNode::fraction(sym("a"), sym("b")))
        );
        assert_eq!(
            parse(r"2(x_1+1)").unwrap(),
            ExprNode::sequence(vec![
                sym("2"),
                ExprNode::delimited(
                    "(",
                    ")",
                    ExprNode::sequence(vec![
                        ExprNode::subscript(sym("x"), sym("1")),
                        sym("+"),
                        sym("1"),
                    ])
                ),
            ])
        );
    }

    #[test]
    fn test_scripted_parentheses_stretch() {
        assert_eq!(
            parse(r"(\frac{1}{2})^2").unwrap(),
            ExprNode::superscript(
                ExprNode::delimited("(", ")", ExprNode::fraction(sym("1"), sym("2"))),
                sym("2")
            )
        );
    }

    #[test]
    fn test_plain_parentheses_stay_literal() {
        assert_eq!(
            parse("(a+b)").unwrap(),
            ExprNode::sequence(vec![sym("("), sym("a"), sym("+"), sym("b"), sym(")")])
        );
        assert_eq!(
            parse(r"(\frac{a}{b}").unwrap(),
            ExprNode::sequence(vec![sym("("), ExprNode::fraction(sym("a"), sym("b"))])
        );
        assert_eq!(
            parse(r"((x)\frac{a}{b})").unwrap(),
            ExprNode::delimited(
                "(",
                ")",
                ExprNode::sequence(vec![
                    sym("("),
                    sym("x"),
                    sym(")"),
                    ExprNode::fraction(sym("a"), sym("b")),
                ])
            )
        );
    }

    #[test]
    fn test_function_name_affixes() {
        assert_eq!(
            parse(r"\sin^2 x").unwrap(),
            ExprNode::function_with_scripts("sin", None, Some(sym("2")), sym("x"))
        );
        assert_eq!(
            parse(r"\cos^2(θ)").unwrap(),
            ExprNode::function_with_scripts("cos", None, Some(sym("2")), sym("θ"))
        );
        assert_eq!(
            parse(r"\log_2(n)+1").unwrap(),
            ExprNode::sequence(vec![
                ExprNode::function_with_scripts("log", Some(sym("2")), None, sym("n")),
                sym("+"),
                sym("1"),
            ])
        );
        assert_eq!(
            parse(r"\max_{i}^{n} a_i").unwrap(),
            ExprNode::function_with_scripts(
                "max",
                Some(sym("i")),
                Some(sym("n")),
                ExprNode::subscript(sym("a"), sym("i"))
            )
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}x{}", "{".repeat(3000), "}".repeat(3000));
        assert_eq!(
            parse(&deep).unwrap_err(),
            ParseError::NestingTooDeep {
                offset: MAX_DEPTH,
                limit: MAX_DEPTH
            }
        );

        let fractions = r"\frac".repeat(3000);
        assert_eq!(parse(&fractions).unwrap_err().kind(), ParseErrorKind::NestingTooDeep);

        let shallow = format!("{}x{}", "{".repeat(100), "}".repeat(100));
        assert_eq!(parse(&shallow).unwrap(), sym("x"));
    }

    #[test]
    fn test_escapes_and_spacing() {
        assert_eq!(
            parse(r"\{a\,b\!c\}").unwrap(),
            ExprNode::sequence(vec![
                sym("{"),
                sym("a"),
                sym("\u{2009}"),
                sym("b"),
                sym("c"),
                sym("}"),
            ])
        );
    }

    #[test]
    fn test_unknown_command_degrades_to_symbol() {
        assert_eq!(parse(r"\foo").unwrap(), sym("foo"));
    }

    #[test]
    fn test_unsupported_command() {
        let err = parse(r"x+\sqrt{2}").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnsupportedCommand);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse(r"\frac{a}{b").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnbalancedGroup {
                offset: 10,
                reason: Imbalance::Unclosed
            }
        );
    }

    #[test]
    fn test_unexpected_close() {
        let err = parse("a}b").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnbalancedGroup {
                offset: 1,
                reason: Imbalance::UnexpectedClose
            }
        );
        assert_eq!(parse(r"x\end{cases}").unwrap_err().offset(), 1);
    }

    #[test]
    fn test_stray_separators_outside_environment() {
        assert_eq!(
            parse(r"a&b\\c").unwrap(),
            ExprNode::sequence(vec![sym("a"), sym("b"), sym("c")])
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap(), ExprNode::sequence(Vec::new()));
        assert_eq!(parse("   ").unwrap(), ExprNode::sequence(Vec::new()));
    }

    #[test]
    fn test_nested_fraction_in_matrix() {
        let node = parse(r"\begin{pmatrix}\frac{1}{2}&0\end{pmatrix}").unwrap();
        assert_eq!(
            node,
            ExprNode::Matrix {
                kind: MatrixKind::Round,
                rows: vec![vec![ExprNode::fraction(sym("1"), sym("2")), sym("0")]],
            }
        );
    }
}
