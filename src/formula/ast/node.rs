// Expression node definitions

/// Bracket style of a matrix environment.
///
/// The kind fixes the delimiter pair the emitter wraps around the matrix
/// body. `Brace` follows the piecewise convention: only the left `{` is
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    Square, // [ ]
    Round,  // ( )
    Brace,  // {
    None,   // no delimiter
}

impl MatrixKind {
    /// Opening and closing delimiter characters, or `None` for a bare matrix.
    ///
    /// An empty closing string means the delimiter is left-only.
    #[inline]
    pub fn delimiters(self) -> Option<(&'static str, &'static str)> {
        match self {
            MatrixKind::Square => Some(("[", "]")),
            MatrixKind::Round => Some(("(", ")")),
            MatrixKind::Brace => Some(("{", "")),
            MatrixKind::None => None,
        }
    }
}

/// Expression node produced by the LaTeX parser.
///
/// Every variant owns its children; a tree is built fresh for each formula
/// and handed to the emitter read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    /// Literal glyph, identifier or number
    Symbol { text: String },

    /// Brace-delimited sub-expression
    Group { children: Vec<ExprNode> },

    /// `base_sub`
    Subscript {
        base: Box<ExprNode>,
        sub: Box<ExprNode>,
    },

    /// `base^sup`
    Superscript {
        base: Box<ExprNode>,
        sup: Box<ExprNode>,
    },

    /// `base_sub^sup` or `base^sup_sub`, always a single node
    SubSup {
        base: Box<ExprNode>,
        sub: Box<ExprNode>,
        sup: Box<ExprNode>,
    },

    /// `\frac{numerator}{denominator}`
    Fraction {
        numerator: Box<ExprNode>,
        denominator: Box<ExprNode>,
    },

    /// Matrix environment; every row has the same number of cells
    Matrix {
        kind: MatrixKind,
        rows: Vec<Vec<ExprNode>>,
    },

    /// `cases` environment; every row has the same number of cells
    Cases { rows: Vec<Vec<ExprNode>> },

    /// Named function such as `\sin`
    ///
    /// `sub` and `sup` are affixes written on the name itself, as in
    /// `\sin^2 x` or `\log_2(n)`.
    FunctionCall {
        name: String,
        sub: Option<Box<ExprNode>>,
        sup: Option<Box<ExprNode>>,
        argument: Box<ExprNode>,
    },

    /// Stretchy delimiter pair around a body, from `\left X ... \right Y`
    /// or parentheses enclosing a structure. An empty string is an
    /// invisible delimiter.
    Delimited {
        open: String,
        close: String,
        body: Box<ExprNode>,
    },

    /// Ordered siblings
    Sequence { children: Vec<ExprNode> },
}

impl ExprNode {
    /// Create a symbol node
    pub fn symbol(text: impl Into<String>) -> Self {
        ExprNode::Symbol { text: text.into() }
    }

    /// Create a group node
    pub fn group(children: Vec<ExprNode>) -> Self {
        ExprNode::Group { children }
    }

    /// Create a sequence node
    pub fn sequence(children: Vec<ExprNode>) -> Self {
        ExprNode::Sequence { children }
    }

    /// Create an empty group, used for missing bases and operands
    pub fn empty() -> Self {
        ExprNode::Group {
            children: Vec::new(),
        }
    }

    /// Create a subscript node
    pub fn subscript(base: ExprNode, sub: ExprNode) -> Self {
        ExprNode::Subscript {
            base: Box::new(base),
            sub: Box::new(sub),
        }
    }

    /// Create a superscript node
    pub fn superscript(base: ExprNode, sup: ExprNode) -> Self {
        ExprNode::Superscript {
            base: Box::new(base),
            sup: Box::new(sup),
        }
    }

    /// Create a combined subscript/superscript node
    pub fn sub_sup(base: ExprNode, sub: ExprNode, sup: ExprNode) -> Self {
        ExprNode::SubSup {
            base: Box::new(base),
            sub: Box::new(sub),
            sup: Box::new(sup),
        }
    }

    /// Create a fraction node
    pub fn fraction(numerator: ExprNode, denominator: ExprNode) -> Self {
        ExprNode::Fraction {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }
    }

    /// Create a function call node
    pub fn function(name: impl Into<String>, argument: ExprNode) -> Self {
        ExprNode::FunctionCall {
            name: name.into(),
            sub: None,
            sup: None,
            argument: Box::new(argument),
        }
    }

    /// Create a function call whose name carries affixes
    pub fn function_with_scripts(
        name: impl Into<String>,
        sub: Option<ExprNode>,
        sup: Option<ExprNode>,
        argument: ExprNode,
    ) -> Self {
        ExprNode::FunctionCall {
            name: name.into(),
            sub: sub.map(Box::new),
            sup: sup.map(Box::new),
            argument: Box::new(argument),
        }
    }

    /// Create a delimited node
    pub fn delimited(open: impl Into<String>, close: impl Into<String>, body: ExprNode) -> Self {
        ExprNode::Delimited {
            open: open.into(),
            close: close.into(),
            body: Box::new(body),
        }
    }

    /// Whether this node is the symbol `text`
    #[inline]
    pub fn is_symbol(&self, text: &str) -> bool {
        matches!(self, ExprNode::Symbol { text: t } if t == text)
    }

    /// Collapse a list of parsed nodes into one operand.
    ///
    /// A single node stands for itself; anything else becomes a sequence.
    pub fn from_children(mut children: Vec<ExprNode>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            ExprNode::Sequence { children }
        }
    }

    /// Whether this node is a group or sequence without children
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            ExprNode::Group { children } | ExprNode::Sequence { children } => {
                children.is_empty()
            },
            _ => false,
        }
    }

    /// Number of cells per row for matrix-like nodes
    pub fn column_count(&self) -> Option<usize> {
        match self {
            ExprNode::Matrix { rows, .. } | ExprNode::Cases { rows } => {
                Some(rows.first().map_or(0, Vec::len))
            },
            _ => None,
        }
    }

    /// Visit this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ExprNode)) {
        visit(self);
        match self {
            ExprNode::Symbol { .. } => {},
            ExprNode::Group { children } | ExprNode::Sequence { children } => {
                for child in children {
                    child.walk(visit);
                }
            },
            ExprNode::Subscript { base, sub } => {
                base.walk(visit);
                sub.walk(visit);
            },
            ExprNode::Superscript { base, sup } => {
                base.walk(visit);
                sup.walk(visit);
            },
            ExprNode::SubSup { base, sub, sup } => {
                base.walk(visit);
                sub.walk(visit);
                sup.walk(visit);
            },
            ExprNode::Fraction {
                numerator,
                denominator,
            } => {
                numerator.walk(visit);
                denominator.walk(visit);
            },
            ExprNode::Matrix { rows, .. } | ExprNode::Cases { rows } => {
                for cell in rows.iter().flatten() {
                    cell.walk(visit);
                }
            },
            ExprNode::FunctionCall {
                sub, sup, argument, ..
            } => {
                for affix in [sub, sup].into_iter().flatten() {
                    affix.walk(visit);
                }
                argument.walk(visit);
            },
            ExprNode::Delimited { body, .. } => body.walk(visit),
        }
    }
}
