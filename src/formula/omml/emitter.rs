// OMML emitter
//
// Walks an `ExprNode` tree and builds the equivalent `m:oMath` element tree.
// Emission cannot fail: every node has a markup form.

use super::element::Element;
use super::elements::ElementType;
use crate::config::ConvertOptions;
use crate::formula::ast::ExprNode;
use crate::formula::latex::symbols::is_greek;

/// Builds OMML element trees for parsed formulas
///
/// # Examples
///
/// ```rust
/// use latex_omml::ConvertOptions;
/// use latex_omml::formula::latex::parse_formula;
/// use latex_omml::formula::omml::OmmlEmitter;
///
/// let options = ConvertOptions::default();
/// let node = parse_formula("x_d").unwrap();
/// let math = OmmlEmitter::new(&options).emit(&node);
/// assert_eq!(math.tag(), "m:oMath");
/// assert!(math.find("m:sSub").is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OmmlEmitter<'o> {
    options: &'o ConvertOptions,
}

impl<'o> OmmlEmitter<'o> {
    pub fn new(options: &'o ConvertOptions) -> Self {
        Self { options }
    }

    /// Emit the root `m:oMath` element for a formula
    pub fn emit(&self, node: &ExprNode) -> Element {
        let mut math = Element::of(ElementType::Math);
        self.emit_into(node, &mut math);
        math
    }

    /// Emit the raw formula text as a single styled run
    ///
    /// Used when a formula cannot be parsed so the author's text still
    /// reaches the document.
    pub fn emit_fallback(&self, raw: &str) -> Element {
        let mut math = Element::of(ElementType::Math);
        if !raw.is_empty() {
            math.push(self.run(raw));
        }
        math
    }

    /// Append the markup for `node` to `parent`.
    ///
    /// Groups and sequences are flattened into the parent; every other node
    /// contributes exactly one element.
    pub fn emit_into(&self, node: &ExprNode, parent: &mut Element) {
        match node {
            ExprNode::Symbol { text } => parent.push(self.run(text)),
            ExprNode::Group { children } | ExprNode::Sequence { children } => {
                for child in children {
                    self.emit_into(child, parent);
                }
            },
            ExprNode::Subscript { base, sub } => parent.push(self.script(
                ElementType::Subscript,
                ElementType::SubscriptProperties,
                &[
                    (ElementType::Base, base.as_ref()),
                    (ElementType::SubscriptElement, sub.as_ref()),
                ],
            )),
            ExprNode::Superscript { base, sup } => parent.push(self.script(
                ElementType::Superscript,
                ElementType::SuperscriptProperties,
                &[
                    (ElementType::Base, base.as_ref()),
                    (ElementType::SuperscriptElement, sup.as_ref()),
                ],
            )),
            ExprNode::SubSup { base, sub, sup } => parent.push(self.script(
                ElementType::SubSup,
                ElementType::SubSupProperties,
                &[
                    (ElementType::Base, base.as_ref()),
                    (ElementType::SubscriptElement, sub.as_ref()),
                    (ElementType::SuperscriptElement, sup.as_ref()),
                ],
            )),
            ExprNode::Fraction {
                numerator,
                denominator,
            } => parent.push(self.script(
                ElementType::Fraction,
                ElementType::FractionProperties,
                &[
                    (ElementType::Numerator, numerator.as_ref()),
                    (ElementType::Denominator, denominator.as_ref()),
                ],
            )),
            ExprNode::Matrix { kind, rows } => {
                let matrix = self.matrix(rows, "center");
                match kind.delimiters() {
                    Some((open, close)) => parent.push(self.delimited(open, close, matrix)),
                    None => parent.push(matrix),
                }
            },
            ExprNode::Cases { rows } => {
                // Piecewise functions: left brace only
                let matrix = self.matrix(rows, "left");
                parent.push(self.delimited("{", "", matrix));
            },
            ExprNode::FunctionCall {
                name,
                sub,
                sup,
                argument,
            } => {
                parent.push(self.function_name(name, sub.as_deref(), sup.as_deref()));
                let mut body = Element::of(ElementType::Base);
                self.emit_into(argument, &mut body);
                parent.push(self.delimiter("(", ")", body));
            },
            ExprNode::Delimited { open, close, body } => {
                let mut e = Element::of(ElementType::Base);
                self.emit_into(body, &mut e);
                parent.push(self.delimiter(open, close, e));
            },
        }
    }

    /// A text run: style marker, font block, text
    fn run(&self, text: &str) -> Element {
        let options = self.options;
        let hint = if is_greek(text) {
            &options.greek_hint
        } else {
            &options.default_hint
        };

        let mut t = Element::of(ElementType::Text).with_text(text);
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            t.set_attr("xml:space", "preserve");
        }

        Element::of(ElementType::Run)
            .with_child(
                Element::of(ElementType::RunProperties).with_child(
                    Element::of(ElementType::Style).with_attr("m:val", options.math_style.as_val()),
                ),
            )
            .with_child(
                Element::of(ElementType::TextRunProperties).with_child(self.fonts(hint)),
            )
            .with_child(t)
    }

    fn fonts(&self, hint: &str) -> Element {
        Element::of(ElementType::Fonts)
            .with_attr("w:hint", hint)
            .with_attr("w:ascii", self.options.math_font.as_str())
            .with_attr("w:hAnsi", self.options.math_font.as_str())
    }

    /// Append `m:ctrlPr` when control properties are enabled
    fn close_slot(&self, mut slot: Element) -> Element {
        if self.options.control_properties {
            slot.push(
                Element::of(ElementType::ControlProperties).with_child(
                    Element::of(ElementType::TextRunProperties)
                        .with_child(self.fonts(&self.options.greek_hint)),
                ),
            );
        }
        slot
    }

    /// A structure made of a property block and named slots
    fn script(
        &self,
        kind: ElementType,
        properties: ElementType,
        slots: &[(ElementType, &ExprNode)],
    ) -> Element {
        let mut element = Element::of(kind).with_child(self.close_slot(Element::of(properties)));
        for (slot_kind, node) in slots {
            let mut slot = Element::of(*slot_kind);
            self.emit_into(node, &mut slot);
            element.push(self.close_slot(slot));
        }
        element
    }

    /// The name run of a function, inside a script structure when the name
    /// carries affixes
    fn function_name(&self, name: &str, sub: Option<&ExprNode>, sup: Option<&ExprNode>) -> Element {
        let base = ExprNode::symbol(name);
        match (sub, sup) {
            (None, None) => self.run(name),
            (Some(sub), None) => self.script(
                ElementType::Subscript,
                ElementType::SubscriptProperties,
                &[(ElementType::Base, &base), (ElementType::SubscriptElement, sub)],
            ),
            (None, Some(sup)) => self.script(
                ElementType::Superscript,
                ElementType::SuperscriptProperties,
                &[(ElementType::Base, &base), (ElementType::SuperscriptElement, sup)],
            ),
            (Some(sub), Some(sup)) => self.script(
                ElementType::SubSup,
                ElementType::SubSupProperties,
                &[
                    (ElementType::Base, &base),
                    (ElementType::SubscriptElement, sub),
                    (ElementType::SuperscriptElement, sup),
                ],
            ),
        }
    }

    /// `m:d` around a finished `m:e` body
    fn delimiter(&self, open: &str, close: &str, body: Element) -> Element {
        let properties = Element::of(ElementType::DelimiterProperties)
            .with_child(Element::of(ElementType::BeginChar).with_attr("m:val", open))
            .with_child(Element::of(ElementType::EndChar).with_attr("m:val", close));
        Element::of(ElementType::Delimiter)
            .with_child(self.close_slot(properties))
            .with_child(self.close_slot(body))
    }

    /// `m:d` whose single `m:e` holds `inner`
    fn delimited(&self, open: &str, close: &str, inner: Element) -> Element {
        self.delimiter(open, close, Element::of(ElementType::Base).with_child(inner))
    }

    /// `m:m` with one column definition per column and one `m:mr` per row
    fn matrix(&self, rows: &[Vec<ExprNode>], justification: &str) -> Element {
        let columns = rows.first().map_or(0, Vec::len);

        let column_defs = (0..columns).map(|_| {
            Element::of(ElementType::MatrixColumn).with_child(
                Element::of(ElementType::MatrixColumnProperties)
                    .with_child(Element::of(ElementType::ColumnCount).with_attr("m:val", "1"))
                    .with_child(
                        Element::of(ElementType::ColumnJustification)
                            .with_attr("m:val", justification),
                    ),
            )
        });

        let mut properties = Element::of(ElementType::MatrixProperties)
            .with_child(Element::of(ElementType::MatrixColumns).with_children(column_defs));
        if self.options.hide_placeholders {
            properties.push(Element::of(ElementType::PlaceholderHide).with_attr("m:val", "1"));
        }

        let mut matrix = Element::of(ElementType::Matrix).with_child(self.close_slot(properties));
        for row in rows {
            let mut mr = Element::of(ElementType::MatrixRow);
            for cell in row {
                let mut e = Element::of(ElementType::Base);
                self.emit_into(cell, &mut e);
                mr.push(self.close_slot(e));
            }
            matrix.push(mr);
        }
        matrix
    }
}
