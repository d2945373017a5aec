// Formula Module - LaTeX to OMML conversion
//
// A formula runs through three stages:
//
// - **Normalizer**: Greek and symbol commands become Unicode glyphs
// - **Parser**: recursive descent over the normalized text into an `ExprNode` tree
// - **Emitter**: the tree becomes an `m:oMath` element tree
//
// `convert` never fails: a formula that does not parse is written as its raw
// text in a single run and a `FormulaWarning` is returned alongside.
//
// # Example
//
// ```
// use latex_omml::ConvertOptions;
// use latex_omml::formula::convert;
//
// let output = convert(r"u_d^*", &ConvertOptions::default());
// assert!(output.warning.is_none());
// assert!(output.element.find("m:sSubSup").is_some());
// ```

/// Expression tree produced by the parser
pub mod ast;
/// LaTeX normalizer, lexer and parser
pub mod latex;
/// OMML element trees, emitter and XML writer
pub mod omml;

pub use ast::{ExprNode, MatrixKind};
pub use latex::{ParseError, ParseErrorKind, parse_formula};
pub use omml::{Element, OmmlEmitter};

use crate::config::ConvertOptions;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A formula that could not be converted and was written as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaWarning {
    /// The formula as written by the author
    pub formula: String,
    /// Why it was rejected
    pub error: ParseError,
}

impl fmt::Display for FormulaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "formula '{}' kept as plain text: {}", self.formula, self.error)
    }
}

/// Result of converting one formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaOutput {
    /// Root `m:oMath` element
    pub element: Element,
    /// Set when the formula fell back to plain text
    pub warning: Option<FormulaWarning>,
}

impl FormulaOutput {
    /// Whether the formula was converted without falling back
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }
}

/// Convert a formula body (delimiters already stripped) to an `m:oMath` element.
///
/// Error offsets are character offsets into `raw`.
pub fn try_convert(raw: &str, options: &ConvertOptions) -> Result<Element, ParseError> {
    let node = parse_formula(raw)?;
    Ok(OmmlEmitter::new(options).emit(&node))
}

/// Convert a formula, falling back to its raw text when it cannot be parsed.
///
/// Empty and whitespace-only formulas produce an empty `m:oMath`.
pub fn convert(raw: &str, options: &ConvertOptions) -> FormulaOutput {
    match try_convert(raw, options) {
        Ok(element) => FormulaOutput {
            element,
            warning: None,
        },
        Err(error) => {
            let formula = raw.trim();
            FormulaOutput {
                element: OmmlEmitter::new(options).emit_fallback(formula),
                warning: Some(FormulaWarning {
                    formula: formula.to_string(),
                    error,
                }),
            }
        },
    }
}

/// Convert a batch of independent formulas.
///
/// Outputs are in the same order as `formulas`. With the `parallel` feature
/// the formulas are converted on the rayon thread pool.
pub fn convert_all<S>(formulas: &[S], options: &ConvertOptions) -> Vec<FormulaOutput>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        formulas
            .par_iter()
            .map(|raw| convert(raw.as_ref(), options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        formulas
            .iter()
            .map(|raw| convert(raw.as_ref(), options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::latex::Imbalance;

    fn options() -> ConvertOptions {
        ConvertOptions::default()
    }

    fn texts(element: &Element) -> Vec<&str> {
        element
            .descendants_named("m:t")
            .into_iter()
            .filter_map(Element::text)
            .collect()
    }

    #[test]
    fn test_scenario_subscript() {
        let output = convert("x_d", &options());
        assert!(output.is_clean());
        let ssub = output.element.find("m:sSub").unwrap();
        assert_eq!(texts(ssub), ["x", "d"]);
    }

    #[test]
    fn test_scenario_subsup() {
        let output = convert("u_d^*", &options());
        assert_eq!(output.element.children().len(), 1);
        assert_eq!(texts(&output.element), ["u", "d", "*"]);
        assert!(output.element.find("m:sSubSup").is_some());
    }

    #[test]
    fn test_scenario_fraction() {
        let output = convert(r"\frac{a}{b}", &options());
        let f = output.element.find("m:f").unwrap();
        assert_eq!(texts(f.find("m:num").unwrap()), ["a"]);
        assert_eq!(texts(f.find("m:den").unwrap()), ["b"]);
    }

    #[test]
    fn test_scenario_bmatrix() {
        let output = convert(r"\begin{bmatrix}a&b\\c&d\end{bmatrix}", &options());
        let m = output.element.find_path(&["m:d", "m:e", "m:m"]).unwrap();
        assert_eq!(m.children_named("m:mr").count(), 2);
        assert_eq!(texts(m), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_scenario_greek_superscript() {
        let output = convert(r"\alpha^2", &options());
        let ssup = output.element.find("m:sSup").unwrap();
        assert_eq!(texts(ssup), ["α", "2"]);
    }

    #[test]
    fn test_scenario_unclosed_fraction_falls_back() {
        let raw = r"\frac{a}{b";
        assert_eq!(
            try_convert(raw, &options()).unwrap_err(),
            ParseError::UnbalancedGroup {
                offset: 10,
                reason: Imbalance::Unclosed
            }
        );

        let output = convert(raw, &options());
        let warning = output.warning.as_ref().unwrap();
        assert_eq!(warning.formula, raw);
        assert_eq!(warning.error.offset(), 10);
        assert!(warning.to_string().contains("offset 10"));

        assert_eq!(output.element.children().len(), 1);
        assert_eq!(texts(&output.element), [raw]);
    }

    #[test]
    fn test_empty_formula() {
        for raw in ["", "   "] {
            let output = convert(raw, &options());
            assert!(output.is_clean());
            assert_eq!(output.element.tag(), "m:oMath");
            assert!(output.element.children().is_empty());
        }
    }

    #[test]
    fn test_offsets_include_leading_whitespace() {
        let err = try_convert(r"  x+\sqrt{2}", &options()).unwrap_err();
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_deep_nesting_falls_back() {
        let raw = format!("{}x{}", "{".repeat(3000), "}".repeat(3000));
        let output = convert(&raw, &options());
        let warning = output.warning.as_ref().unwrap();
        assert_eq!(warning.error.kind(), ParseErrorKind::NestingTooDeep);
        assert_eq!(warning.error.offset(), latex::MAX_DEPTH);
        assert_eq!(output.element.children().len(), 1);
        assert_eq!(texts(&output.element), [raw.as_str()]);
    }

    #[test]
    fn test_function_power_keeps_argument() {
        let output = convert(r"\cos^2(\theta)", &options());
        assert!(output.is_clean());
        let tags: Vec<_> = output.element.children().iter().map(Element::tag).collect();
        assert_eq!(tags, ["m:sSup", "m:d"]);
        assert_eq!(texts(output.element.find("m:sSup").unwrap()), ["cos", "2"]);
        assert_eq!(texts(output.element.find("m:d").unwrap()), ["θ"]);
    }

    #[test]
    fn test_stretchy_delimiters() {
        let output = convert(r"\left(\frac{a}{b}\right)", &options());
        let tags: Vec<_> = output.element.children().iter().map(Element::tag).collect();
        assert_eq!(tags, ["m:d"]);
        assert!(output.element.find_path(&["m:d", "m:e", "m:f"]).is_some());
    }

    #[test]
    fn test_convert_all_keeps_order() {
        let formulas = ["x_1", r"\frac{1}{", r"\beta", "", r"\begin{cases}a&b\end{cases}"];
        let outputs = convert_all(&formulas, &options());
        assert_eq!(outputs.len(), formulas.len());
        assert!(outputs[0].element.find("m:sSub").is_some());
        assert!(outputs[1].warning.is_some());
        assert_eq!(texts(&outputs[2].element), ["β"]);
        assert!(outputs[3].element.children().is_empty());
        assert!(outputs[4].element.find("m:d").is_some());
        // a failure does not leak into its neighbours
        assert_eq!(outputs.iter().filter(|o| !o.is_clean()).count(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Strategy for formulas whose braces and environments are balanced
        fn balanced_formula() -> impl Strategy<Value = String> {
            let leaf = prop_oneof![
                "[a-z]".prop_map(String::from),
                "[0-9]{1,3}".prop_map(String::from),
                Just("+".to_string()),
                Just("=".to_string()),
                Just(r"\alpha".to_string()),
                Just(r"\cdot".to_string()),
            ];
            leaf.prop_recursive(4, 32, 3, |inner| {
                prop_oneof![
                    inner.clone().prop_map(|s| format!("{{{s}}}")),
                    (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a} {b}")),
                    (inner.clone(), inner.clone()).prop_map(|(a, b)| format!(r"\frac{{{a}}}{{{b}}}")),
                    (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{{{a}}}_{{{b}}}")),
                    inner.clone().prop_map(|s| format!(r"\sin({s})")),
                    inner.prop_map(|s| format!(r"\begin{{pmatrix}}{s}\end{{pmatrix}}")),
                ]
            })
        }

        fn count_subsup(node: &ExprNode) -> usize {
            let mut count = 0;
            node.walk(&mut |n| {
                if matches!(n, ExprNode::SubSup { .. }) {
                    count += 1;
                }
            });
            count
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_balanced_formulas_parse(formula in balanced_formula()) {
                let result = parse_formula(&formula);
                prop_assert!(result.is_ok(), "{formula:?} failed: {:?}", result.err());
            }

            #[test]
            fn prop_scripts_collapse_to_one_subsup(
                base in "[a-z]",
                sub in "[a-z0-9]{1,3}",
                sup in "[a-z0-9*]{1,3}",
                sub_first in any::<bool>(),
            ) {
                let formula = if sub_first {
                    format!("{base}_{{{sub}}}^{{{sup}}}")
                } else {
                    format!("{base}^{{{sup}}}_{{{sub}}}")
                };
                let node = parse_formula(&formula).unwrap();
                let is_subsup = matches!(node, ExprNode::SubSup { .. });
                prop_assert!(is_subsup);
                prop_assert_eq!(count_subsup(&node), 1);
            }

            #[test]
            fn prop_matrix_rows_match_columns(
                rows in 1usize..5,
                cols in 1usize..5,
                cell in "[a-z]",
            ) {
                let body = (0..rows)
                    .map(|_| vec![cell.as_str(); cols].join("&"))
                    .collect::<Vec<_>>()
                    .join(r"\\");
                let formula = format!(r"\begin{{bmatrix}}{body}\end{{bmatrix}}");
                let output = convert(&formula, &ConvertOptions::default());
                prop_assert!(output.is_clean());

                let m = output.element.find_path(&["m:d", "m:e", "m:m"]).unwrap();
                let mcs = m.find_path(&["m:mPr", "m:mcs"]).unwrap();
                prop_assert_eq!(mcs.children_named("m:mc").count(), cols);
                prop_assert_eq!(m.children_named("m:mr").count(), rows);
                for row in m.children_named("m:mr") {
                    prop_assert_eq!(row.children_named("m:e").count(), cols);
                }
            }

            #[test]
            fn prop_ragged_matrix_is_rejected(cols in 2usize..5, short in 1usize..2) {
                let formula = format!(
                    r"\begin{{matrix}}{}\\{}\end{{matrix}}",
                    vec!["a"; cols].join("&"),
                    vec!["b"; short].join("&"),
                );
                let err = parse_formula(&formula).unwrap_err();
                prop_assert_eq!(err.kind(), ParseErrorKind::UnequalColumns);
            }

            #[test]
            fn prop_emission_is_idempotent(formula in balanced_formula()) {
                let node = parse_formula(&formula).unwrap();
                let options = ConvertOptions::default();
                let emitter = OmmlEmitter::new(&options);
                prop_assert_eq!(emitter.emit(&node), emitter.emit(&node));
            }

            #[test]
            fn prop_convert_never_panics(raw in "\\PC{0,40}") {
                let output = convert(&raw, &ConvertOptions::default());
                prop_assert_eq!(output.element.tag(), "m:oMath");
                if output.warning.is_some() {
                    prop_assert_eq!(output.element.children().len(), 1);
                    prop_assert_eq!(texts(&output.element), vec![raw.trim()]);
                }
            }
        }
    }
}
