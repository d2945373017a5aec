// Command lookup tables
//
// Compile-time perfect hash tables for the LaTeX commands the converter
// understands. All tables are read-only and shared by every conversion.

use phf::{phf_map, phf_set};

/// Greek letter commands and their Unicode glyphs
pub static GREEK_LETTERS: phf::Map<&'static str, char> = phf_map! {
    // Lowercase Greek
    "alpha" => 'α',
    "beta" => 'β',
    "gamma" => 'γ',
    "delta" => 'δ',
    // Lunate ϵ is LaTeX's \epsilon glyph; documents expect the open ε
    "epsilon" => 'ε',
    "zeta" => 'ζ',
    "eta" => 'η',
    "theta" => 'θ',
    "iota" => 'ι',
    "kappa" => 'κ',
    "lambda" => 'λ',
    "mu" => 'μ',
    "nu" => 'ν',
    "xi" => 'ξ',
    "omicron" => 'ο',
    "pi" => 'π',
    "rho" => 'ρ',
    "sigma" => 'σ',
    "tau" => 'τ',
    "upsilon" => 'υ',
    "phi" => 'φ',
    "chi" => 'χ',
    "psi" => 'ψ',
    "omega" => 'ω',

    // Variants
    "varepsilon" => 'ϵ', // swapped with \epsilon, see above
    "vartheta" => 'ϑ',
    "varphi" => 'ϕ',
    "varpi" => 'ϖ',
    "varrho" => 'ϱ',
    "varsigma" => 'ς',

    // Uppercase Greek
    "Gamma" => 'Γ',
    "Delta" => 'Δ',
    "Theta" => 'Θ',
    "Lambda" => 'Λ',
    "Xi" => 'Ξ',
    "Pi" => 'Π',
    "Sigma" => 'Σ',
    "Upsilon" => 'Υ',
    "Phi" => 'Φ',
    "Psi" => 'Ψ',
    "Omega" => 'Ω',
};

/// Simple symbol commands rewritten to a single glyph
pub static SYMBOL_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    // Arithmetic
    "cdot" => "⋅",
    "times" => "×",
    "div" => "÷",
    "pm" => "±",
    "mp" => "∓",
    "ast" => "∗",
    "star" => "⋆",
    "circ" => "∘",
    "bullet" => "∙",

    // Relations
    "leq" => "≤",
    "le" => "≤",
    "geq" => "≥",
    "ge" => "≥",
    "neq" => "≠",
    "ne" => "≠",
    "approx" => "≈",
    "equiv" => "≡",
    "sim" => "∼",
    "simeq" => "≃",
    "cong" => "≅",
    "propto" => "∝",
    "ll" => "≪",
    "gg" => "≫",
    "parallel" => "∥",
    "perp" => "⊥",

    // Sets and logic
    "in" => "∈",
    "notin" => "∉",
    "subset" => "⊂",
    "supset" => "⊃",
    "subseteq" => "⊆",
    "supseteq" => "⊇",
    "cup" => "∪",
    "cap" => "∩",
    "emptyset" => "∅",
    "forall" => "∀",
    "exists" => "∃",
    "neg" => "¬",
    "land" => "∧",
    "lor" => "∨",

    // Calculus and misc
    "infty" => "∞",
    "partial" => "∂",
    "nabla" => "∇",
    "angle" => "∠",
    "degree" => "°",
    "prime" => "′",
    "hbar" => "ℏ",
    "ell" => "ℓ",

    // Dots
    "ldots" => "…",
    "cdots" => "⋯",
    "vdots" => "⋮",
    "ddots" => "⋱",

    // Arrows
    "to" => "→",
    "rightarrow" => "→",
    "leftarrow" => "←",
    "gets" => "←",
    "leftrightarrow" => "↔",
    "Rightarrow" => "⇒",
    "Leftarrow" => "⇐",
    "Leftrightarrow" => "⇔",
    "uparrow" => "↑",
    "downarrow" => "↓",
    "mapsto" => "↦",
};

/// Spacing commands; an empty value drops the command
pub static SPACING_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "," => "\u{2009}",
    ":" => "\u{205F}",
    ";" => "\u{2005}",
    " " => " ",
    "quad" => "\u{2003}",
    "qquad" => "\u{2003}\u{2003}",
    "!" => "",
};

/// Characters that may be escaped with a backslash to appear literally
pub static ESCAPED_CHARS: phf::Set<char> = phf_set! {
    '{', '}', '%', '$', '&', '#', '_', '|',
};

/// Named functions rendered as upright name plus parenthesized argument
pub static FUNCTION_NAMES: phf::Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth",
    "log", "ln", "lg", "exp",
    "det", "dim", "ker", "max", "min", "sup", "inf",
    "arg", "deg", "gcd", "hom",
};

/// Fraction commands taking two arguments
pub static FRACTION_COMMANDS: phf::Set<&'static str> = phf_set! {
    "frac", "dfrac", "tfrac",
};

/// Delimiter sizing commands; transparent for layout purposes
pub static SIZING_COMMANDS: phf::Set<&'static str> = phf_set! {
    "left", "right",
    "big", "Big", "bigg", "Bigg",
    "bigl", "Bigl", "biggl", "Biggl",
    "bigr", "Bigr", "biggr", "Biggr",
};

/// Commands recognized as LaTeX but without an OMML mapping
pub static UNSUPPORTED_COMMANDS: phf::Set<&'static str> = phf_set! {
    "sqrt", "sum", "prod", "int", "iint", "oint", "lim",
    "hat", "bar", "vec", "dot", "ddot", "tilde", "widehat", "widetilde",
    "overline", "underline", "overbrace", "underbrace",
    "mathbf", "mathrm", "mathit", "mathcal", "mathbb", "boldsymbol",
    "text", "textrm", "operatorname",
    "binom", "stackrel", "overset", "underset",
};

/// Whether the text consists solely of Greek glyphs
///
/// Greek runs are emitted with the East Asian font hint.
pub fn is_greek(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| matches!(c, '\u{0391}'..='\u{03A9}' | '\u{03B1}'..='\u{03C9}' | 'ϵ' | 'ϑ' | 'ϕ' | 'ϖ' | 'ϱ'))
}
