//! Cleanup of Word-specific math characters and conversion of common Unicode
//! symbols to their LaTeX equivalents.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal symbol -> macro substitutions, applied in table order. Replacement
/// text starts with `\`, which no earlier rule matches, so a single pass is
/// stable. Trailing spaces are part of the macro text (`\sqrt` takes braces,
/// the rest stand alone).
const SYMBOL_TABLE: &[(char, &str)] = &[
    ('∑', "\\sum "),
    ('√', "\\sqrt"),
    ('∫', "\\int "),
    ('∆', "\\Delta "),
    ('δ', "\\delta "),
    ('α', "\\alpha "),
    ('β', "\\beta "),
    ('γ', "\\gamma "),
    ('π', "\\pi "),
    ('∞', "\\infty "),
    ('±', "\\pm "),
    ('×', "\\times "),
    ('÷', "\\div "),
    ('≈', "\\approx "),
    ('≠', "\\neq "),
    ('≤', "\\le "),
    ('≥', "\\ge "),
    ('→', "\\to "),
    ('λ', "\\lambda "),
    ('σ', "\\sigma "),
    ('μ', "\\mu "),
    ('η', "\\eta "),
    ('ρ', "\\rho "),
    ('θ', "\\theta "),
    ('φ', "\\phi "),
    ('ω', "\\omega "),
    ('Ω', "\\Omega "),
];

// Combining macron / circumflex following a letter or digit.
static BAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new("([a-zA-Z0-9])\u{0304}").expect("valid macron pattern"));
static HAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new("([a-zA-Z0-9])\u{0302}").expect("valid circumflex pattern"));

/// Normalize one text fragment. Total: empty input yields empty output, and
/// the steps run in a fixed order so later ones cannot re-trigger earlier ones.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Word's "garbage" shading glyphs used to linearize formulas
    let mut out = text
        .replace('\u{2592}', "")
        .replace('\u{2591}', "")
        .replace('\u{2593}', "");

    // Word's wide grouping brackets become LaTeX braces
    out = out.replace('\u{3016}', "{").replace('\u{3017}', "}");

    // X̄ -> \bar{X}, X̂ -> \hat{X}
    out = BAR_RE.replace_all(&out, "\\bar{${1}}").into_owned();
    out = HAT_RE.replace_all(&out, "\\hat{${1}}").into_owned();

    for (symbol, latex) in SYMBOL_TABLE {
        if out.contains(*symbol) {
            out = out.replace(*symbol, latex);
        }
    }

    out
}
