//! Text width estimation from coarse character classes.
//!
//! This is an intentional approximation — no font files, no kerning, no
//! locale data. Each code point contributes `font_size * factor` where the
//! factor depends on its class: CJK ideographs render roughly square,
//! Latin letters a bit over half an em, digits slightly wider, punctuation
//! narrower. The constants over/under-estimate real glyph metrics in
//! exchange for determinism and a closed-form, allocation-free computation.

// ────────────────────────────────────────────────────────────────────────────
// Character classes
// ────────────────────────────────────────────────────────────────────────────

/// The four character classes the estimator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// CJK unified ideograph (U+4E00..=U+9FFF) — rendered full-width.
    Cjk,
    /// Any other alphabetic code point.
    Alphabetic,
    /// Numeric code point.
    Digit,
    /// Everything else: punctuation, whitespace, symbols.
    Symbol,
}

impl CharClass {
    /// Classifies a single code point.
    ///
    /// The CJK range check runs before the alphabetic test: ideographs are
    /// alphabetic to Unicode but must take the full-width factor.
    pub fn of(c: char) -> Self {
        if ('\u{4e00}'..='\u{9fff}').contains(&c) {
            CharClass::Cjk
        } else if c.is_alphabetic() {
            CharClass::Alphabetic
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Symbol
        }
    }

    /// Estimated glyph width as a fraction of the font size.
    pub fn width_factor(self) -> f32 {
        match self {
            CharClass::Cjk => 1.0,
            CharClass::Alphabetic => 0.55,
            CharClass::Digit => 0.6,
            CharClass::Symbol => 0.4,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Width estimation
// ────────────────────────────────────────────────────────────────────────────

/// Estimates the rendered pixel width of `text` at `font_size_px`.
///
/// Empty text measures 0.0. Linear in the font size for fixed text.
pub fn estimate_width(text: &str, font_size_px: u32) -> f32 {
    text.chars()
        .map(|c| font_size_px as f32 * CharClass::of(c).width_factor())
        .sum()
}

/// True if the estimated width of `text` exceeds `max_width_px`.
pub fn is_overflowing(text: &str, font_size_px: u32, max_width_px: f32) -> bool {
    estimate_width(text, font_size_px) > max_width_px
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
