//! Largest-font-size-that-fits search under a width budget.

use crate::metrics::is_overflowing;

/// Result of a font-size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFit {
    /// Chosen size in pixels, always within the requested range.
    pub size: u32,
    /// True when the chosen size is below the requested maximum, including
    /// the exhausted case where even the minimum still overflows.
    pub adjusted: bool,
}

/// Finds the largest font size in `[min_size, max_size]` at which `text`
/// does not overflow `max_width_px`.
///
/// Scans candidates from `max_size` downward in unit steps and takes the
/// first fit, so the largest fitting size wins. The solver never fails:
/// when even `min_size` overflows it returns `(min_size, adjusted = true)`
/// and leaves the overflow re-check to the caller. Empty text
/// short-circuits to `(max_size, adjusted = false)`. An inverted range
/// collapses to the single candidate `min_size`.
pub fn solve_font_size(text: &str, max_width_px: f32, min_size: u32, max_size: u32) -> FontFit {
    let max_size = max_size.max(min_size);
    if text.is_empty() {
        return FontFit {
            size: max_size,
            adjusted: false,
        };
    }

    for size in (min_size..=max_size).rev() {
        if !is_overflowing(text, size, max_width_px) {
            return FontFit {
                size,
                adjusted: size < max_size,
            };
        }
    }

    FontFit {
        size: min_size,
        adjusted: true,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
