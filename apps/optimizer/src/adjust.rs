//! Rule engine that derives an optimized configuration from document stats.
//!
//! Pure: identical `(baseline, stats)` always yields the identical
//! `(config, log)` pair, and the baseline is never mutated — every pass
//! starts from its own clone. Rules apply in a fixed order; later rules may
//! overwrite fields set earlier but never read them back, which also makes
//! a second pass over an already-adjusted config a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::DocumentStats;
use crate::config::{GridLayout, KpiCardLayout, LayoutConfig, PageLayout};
use crate::solver::solve_font_size;

/// Font-size search bounds for KPI values.
const KPI_VALUE_FONT_MIN: u32 = 18;
const KPI_VALUE_FONT_MAX: u32 = 32;
/// Ceiling applied preemptively when a KPI value is long but still fits.
const KPI_VALUE_FONT_PRECAUTION: u32 = 28;
/// Value length beyond which the precautionary ceiling kicks in.
const KPI_VALUE_LONG_CHARS: usize = 10;
/// Block count beyond which the page typography is shrunk.
const DENSE_DOCUMENT_BLOCKS: usize = 20;

/// Usable width of one KPI card at the 2-column baseline: reference content
/// width minus the grid gap, split in two, minus padding on both sides.
/// Computed from default geometry so repeated adjustment passes see the
/// same budget regardless of what earlier rules did to the padding.
fn kpi_card_usable_width() -> f32 {
    let page = PageLayout::default();
    let grid = GridLayout::default();
    let card = KpiCardLayout::default();
    (page.max_content_width - grid.gap) as f32 / 2.0 - (2 * card.padding) as f32
}

/// A write-once record of one optimization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationLogEntry {
    pub timestamp: DateTime<Utc>,
    pub document_stats: DocumentStats,
    /// Human-readable adjustment descriptions, in rule order.
    pub optimizations: Vec<String>,
    pub final_config: LayoutConfig,
}

impl OptimizationLogEntry {
    pub fn new(
        document_stats: DocumentStats,
        optimizations: Vec<String>,
        final_config: LayoutConfig,
    ) -> Self {
        OptimizationLogEntry {
            timestamp: Utc::now(),
            document_stats,
            optimizations,
            final_config,
        }
    }
}

/// Derives an optimized configuration from `baseline` and `stats`.
///
/// Returns the new configuration plus one descriptive log line per rule
/// that fired. Rules not triggered leave their fields at baseline values.
pub fn adjust_config(baseline: &LayoutConfig, stats: &DocumentStats) -> (LayoutConfig, Vec<String>) {
    let mut config = baseline.clone();
    let mut log = Vec::new();

    // KPI value font size against the card width budget. A synthetic digit
    // string of the observed maximum length stands in for the widest value.
    if stats.max_kpi_value_length > 0 {
        let sample = "9".repeat(stats.max_kpi_value_length);
        let fit = solve_font_size(
            &sample,
            kpi_card_usable_width(),
            KPI_VALUE_FONT_MIN,
            KPI_VALUE_FONT_MAX,
        );
        if fit.adjusted {
            config.kpi_card.font_size_value = fit.size;
            log.push(format!(
                "KPI value is long ({} chars); value font size reduced to {}px to prevent overflow",
                stats.max_kpi_value_length, fit.size
            ));
        } else if stats.max_kpi_value_length > KPI_VALUE_LONG_CHARS {
            config.kpi_card.font_size_value = fit.size.min(KPI_VALUE_FONT_PRECAUTION);
            log.push(format!(
                "KPI value is long ({} chars); value font size preemptively set to {}px",
                stats.max_kpi_value_length, config.kpi_card.font_size_value
            ));
        }
    }

    // Grid columns and card padding by KPI count.
    if stats.kpi_count > 6 {
        config.grid.columns = 3;
        config.kpi_card.min_height = 100;
        config.kpi_card.padding = 16;
        log.push(format!(
            "many KPI cards ({}); switched to a 3-column grid with tighter padding",
            stats.kpi_count
        ));
    } else if stats.kpi_count > 4 {
        config.grid.columns = 2;
        config.kpi_card.padding = 18;
        log.push(format!(
            "moderate KPI card count ({}); using a 2-column grid",
            stats.kpi_count
        ));
    } else if stats.kpi_count <= 2 {
        config.grid.columns = 1;
        config.kpi_card.padding = 24;
        log.push(format!(
            "few KPI cards ({}); single-column grid with wider padding",
            stats.kpi_count
        ));
    }

    // Table typography by the widest table.
    if stats.max_table_columns > 8 {
        config.table.font_size_header = 10;
        config.table.font_size_body = 9;
        config.table.cell_padding = 6;
        log.push(format!(
            "very wide table ({} columns); table font sizes and cell padding sharply reduced",
            stats.max_table_columns
        ));
    } else if stats.max_table_columns > 6 {
        config.table.font_size_header = 11;
        config.table.font_size_body = 10;
        config.table.cell_padding = 8;
        log.push(format!(
            "wide table ({} columns); table font sizes and cell padding reduced",
            stats.max_table_columns
        ));
    } else if stats.max_table_columns > 4 {
        config.table.font_size_header = 12;
        config.table.font_size_body = 11;
        config.table.cell_padding = 10;
        log.push(format!(
            "moderately wide table ({} columns); table font sizes slightly reduced",
            stats.max_table_columns
        ));
    }

    // Long text: open up line height and paragraph spacing.
    if stats.has_long_text {
        config.page.line_height = 1.8;
        config.callout.line_height = 1.8;
        config.page.paragraph_spacing = 18;
        log.push(
            "long text detected; line height raised to 1.8 and paragraph spacing to 18px"
                .to_string(),
        );
    }

    // Dense documents: shrink the page typography a notch.
    let total_blocks = stats.total_blocks();
    if total_blocks > DENSE_DOCUMENT_BLOCKS {
        config.page.font_size_base = 13;
        config.page.font_size_h2 = 22;
        config.page.font_size_h3 = 18;
        log.push(format!(
            "dense document ({total_blocks} content blocks); base and heading font sizes reduced"
        ));
    }

    for line in &log {
        info!(adjustment = %line, "layout adjustment applied");
    }

    (config, log)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(f: impl FnOnce(&mut DocumentStats)) -> DocumentStats {
        let mut stats = DocumentStats::default();
        f(&mut stats);
        stats
    }

    #[test]
    fn test_kpi_usable_width_matches_two_column_baseline() {
        // (800 - 20) / 2 - 2 * 20
        assert!((kpi_card_usable_width() - 350.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_stats_leaves_most_fields_at_baseline() {
        let baseline = LayoutConfig::default();
        let (config, log) = adjust_config(&baseline, &DocumentStats::default());
        // Zero KPI cards still collapse the grid; everything else is untouched.
        assert_eq!(config.grid.columns, 1);
        assert_eq!(config.kpi_card.padding, 24);
        assert_eq!(config.page, PageLayout::default());
        assert_eq!(config.table, baseline.table);
        assert_eq!(config.kpi_card.font_size_value, 32);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_baseline_is_never_mutated() {
        let baseline = LayoutConfig::default();
        let snapshot = baseline.clone();
        let stats = stats_with(|s| {
            s.kpi_count = 9;
            s.max_kpi_value_length = 30;
            s.max_table_columns = 10;
            s.has_long_text = true;
        });
        let _ = adjust_config(&baseline, &stats);
        assert_eq!(baseline, snapshot);
    }

    #[test]
    fn test_twelve_digit_kpi_value_gets_precautionary_size() {
        // Scenario: 12 digits fit at 32px (7.2 * 32 = 230.4 <= 350) so the
        // solver does not shrink, but the length exceeds 10 — the
        // precautionary ceiling of 28px applies.
        let stats = stats_with(|s| {
            s.kpi_count = 1;
            s.max_kpi_value_length = 12;
        });
        let (config, log) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.kpi_card.font_size_value, 28);
        assert!(log.iter().any(|l| l.contains("preemptively")));
    }

    #[test]
    fn test_very_long_kpi_value_shrinks_via_solver() {
        // 40 digits: width(s) = 24s. Budget 350 → s ≤ 14.58, below the
        // solver floor of 18 → exhausted scan returns the minimum.
        let stats = stats_with(|s| {
            s.kpi_count = 1;
            s.max_kpi_value_length = 40;
        });
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.kpi_card.font_size_value, KPI_VALUE_FONT_MIN);
    }

    #[test]
    fn test_solver_picks_largest_fitting_kpi_size() {
        // 25 digits: width(s) = 15s ≤ 350 → s ≤ 23.
        let stats = stats_with(|s| {
            s.kpi_count = 1;
            s.max_kpi_value_length = 25;
        });
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.kpi_card.font_size_value, 23);
    }

    #[test]
    fn test_short_kpi_value_keeps_baseline_size() {
        let stats = stats_with(|s| {
            s.kpi_count = 4;
            s.max_kpi_value_length = 6;
        });
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.kpi_card.font_size_value, 32);
    }

    #[test]
    fn test_nine_kpis_use_three_column_grid() {
        let stats = stats_with(|s| s.kpi_count = 9);
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.grid.columns, 3);
        assert_eq!(config.kpi_card.min_height, 100);
        assert_eq!(config.kpi_card.padding, 16);
    }

    #[test]
    fn test_five_kpis_use_two_column_grid() {
        let stats = stats_with(|s| s.kpi_count = 5);
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.grid.columns, 2);
        assert_eq!(config.kpi_card.padding, 18);
    }

    #[test]
    fn test_three_kpis_leave_grid_at_baseline() {
        // 3 or 4 cards fall between the branches: no grid rule fires.
        let stats = stats_with(|s| s.kpi_count = 3);
        let (config, log) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.grid.columns, 2);
        assert_eq!(config.kpi_card.padding, 20);
        assert!(log.is_empty());
    }

    #[test]
    fn test_ten_column_table_gets_smallest_typography() {
        let stats = stats_with(|s| {
            s.kpi_count = 3;
            s.max_table_columns = 10;
        });
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.table.font_size_header, 10);
        assert_eq!(config.table.font_size_body, 9);
        assert_eq!(config.table.cell_padding, 6);
    }

    #[test]
    fn test_table_column_tiers() {
        for (columns, header, body, padding) in
            [(7, 11, 10, 8), (8, 11, 10, 8), (5, 12, 11, 10), (4, 13, 12, 12)]
        {
            let stats = stats_with(|s| {
                s.kpi_count = 3;
                s.max_table_columns = columns;
            });
            let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
            assert_eq!(config.table.font_size_header, header, "{columns} columns");
            assert_eq!(config.table.font_size_body, body, "{columns} columns");
            assert_eq!(config.table.cell_padding, padding, "{columns} columns");
        }
    }

    #[test]
    fn test_long_text_opens_up_spacing() {
        let stats = stats_with(|s| {
            s.kpi_count = 3;
            s.has_long_text = true;
        });
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert!((config.page.line_height - 1.8).abs() < 1e-6);
        assert!((config.callout.line_height - 1.8).abs() < 1e-6);
        assert_eq!(config.page.paragraph_spacing, 18);
    }

    #[test]
    fn test_dense_document_shrinks_page_typography() {
        let stats = stats_with(|s| {
            s.kpi_count = 10;
            s.table_count = 6;
            s.chart_count = 3;
            s.callout_count = 3;
        });
        let (config, _) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(config.page.font_size_base, 13);
        assert_eq!(config.page.font_size_h2, 22);
        assert_eq!(config.page.font_size_h3, 18);
        // h1 and h4 are untouched by the density rule.
        assert_eq!(config.page.font_size_h1, 28);
        assert_eq!(config.page.font_size_h4, 16);
    }

    #[test]
    fn test_adjustment_is_deterministic() {
        let stats = stats_with(|s| {
            s.kpi_count = 7;
            s.max_kpi_value_length = 15;
            s.max_table_columns = 7;
            s.has_long_text = true;
        });
        let baseline = LayoutConfig::default();
        let first = adjust_config(&baseline, &stats);
        let second = adjust_config(&baseline, &stats);
        assert_eq!(first, second);
    }

    #[test]
    fn test_adjustment_is_idempotent() {
        let stats = stats_with(|s| {
            s.kpi_count = 9;
            s.max_kpi_value_length = 12;
            s.max_table_columns = 10;
            s.table_count = 15;
            s.has_long_text = true;
        });
        let baseline = LayoutConfig::default();
        let (once, _) = adjust_config(&baseline, &stats);
        let (twice, _) = adjust_config(&once, &stats);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_log_lines_follow_rule_order() {
        let stats = stats_with(|s| {
            s.kpi_count = 9;
            s.max_kpi_value_length = 12;
            s.max_table_columns = 10;
            s.has_long_text = true;
        });
        let (_, log) = adjust_config(&LayoutConfig::default(), &stats);
        assert_eq!(log.len(), 4);
        assert!(log[0].contains("KPI value"));
        assert!(log[1].contains("many KPI cards"));
        assert!(log[2].contains("very wide table"));
        assert!(log[3].contains("long text"));
    }
}
