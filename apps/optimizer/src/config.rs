//! Layout configuration data model.
//!
//! A tree of named sub-configurations, each a flat record of numeric and
//! string parameters. Value-like: the adjustment engine always works on a
//! clone, never on a caller-supplied instance. Serialization is a plain
//! field-by-field serde mapping that mirrors the persisted file format.

use serde::{Deserialize, Serialize};

/// Allowed font-size band. Loaders clamp every font size into this range.
pub const FONT_SIZE_MIN: u32 = 8;
pub const FONT_SIZE_MAX: u32 = 48;

/// Allowed grid column range.
pub const GRID_COLUMNS_MIN: u32 = 1;
pub const GRID_COLUMNS_MAX: u32 = 6;

// ────────────────────────────────────────────────────────────────────────────
// Sub-configurations
// ────────────────────────────────────────────────────────────────────────────

/// Page-wide typography and spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub font_size_base: u32,
    pub font_size_h1: u32,
    pub font_size_h2: u32,
    pub font_size_h3: u32,
    pub font_size_h4: u32,
    /// Line-height multiplier for body text.
    pub line_height: f32,
    pub paragraph_spacing: u32,
    pub section_spacing: u32,
    pub page_padding: u32,
    pub max_content_width: u32,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            font_size_base: 14,
            font_size_h1: 28,
            font_size_h2: 24,
            font_size_h3: 20,
            font_size_h4: 16,
            line_height: 1.6,
            paragraph_spacing: 16,
            section_spacing: 32,
            page_padding: 40,
            max_content_width: 800,
        }
    }
}

/// KPI card sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCardLayout {
    pub font_size_value: u32,
    pub font_size_label: u32,
    pub font_size_change: u32,
    pub padding: u32,
    pub min_height: u32,
    /// Value character count beyond which the value is considered long.
    /// A rendering hint only — the adjustment engine measures widths itself.
    pub value_max_length: u32,
}

impl Default for KpiCardLayout {
    fn default() -> Self {
        KpiCardLayout {
            font_size_value: 32,
            font_size_label: 14,
            font_size_change: 13,
            padding: 20,
            min_height: 120,
            value_max_length: 10,
        }
    }
}

/// Callout (highlighted text box) sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutLayout {
    pub font_size_title: u32,
    pub font_size_content: u32,
    pub padding: u32,
    pub line_height: f32,
    pub max_width: String,
}

impl Default for CalloutLayout {
    fn default() -> Self {
        CalloutLayout {
            font_size_title: 16,
            font_size_content: 14,
            padding: 20,
            line_height: 1.6,
            max_width: "100%".to_string(),
        }
    }
}

/// How table cells handle content wider than their box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowStrategy {
    Wrap,
    Ellipsis,
}

/// Table sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub font_size_header: u32,
    pub font_size_body: u32,
    pub cell_padding: u32,
    pub max_cell_width: u32,
    pub overflow_strategy: OverflowStrategy,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout {
            font_size_header: 13,
            font_size_body: 12,
            cell_padding: 12,
            max_cell_width: 200,
            overflow_strategy: OverflowStrategy::Wrap,
        }
    }
}

/// Chart card sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub font_size_title: u32,
    pub font_size_label: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub padding: u32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            font_size_title: 16,
            font_size_label: 12,
            min_height: 300,
            max_height: 600,
            padding: 20,
        }
    }
}

/// KPI grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: u32,
    pub gap: u32,
    /// Width below which the grid reflows to a single column.
    pub responsive_breakpoint: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            columns: 2,
            gap: 20,
            responsive_breakpoint: 768,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Top-level configuration
// ────────────────────────────────────────────────────────────────────────────

/// Complete layout configuration.
///
/// The four boolean flags default to `true` when absent from a persisted
/// file, so older files without them still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub page: PageLayout,
    pub kpi_card: KpiCardLayout,
    pub callout: CalloutLayout,
    pub table: TableLayout,
    pub chart: ChartLayout,
    pub grid: GridLayout,

    #[serde(default = "default_flag")]
    pub auto_adjust_font_size: bool,
    #[serde(default = "default_flag")]
    pub auto_adjust_grid_columns: bool,
    #[serde(default = "default_flag")]
    pub prevent_orphan_headers: bool,
    #[serde(default = "default_flag")]
    pub optimize_for_print: bool,
}

fn default_flag() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page: PageLayout::default(),
            kpi_card: KpiCardLayout::default(),
            callout: CalloutLayout::default(),
            table: TableLayout::default(),
            chart: ChartLayout::default(),
            grid: GridLayout::default(),
            auto_adjust_font_size: true,
            auto_adjust_grid_columns: true,
            prevent_orphan_headers: true,
            optimize_for_print: true,
        }
    }
}

impl LayoutConfig {
    /// Returns a copy with every font size clamped into
    /// `[FONT_SIZE_MIN, FONT_SIZE_MAX]` and the grid column count into
    /// `[GRID_COLUMNS_MIN, GRID_COLUMNS_MAX]`.
    pub fn clamped(mut self) -> Self {
        let band = |size: u32| size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);

        self.page.font_size_base = band(self.page.font_size_base);
        self.page.font_size_h1 = band(self.page.font_size_h1);
        self.page.font_size_h2 = band(self.page.font_size_h2);
        self.page.font_size_h3 = band(self.page.font_size_h3);
        self.page.font_size_h4 = band(self.page.font_size_h4);
        self.kpi_card.font_size_value = band(self.kpi_card.font_size_value);
        self.kpi_card.font_size_label = band(self.kpi_card.font_size_label);
        self.kpi_card.font_size_change = band(self.kpi_card.font_size_change);
        self.callout.font_size_title = band(self.callout.font_size_title);
        self.callout.font_size_content = band(self.callout.font_size_content);
        self.table.font_size_header = band(self.table.font_size_header);
        self.table.font_size_body = band(self.table.font_size_body);
        self.chart.font_size_title = band(self.chart.font_size_title);
        self.chart.font_size_label = band(self.chart.font_size_label);

        self.grid.columns = self.grid.columns.clamp(GRID_COLUMNS_MIN, GRID_COLUMNS_MAX);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
