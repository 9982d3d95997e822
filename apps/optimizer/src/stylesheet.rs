//! Deterministic stylesheet rendering from a layout configuration.
//!
//! Pure string templating: every numeric configuration field appears
//! verbatim in exactly one declaration, and the overflow-safety
//! declarations (word-break, box-sizing, max-width guards, break-inside)
//! are constants of the template, emitted regardless of the input.

use std::fmt::Write;

use crate::config::{LayoutConfig, OverflowStrategy};

/// Renders `config` into the stylesheet consumed by the downstream
/// renderer. Deterministic: equal configs yield byte-identical output.
pub fn emit(config: &LayoutConfig) -> String {
    let mut css = String::with_capacity(4096);

    css.push_str("/* Layout stylesheet - generated by the layout optimizer */\n");

    // Page body, headings, paragraph and section spacing.
    let page = &config.page;
    let _ = write!(
        css,
        "\n\
         body {{\n    font-size: {base}px;\n    line-height: {lh};\n}}\n\n\
         main {{\n    padding: {padding}px !important;\n    max-width: {width}px;\n    margin: 0 auto;\n}}\n\n\
         h1 {{ font-size: {h1}px !important; }}\n\
         h2 {{ font-size: {h2}px !important; }}\n\
         h3 {{ font-size: {h3}px !important; }}\n\
         h4 {{ font-size: {h4}px !important; }}\n\n\
         p {{\n    margin-bottom: {para}px;\n}}\n\n\
         .chapter {{\n    margin-bottom: {section}px;\n}}\n",
        base = page.font_size_base,
        lh = page.line_height,
        padding = page.page_padding,
        width = page.max_content_width,
        h1 = page.font_size_h1,
        h2 = page.font_size_h2,
        h3 = page.font_size_h3,
        h4 = page.font_size_h4,
        para = page.paragraph_spacing,
        section = page.section_spacing,
    );

    // Orphan-header guard: constant, headings never detach from their body.
    css.push_str(
        "\nh1, h2, h3, h4, h5, h6 {\n    break-after: avoid;\n    page-break-after: avoid;\n    word-break: break-word;\n    overflow-wrap: break-word;\n}\n",
    );

    // KPI grid and cards.
    let grid = &config.grid;
    let kpi = &config.kpi_card;
    let _ = write!(
        css,
        "\n\
         .kpi-grid {{\n    display: grid;\n    grid-template-columns: repeat({columns}, 1fr);\n    gap: {gap}px;\n    margin: 20px 0;\n}}\n\n\
         .kpi-card {{\n    padding: {padding}px !important;\n    min-height: {min_height}px;\n    break-inside: avoid;\n    page-break-inside: avoid;\n    overflow: hidden;\n    box-sizing: border-box;\n    max-width: 100%;\n}}\n\n\
         .kpi-card .value {{\n    font-size: {value}px !important;\n    --kpi-value-max-length: {value_max_length};\n    line-height: 1.2;\n    word-break: break-word;\n    overflow-wrap: break-word;\n    hyphens: auto;\n    max-width: 100%;\n    overflow: hidden;\n    text-overflow: ellipsis;\n}}\n\n\
         .kpi-card .label {{\n    font-size: {label}px !important;\n    word-break: break-word;\n    overflow-wrap: break-word;\n    max-width: 100%;\n}}\n\n\
         .kpi-card .change {{\n    font-size: {change}px !important;\n    word-break: break-word;\n}}\n",
        columns = grid.columns,
        gap = grid.gap,
        padding = kpi.padding,
        min_height = kpi.min_height,
        value = kpi.font_size_value,
        value_max_length = kpi.value_max_length,
        label = kpi.font_size_label,
        change = kpi.font_size_change,
    );

    // Callouts.
    let callout = &config.callout;
    let _ = write!(
        css,
        "\n\
         .callout {{\n    padding: {padding}px !important;\n    margin: 20px 0;\n    line-height: {lh};\n    max-width: {max_width};\n    break-inside: avoid;\n    page-break-inside: avoid;\n    overflow: hidden;\n    box-sizing: border-box;\n}}\n\n\
         .callout-title {{\n    font-size: {title}px !important;\n    margin-bottom: 10px;\n    word-break: break-word;\n}}\n\n\
         .callout-content {{\n    font-size: {content}px !important;\n    word-break: break-word;\n    overflow-wrap: break-word;\n}}\n",
        padding = callout.padding,
        lh = callout.line_height,
        max_width = callout.max_width,
        title = callout.font_size_title,
        content = callout.font_size_content,
    );

    // Tables. Cell padding is shared by header and body cells; the body
    // overflow declarations follow the configured strategy.
    let table = &config.table;
    let overflow_rules = match table.overflow_strategy {
        OverflowStrategy::Wrap => {
            "    word-wrap: break-word;\n    overflow-wrap: break-word;\n    word-break: break-word;\n    hyphens: auto;\n    white-space: normal;\n"
        }
        OverflowStrategy::Ellipsis => {
            "    white-space: nowrap;\n    overflow: hidden;\n    text-overflow: ellipsis;\n"
        }
    };
    let _ = write!(
        css,
        "\n\
         table {{\n    width: 100%;\n    table-layout: fixed;\n    max-width: 100%;\n    overflow: hidden;\n    break-inside: avoid;\n    page-break-inside: avoid;\n}}\n\n\
         th, td {{\n    padding: {cell_padding}px !important;\n}}\n\n\
         th {{\n    font-size: {header}px !important;\n    word-break: break-word;\n    overflow-wrap: break-word;\n    hyphens: auto;\n    max-width: 100%;\n}}\n\n\
         td {{\n    font-size: {body}px !important;\n    max-width: {cell_width}px;\n{overflow_rules}}}\n",
        cell_padding = table.cell_padding,
        header = table.font_size_header,
        body = table.font_size_body,
        cell_width = table.max_cell_width,
        overflow_rules = overflow_rules,
    );

    // Charts.
    let chart = &config.chart;
    let _ = write!(
        css,
        "\n\
         .chart-card {{\n    min-height: {min_height}px;\n    max-height: {max_height}px;\n    padding: {padding}px;\n    break-inside: avoid;\n    page-break-inside: avoid;\n    overflow: hidden;\n    max-width: 100%;\n    box-sizing: border-box;\n}}\n\n\
         .chart-title {{\n    font-size: {title}px !important;\n    word-break: break-word;\n}}\n\n\
         .chart-label {{\n    font-size: {label}px;\n}}\n",
        min_height = chart.min_height,
        max_height = chart.max_height,
        padding = chart.padding,
        title = chart.font_size_title,
        label = chart.font_size_label,
    );

    // Global overflow guards and numeric rendering: template constants.
    css.push_str(
        "\n\
         .content-block {\n    break-inside: avoid;\n    page-break-inside: avoid;\n    overflow: hidden;\n    max-width: 100%;\n}\n\n\
         * {\n    box-sizing: border-box;\n    max-width: 100%;\n}\n\n\
         .kpi-value, .value, .delta {\n    font-variant-numeric: tabular-nums;\n    letter-spacing: -0.02em;\n}\n",
    );

    // Responsive fallback: single column below the breakpoint.
    let _ = write!(
        css,
        "\n\
         @media (max-width: {breakpoint}px) {{\n    .kpi-grid {{\n        grid-template-columns: 1fr;\n    }}\n}}\n",
        breakpoint = grid.responsive_breakpoint,
    );

    // Print override: constant.
    css.push_str(
        "\n\
         @media print {\n    * {\n        overflow: visible !important;\n        max-width: 100% !important;\n    }\n\n    .kpi-card, .callout, .chart-card {\n        overflow: hidden !important;\n    }\n}\n",
    );

    css
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
