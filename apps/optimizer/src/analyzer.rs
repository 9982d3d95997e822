//! Document analysis — aggregates content statistics from the IR tree.
//!
//! Straightforward recursive descent: chapters recurse into child chapters,
//! blocks recurse into nested block lists. Depth is bounded by authored
//! document structure, not adversarial input. Malformed nodes contribute
//! nothing; the analyzer never fails.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ir::{Block, BlockKind, Chapter, Document, Inline, TableRow};

/// Paragraphs longer than this set the long-text flag.
const LONG_PARAGRAPH_CHARS: usize = 500;
/// Threshold for paragraphs nested directly inside a callout.
const LONG_CALLOUT_CHARS: usize = 200;

/// Content statistics for a single analysis run.
///
/// Ephemeral — produced fresh per call, with no identity beyond it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub kpi_count: usize,
    pub table_count: usize,
    pub chart_count: usize,
    pub callout_count: usize,
    pub max_kpi_value_length: usize,
    pub max_table_columns: usize,
    pub max_table_rows: usize,
    pub total_content_length: usize,
    pub has_long_text: bool,
}

impl DocumentStats {
    /// Total number of counted content blocks.
    pub fn total_blocks(&self) -> usize {
        self.kpi_count + self.table_count + self.chart_count + self.callout_count
    }
}

/// Walks the document tree and aggregates content statistics.
pub fn analyze(document: &Document) -> DocumentStats {
    let mut stats = DocumentStats::default();
    for chapter in document.root_chapters() {
        analyze_chapter(chapter, &mut stats);
    }
    info!(
        kpis = stats.kpi_count,
        tables = stats.table_count,
        charts = stats.chart_count,
        callouts = stats.callout_count,
        content_chars = stats.total_content_length,
        long_text = stats.has_long_text,
        "document analysis complete"
    );
    stats
}

fn analyze_chapter(chapter: &Chapter, stats: &mut DocumentStats) {
    for block in &chapter.blocks {
        analyze_block(block, stats);
    }
    for child in &chapter.children {
        analyze_chapter(child, stats);
    }
}

fn analyze_block(block: &Block, stats: &mut DocumentStats) {
    match &block.kind {
        BlockKind::KpiGrid { items } => {
            stats.kpi_count += items.len();
            for item in items {
                stats.max_kpi_value_length =
                    stats.max_kpi_value_length.max(item.value.chars().count());
            }
        }

        BlockKind::Table { headers, rows } => {
            stats.table_count += 1;
            // Cell-record rows carry the column count themselves; bare
            // arrays defer to the header list.
            let columns = match rows.first() {
                Some(TableRow::Record { cells }) => cells.len(),
                _ => headers.len(),
            };
            stats.max_table_columns = stats.max_table_columns.max(columns);
            stats.max_table_rows = stats.max_table_rows.max(rows.len());
        }

        BlockKind::Chart | BlockKind::Widget => {
            stats.chart_count += 1;
        }

        BlockKind::Callout => {
            stats.callout_count += 1;
            for nested in &block.blocks {
                if let BlockKind::Paragraph { inlines } = &nested.kind {
                    if inline_char_count(inlines) > LONG_CALLOUT_CHARS {
                        stats.has_long_text = true;
                    }
                }
            }
        }

        BlockKind::Paragraph { inlines } => {
            let length = inline_char_count(inlines);
            stats.total_content_length += length;
            if length > LONG_PARAGRAPH_CHARS {
                stats.has_long_text = true;
            }
        }

        BlockKind::Other { .. } => {}
    }

    // Every kind may carry nested blocks; descend regardless of the match
    // above so unknown kinds with nested content are still counted.
    for nested in &block.blocks {
        analyze_block(nested, stats);
    }
}

fn inline_char_count(inlines: &[Inline]) -> usize {
    inlines.iter().map(|i| i.text.chars().count()).sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
