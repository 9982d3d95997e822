//! Document layout optimizer.
//!
//! Inspects a structured document IR (a tree of chapters containing typed
//! content blocks — KPI grids, tables, charts, callouts, paragraphs) and
//! derives a concrete, non-overflowing layout configuration, then renders
//! that configuration into a stylesheet for the downstream renderer.
//!
//! Pipeline: [`analyzer::analyze`] → [`adjust::adjust_config`] →
//! optionally [`store::save_config`] and/or [`stylesheet::emit`].
//! Everything is synchronous and CPU-only; the Config Store's file I/O is
//! the only side effect.

pub mod adjust;
pub mod analyzer;
pub mod config;
pub mod errors;
pub mod ir;
pub mod metrics;
pub mod solver;
pub mod store;
pub mod stylesheet;

// Re-export the public API surface.
pub use adjust::{adjust_config, OptimizationLogEntry};
pub use analyzer::{analyze, DocumentStats};
pub use config::{LayoutConfig, OverflowStrategy};
pub use errors::LayoutError;
pub use ir::Document;
pub use solver::{solve_font_size, FontFit};
pub use store::{load_config, save_config};
pub use stylesheet::emit;

use std::path::Path;

use tracing::info;

/// Ties the pipeline together around a held baseline configuration.
///
/// The baseline is read-only — every optimization pass clones it, so a
/// shared optimizer is safe to read concurrently and repeated passes never
/// observe each other's output.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptimizer {
    baseline: LayoutConfig,
}

impl LayoutOptimizer {
    /// Optimizer with the default baseline configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimizer with an explicit baseline.
    pub fn with_config(baseline: LayoutConfig) -> Self {
        LayoutOptimizer { baseline }
    }

    /// Optimizer whose baseline is loaded from a config file. A missing
    /// file falls back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self, LayoutError> {
        Ok(LayoutOptimizer {
            baseline: store::load_config(path)?,
        })
    }

    pub fn baseline(&self) -> &LayoutConfig {
        &self.baseline
    }

    /// Runs one optimization pass: analyze the document, derive an
    /// adjusted configuration from the baseline, and record a timestamped
    /// log entry with the stats and adjustment descriptions.
    pub fn optimize_for_document(
        &self,
        document: &Document,
    ) -> (LayoutConfig, OptimizationLogEntry) {
        info!("analyzing document for layout optimization");
        let stats = analyzer::analyze(document);
        let (config, optimizations) = adjust::adjust_config(&self.baseline, &stats);
        info!(
            applied = optimizations.len(),
            "layout optimization complete"
        );
        let entry = OptimizationLogEntry::new(stats, optimizations, config.clone());
        (config, entry)
    }

    /// Renders the stylesheet for an already-optimized configuration.
    pub fn stylesheet(config: &LayoutConfig) -> String {
        stylesheet::emit(config)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
