//! Flat-file persistence for layout configurations.
//!
//! On-disk format: a JSON document with a top-level `config` object
//! mirroring [`LayoutConfig`] field for field, plus an optional
//! `optimization_log` holding the most recent pass's log entry.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::adjust::OptimizationLogEntry;
use crate::config::LayoutConfig;
use crate::errors::LayoutError;

#[derive(Debug, Serialize, Deserialize)]
struct StoredConfig {
    config: LayoutConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    optimization_log: Option<OptimizationLogEntry>,
}

/// Loads a configuration from `path`.
///
/// A missing file is not an error: a warning is logged and the default
/// configuration is returned. Parse and read failures propagate. Loaded
/// values are clamped into the allowed font-size and column bands.
pub fn load_config(path: &Path) -> Result<LayoutConfig, LayoutError> {
    if !path.exists() {
        warn!(path = %path.display(), "layout config file not found, using defaults");
        return Ok(LayoutConfig::default());
    }

    let raw = fs::read_to_string(path)?;
    let stored: StoredConfig = serde_json::from_str(&raw)?;
    info!(path = %path.display(), "layout config loaded");
    Ok(stored.config.clamped())
}

/// Saves a configuration (and, if supplied, an optimization log entry) to
/// `path`, creating parent directories as needed.
pub fn save_config(
    path: &Path,
    config: &LayoutConfig,
    log_entry: Option<&OptimizationLogEntry>,
) -> Result<(), LayoutError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let stored = StoredConfig {
        config: config.clone(),
        optimization_log: log_entry.cloned(),
    };
    fs::write(path, serde_json::to_string_pretty(&stored)?)?;
    info!(path = %path.display(), "layout config saved");
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DocumentStats;
    use crate::config::OverflowStrategy;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let config = load_config(&path).unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let mut config = LayoutConfig::default();
        config.page.font_size_base = 13;
        config.page.line_height = 1.8;
        config.kpi_card.font_size_value = 28;
        config.table.overflow_strategy = OverflowStrategy::Ellipsis;
        config.grid.columns = 3;
        config.optimize_for_print = false;

        save_config(&path, &config, None).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/layout.json");
        save_config(&path, &LayoutConfig::default(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_log_entry_is_persisted_and_tolerated_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let config = LayoutConfig::default();

        let entry = OptimizationLogEntry::new(
            DocumentStats::default(),
            vec!["example adjustment".to_string()],
            config.clone(),
        );
        save_config(&path, &config, Some(&entry)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("optimization_log"));
        assert!(raw.contains("example adjustment"));

        // A file saved without a log entry omits the key entirely and
        // still loads.
        save_config(&path, &config, None).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("optimization_log"));
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_loaded_values_are_clamped_into_band() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let mut config = LayoutConfig::default();
        config.page.font_size_h1 = 500;
        config.grid.columns = 0;
        save_config(&path, &config, None).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.page.font_size_h1, crate::config::FONT_SIZE_MAX);
        assert_eq!(loaded.grid.columns, crate::config::GRID_COLUMNS_MIN);
    }

    #[test]
    fn test_malformed_file_propagates_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, LayoutError::Serialization(_)));
    }
}
