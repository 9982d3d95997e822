//! Typed document IR consumed by the optimizer.
//!
//! The IR format is owned upstream and loosely shaped: the root collection
//! may be keyed `chapters` or `sections`, table rows arrive as bare cell
//! arrays or `{ "cells": [...] }` records, and paragraph inlines as bare
//! strings or `{ "text": ... }` records. Block decoding is total — a
//! malformed block becomes an inert [`BlockKind::Other`] node instead of
//! failing the whole document, so bad input degrades to undercounting.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Document tree
// ────────────────────────────────────────────────────────────────────────────

/// Root of the document IR.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub sections: Vec<Chapter>,
}

impl Document {
    /// Root chapter list: `chapters` when non-empty, else `sections`.
    pub fn root_chapters(&self) -> &[Chapter] {
        if self.chapters.is_empty() {
            &self.sections
        } else {
            &self.chapters
        }
    }
}

/// A chapter (or section) node: a block list plus nested child chapters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub children: Vec<Chapter>,
}

// ────────────────────────────────────────────────────────────────────────────
// Content blocks
// ────────────────────────────────────────────────────────────────────────────

/// A typed content block. Every kind may carry a nested block list — the
/// analyzer descends into it regardless of the kind, so unknown or future
/// block kinds with nested content are still counted.
#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub blocks: Vec<Block>,
}

/// Block discriminant, matching the IR's `type` field.
#[derive(Debug, Clone)]
pub enum BlockKind {
    KpiGrid { items: Vec<KpiItem> },
    Table { headers: Vec<Value>, rows: Vec<TableRow> },
    Chart,
    Widget,
    Callout,
    Paragraph { inlines: Vec<Inline> },
    /// Unknown or malformed block — inert for counting.
    Other { kind: Option<String> },
}

/// One item inside a KPI grid. The `value` is the stringified form of
/// whatever scalar the IR carried.
#[derive(Debug, Clone)]
pub struct KpiItem {
    pub value: String,
}

/// One table row in either of the two permitted shapes.
#[derive(Debug, Clone)]
pub enum TableRow {
    /// Bare cell array: `["a", 1, true]`.
    Array(Vec<Value>),
    /// Cell record: `{ "cells": [...] }`.
    Record { cells: Vec<Value> },
}

/// One paragraph inline span, already resolved to plain text.
#[derive(Debug, Clone)]
pub struct Inline {
    pub text: String,
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Block::from_value(&value))
    }
}

impl Block {
    /// Total conversion from a raw JSON value; never fails.
    pub fn from_value(value: &Value) -> Block {
        let Some(map) = value.as_object() else {
            // Non-record block: inert, nothing to recurse into.
            return Block {
                kind: BlockKind::Other { kind: None },
                blocks: Vec::new(),
            };
        };

        let blocks = map
            .get("blocks")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Block::from_value).collect())
            .unwrap_or_default();

        let kind = match map.get("type").and_then(Value::as_str) {
            Some("kpiGrid") => BlockKind::KpiGrid {
                items: map
                    .get("items")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(KpiItem::from_value).collect())
                    .unwrap_or_default(),
            },
            Some("table") => BlockKind::Table {
                headers: map
                    .get("headers")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                rows: map
                    .get("rows")
                    .and_then(Value::as_array)
                    .map(|rows| rows.iter().map(TableRow::from_value).collect())
                    .unwrap_or_default(),
            },
            Some("chart") => BlockKind::Chart,
            Some("widget") => BlockKind::Widget,
            Some("callout") => BlockKind::Callout,
            Some("paragraph") => BlockKind::Paragraph {
                inlines: map
                    .get("inlines")
                    .and_then(Value::as_array)
                    .map(|spans| spans.iter().map(Inline::from_value).collect())
                    .unwrap_or_default(),
            },
            other => BlockKind::Other {
                kind: other.map(str::to_owned),
            },
        };

        Block { kind, blocks }
    }
}

impl KpiItem {
    fn from_value(value: &Value) -> KpiItem {
        let raw = value.as_object().and_then(|m| m.get("value"));
        KpiItem {
            value: raw.map(scalar_text).unwrap_or_default(),
        }
    }
}

impl TableRow {
    fn from_value(value: &Value) -> TableRow {
        match value {
            Value::Object(map) => TableRow::Record {
                cells: map
                    .get("cells")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
            },
            Value::Array(cells) => TableRow::Array(cells.clone()),
            // Malformed row: treated as an empty bare array.
            _ => TableRow::Array(Vec::new()),
        }
    }
}

impl Inline {
    fn from_value(value: &Value) -> Inline {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Object(map) => map.get("text").map(scalar_text).unwrap_or_default(),
            _ => String::new(),
        };
        Inline { text }
    }
}

/// Stringifies a scalar IR value. Strings pass through unquoted; null maps
/// to the empty string.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
