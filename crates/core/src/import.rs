//! Pure parsing logic for the delimited stock bulk-import format.
//!
//! The format is semicolon-separated text: a header line (discarded
//! unconditionally), then one `color;material_pct;quantity` row per line.
//! Parsing is all-or-nothing: any malformed row fails the whole file, so the
//! caller never persists a partially valid upload.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validate::movement_violations;

/// Field separator within a row.
pub const FIELD_SEPARATOR: char = ';';

/// Every data row carries exactly `color`, `material_pct`, `quantity`.
pub const EXPECTED_FIELDS: usize = 3;

/// One validated data row from a bulk-import file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub color: String,
    pub material_pct: i32,
    pub quantity: i32,
}

/// Parse a whole bulk-import file into validated rows.
///
/// The first line is treated as a header and skipped; blank lines are
/// ignored. Row-level problems are collected across the entire file as a
/// deduplicated, ordered set and returned together in one
/// [`CoreError::Malformed`].
///
/// Errors:
/// - [`CoreError::Validation`] for a zero-byte file.
/// - [`CoreError::Malformed`] for any field-count, parse, or constraint
///   violation, or for a file with no data rows after the header.
pub fn parse_stock_file(content: &str) -> Result<Vec<StockRow>, CoreError> {
    if content.is_empty() {
        return Err(CoreError::Validation("uploaded file is empty".to_string()));
    }

    let mut rows = Vec::new();
    let mut problems = BTreeSet::new();

    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Ok(row) => rows.push(row),
            Err(row_problems) => problems.extend(row_problems),
        }
    }

    if !problems.is_empty() {
        return Err(CoreError::Malformed(problems.into_iter().collect()));
    }
    if rows.is_empty() {
        return Err(CoreError::Malformed(vec![
            "file empty or contains no valid rows".to_string(),
        ]));
    }
    Ok(rows)
}

/// Parse and validate a single data row.
///
/// Returns every problem found on the row, not just the first.
fn parse_row(line: &str) -> Result<StockRow, Vec<String>> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != EXPECTED_FIELDS {
        return Err(vec![format!(
            "malformed row {fields:?}: expected {EXPECTED_FIELDS} fields, got {}",
            fields.len()
        )]);
    }

    let mut problems = Vec::new();

    let color = fields[0].to_string();
    let material_pct = match fields[1].trim().parse::<i32>() {
        Ok(pct) => Some(pct),
        Err(_) => {
            problems.push(format!(
                "material percentage is not a number: {:?}",
                fields[1]
            ));
            None
        }
    };
    let quantity = match fields[2].trim().parse::<i32>() {
        Ok(quantity) => Some(quantity),
        Err(_) => {
            problems.push(format!("quantity is not a number: {:?}", fields[2]));
            None
        }
    };

    if let (Some(material_pct), Some(quantity)) = (material_pct, quantity) {
        problems.extend(movement_violations(&color, material_pct, quantity));
        if problems.is_empty() {
            return Ok(StockRow {
                color,
                material_pct,
                quantity,
            });
        }
    }
    Err(problems)
}
