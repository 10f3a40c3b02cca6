//! Converts text that has already been read into core types. No file system access.

use tracing::trace;

use crate::{
    error::{Result, TerrainError},
    field::ScalarField,
    types::Value,
};

/// Parses a headerless, comma-separated grid of numbers, one grid row per line.
///
/// Blank lines are skipped and every cell is trimmed. All rows must have the same length.
///
/// # Errors
/// - [`TerrainError::ParseValue`] for a cell that is not a number.
/// - [`TerrainError::RaggedRow`] for a row whose length differs from the first row.
/// - [`TerrainError::EmptyField`] if no rows remain.
pub fn parse_elevation_csv(text: &str) -> Result<ScalarField> {
    let mut values: Vec<Value> = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let row = rows;
        let before = values.len();
        for (col, cell) in line.split(',').enumerate() {
            let v = cell
                .trim()
                .parse::<Value>()
                .map_err(|_| TerrainError::ParseValue { row, col })?;
            values.push(v);
        }
        let found = values.len() - before;
        match cols {
            None => cols = Some(found),
            Some(expected) if expected != found => {
                return Err(TerrainError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.ok_or(TerrainError::EmptyField)?;
    trace!(rows, cols, "parsed elevation csv");
    ScalarField::from_vec(rows, cols, values)
}
