// Cleaning Stage
//
// Validates the raw header against the schema, drops rows with missing
// required values, and removes the known-irrelevant columns.

use crate::schema::TitleSchema;
use crate::table::Table;
use crate::{PipelineError, Result};
use tracing::{debug, info};

/// Clean a raw table.
///
/// Fails with a schema mismatch naming every absent required column; no
/// fuzzy header matching is attempted. Surviving rows are an
/// order-preserving subset of the input.
pub fn clean(mut table: Table, schema: &TitleSchema) -> Result<Table> {
    let missing = schema.missing_columns(&table.headers);
    if !missing.is_empty() {
        return Err(PipelineError::SchemaMismatch(missing));
    }
    debug!("Header matches schema {}", schema.version);

    let required_indices: Vec<usize> = schema
        .value_required
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let before = table.len();
    table.rows.retain(|row| {
        required_indices
            .iter()
            .all(|&i| row.get(i).map(|cell| !cell.trim().is_empty()).unwrap_or(false))
    });

    let dropped = before - table.len();
    if dropped > 0 {
        info!("Dropped {} row(s) with missing required values", dropped);
    }

    for column in &schema.drop {
        if table.drop_column(column) {
            debug!("Dropped column {}", column);
        }
    }

    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================
