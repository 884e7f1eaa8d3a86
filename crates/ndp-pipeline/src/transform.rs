// Transformation Stage
//
// Renames columns to the output schema, derives the single-genre column
// from the multi-valued genre list, coerces the year to an integer, and
// projects onto the output column order.

use crate::schema::TitleSchema;
use crate::table::Table;
use crate::{PipelineError, Result};
use tracing::info;

/// Separator between entries of the multi-valued genre field
pub const GENRE_SEPARATOR: &str = ", ";

/// Placeholder genre for titles with no genre listed
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Transform a cleaned table into the output shape.
///
/// Renaming happens first; genre derivation and year coercion operate on
/// the renamed columns. Rows whose year does not parse are dropped, not
/// defaulted.
pub fn transform(mut table: Table, schema: &TitleSchema) -> Result<Table> {
    for (from, to) in &schema.renames {
        table.rename_column(from, to);
    }

    derive_genre(&mut table, schema)?;
    coerce_year(&mut table, schema)?;

    table.select(&schema.output_columns)
}

/// Replace the multi-valued genre column with its first entry, filling
/// blanks with the placeholder, and rename it to the output column.
fn derive_genre(table: &mut Table, schema: &TitleSchema) -> Result<()> {
    let genre_index = table
        .column_index(&schema.genre_column)
        .ok_or_else(|| PipelineError::SchemaMismatch(vec![schema.genre_column.clone()]))?;

    for row in &mut table.rows {
        if let Some(cell) = row.get_mut(genre_index) {
            let value = cell.trim();
            *cell = if value.is_empty() {
                UNKNOWN_GENRE.to_string()
            } else {
                first_genre(value).to_string()
            };
        }
    }

    table.rename_column(&schema.genre_column, &schema.genre_output);
    Ok(())
}

/// Coerce the year column to integers, dropping rows that fail to parse
fn coerce_year(table: &mut Table, schema: &TitleSchema) -> Result<()> {
    let year_index = table
        .column_index(&schema.year_column)
        .ok_or_else(|| PipelineError::SchemaMismatch(vec![schema.year_column.clone()]))?;

    let before = table.len();
    let mut kept = Vec::with_capacity(before);

    for mut row in std::mem::take(&mut table.rows) {
        let year = row.get(year_index).and_then(|cell| parse_year(cell));
        if let Some(year) = year {
            row[year_index] = year.to_string();
            kept.push(row);
        }
    }

    let dropped = before - kept.len();
    table.rows = kept;
    if dropped > 0 {
        info!("Dropped {} row(s) with invalid year values", dropped);
    }

    Ok(())
}

/// First entry of a genre list, split on the literal separator
fn first_genre(genres: &str) -> &str {
    genres.split(GENRE_SEPARATOR).next().unwrap_or(genres)
}

/// Parse a year value, accepting integral float spellings ("2020.0")
/// produced by the upstream export. Anything else is treated as missing.
fn parse_year(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(year) = value.parse::<i64>() {
        return Some(year);
    }

    match value.parse::<f64>() {
        Ok(year) if year.is_finite() && year.fract() == 0.0 => Some(year as i64),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
