// Catalog Schema Configuration
//
// The expected shape of the raw table and the mapping to the output
// columns live in one explicit value rather than scattered globals, so
// the clean and transform stages can be exercised against in-memory
// tables and a future upstream schema change becomes a new constructor
// instead of a second pipeline.

use serde::{Deserialize, Serialize};

/// Expected raw-table schema and output mapping for one dataset revision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSchema {
    /// Schema revision identifier, logged with each run
    pub version: String,

    /// Columns that must be present in the raw header
    pub required: Vec<String>,

    /// Columns whose value must be non-blank for a row to survive
    /// cleaning. Subset of `required`; notably excludes the genre list,
    /// whose blanks become "Unknown" later instead of dropping the row.
    pub value_required: Vec<String>,

    /// Known-irrelevant columns removed when present
    pub drop: Vec<String>,

    /// Source column name -> output column name
    pub renames: Vec<(String, String)>,

    /// Multi-valued genre column, post-rename
    pub genre_column: String,

    /// Derived single-genre output column
    pub genre_output: String,

    /// Year column, post-rename
    pub year_column: String,

    /// Exact output column set, in order
    pub output_columns: Vec<String>,
}

impl TitleSchema {
    /// Schema of the current Kaggle export of the catalog dataset
    pub fn current() -> Self {
        let to_strings = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        TitleSchema {
            version: "netflix-v2".to_string(),
            required: to_strings(&[
                "title",
                "type",
                "genres",
                "releaseYear",
                "imdbAverageRating",
                "imdbNumVotes",
            ]),
            value_required: to_strings(&[
                "title",
                "type",
                "releaseYear",
                "imdbAverageRating",
                "imdbNumVotes",
            ]),
            drop: to_strings(&["imdbId", "availableCountries"]),
            renames: vec![
                ("title".to_string(), "Title".to_string()),
                ("type".to_string(), "Type".to_string()),
                ("genres".to_string(), "Genres".to_string()),
                ("releaseYear".to_string(), "Year".to_string()),
                ("imdbAverageRating".to_string(), "Rating".to_string()),
                ("imdbNumVotes".to_string(), "Votes".to_string()),
            ],
            genre_column: "Genres".to_string(),
            genre_output: "Genre".to_string(),
            year_column: "Year".to_string(),
            output_columns: to_strings(&["Title", "Type", "Year", "Rating", "Votes", "Genre"]),
        }
    }

    /// Required columns absent from the given header, in schema order
    pub fn missing_columns(&self, headers: &[String]) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| !headers.contains(name))
            .cloned()
            .collect()
    }

    /// Validate internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.required.is_empty() {
            return Err("Schema must require at least one column".to_string());
        }

        for name in &self.value_required {
            if !self.required.contains(name) {
                return Err(format!(
                    "Value-required column '{}' is not in the required set",
                    name
                ));
            }
        }

        if self.output_columns.is_empty() {
            return Err("Schema must define output columns".to_string());
        }

        Ok(())
    }
}

impl Default for TitleSchema {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_schema_is_valid() {
        let schema = TitleSchema::current();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.version, "netflix-v2");
    }

    #[test]
    fn test_genres_presence_required_but_value_optional() {
        let schema = TitleSchema::current();
        assert!(schema.required.contains(&"genres".to_string()));
        assert!(!schema.value_required.contains(&"genres".to_string()));
    }

    #[test]
    fn test_output_columns_order() {
        let schema = TitleSchema::current();
        assert_eq!(
            schema.output_columns,
            vec!["Title", "Type", "Year", "Rating", "Votes", "Genre"]
        );
    }

    #[test]
    fn test_missing_columns() {
        let schema = TitleSchema::current();
        let headers: Vec<String> = ["title", "type", "genres"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing = schema.missing_columns(&headers);
        assert_eq!(missing, vec!["releaseYear", "imdbAverageRating", "imdbNumVotes"]);
    }

    #[test]
    fn test_validate_rejects_inconsistent_value_required() {
        let mut schema = TitleSchema::current();
        schema.value_required.push("notAColumn".to_string());
        assert!(schema.validate().is_err());
    }
}
