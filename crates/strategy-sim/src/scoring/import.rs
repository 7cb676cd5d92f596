use super::domain::Category;
use super::selection::CategorySelections;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SelectionImportError {
    #[error("failed to read selection file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid selection CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads decision selections from a `Category,Decision,Level` CSV export.
pub struct SelectionImporter;

impl SelectionImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CategorySelections, SelectionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows naming an unknown category are skipped. Decision and level names
    /// are kept verbatim; the scoring engine decides what they are worth.
    pub fn from_reader<R: Read>(reader: R) -> Result<CategorySelections, SelectionImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut selections = CategorySelections::default();

        for row in csv_reader.deserialize::<SelectionRow>() {
            let row = row?;
            let Some(category) = Category::from_name(&row.category) else {
                debug!(category = %row.category, decision = %row.decision, "skipping row with unknown category");
                continue;
            };
            if row.decision.is_empty() {
                continue;
            }

            selections.select(category, row.decision, row.level.unwrap_or_default());
        }

        Ok(selections)
    }
}

#[derive(Debug, Deserialize)]
struct SelectionRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Decision")]
    decision: String,
    #[serde(rename = "Level", default, deserialize_with = "empty_string_as_none")]
    level: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
