//! KPI scoring engine: static decision catalogs and the weighted-sum scoring
//! of decision selections, per category and across all categories.

pub mod catalog;
pub mod domain;
mod engine;
pub mod import;
mod report;
mod selection;

pub use catalog::{
    baselines, catalog_view, level_names, merge_weight_tables, merged_weight_table, CatalogView,
    DecisionTemplate,
};
pub use domain::{Category, DecisionSelection, Kpi, KpiWeights, Level, WeightTable};
pub use engine::{score_category, score_overall, score_overall_with, KpiResult, KPI_PRECISION};
pub use import::{SelectionImportError, SelectionImporter};
pub use report::{score_report, CategoryScoreEntry, KpiSummaryEntry, ScoreReport};
pub use selection::CategorySelections;

pub(crate) use engine::round_to;
