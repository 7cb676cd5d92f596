use super::catalog::{baselines, merge_weight_tables};
use super::domain::{Category, DecisionSelection, Kpi, Level, WeightTable};
use super::selection::CategorySelections;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Decimal places kept for scored KPI values.
pub const KPI_PRECISION: i32 = 2;

/// Rounded value for each of the five KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiResult(BTreeMap<Kpi, f64>);

impl KpiResult {
    /// Rounds raw totals, filling any KPI the totals lack with its baseline.
    pub fn from_totals(totals: BTreeMap<Kpi, f64>, places: i32) -> Self {
        let values = Kpi::ordered()
            .into_iter()
            .map(|kpi| {
                let raw = totals.get(&kpi).copied().unwrap_or_else(|| kpi.baseline());
                (kpi, round_to(raw, places))
            })
            .collect();
        Self(values)
    }

    pub fn baseline() -> Self {
        Self::from_totals(baselines(), KPI_PRECISION)
    }

    pub fn get(&self, kpi: Kpi) -> f64 {
        self.0.get(&kpi).copied().unwrap_or_else(|| kpi.baseline())
    }

    /// Change from the baseline, rounded to the given precision.
    pub fn delta(&self, kpi: Kpi, places: i32) -> f64 {
        round_to(self.get(kpi) - kpi.baseline(), places)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kpi, f64)> + '_ {
        self.0.iter().map(|(kpi, value)| (*kpi, *value))
    }
}

/// Rounds the exact binary value to `places` decimals, ties to even.
/// 10.05 is stored just above the tie and gives 10.1; 5.25 gives 5.2.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let places = usize::try_from(places).unwrap_or(0);
    let rounded = format!("{value:.places$}")
        .parse::<f64>()
        .unwrap_or(value);
    // normalise -0.0 so deltas render as 0.00
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Scores one selection against one weight table.
///
/// Starts from the baselines and adds `weight * ordinal` for every selected
/// decision found in `weight_table`. Unknown decisions contribute nothing and
/// unknown level names count as `None`; neither is an error.
pub fn score_category(selection: &DecisionSelection, weight_table: &WeightTable) -> KpiResult {
    let mut totals = baselines();

    for (decision, level) in selection {
        let ordinal = f64::from(Level::ordinal_for(level));
        let Some(weights) = weight_table.get(decision) else {
            debug!(decision = %decision, "decision not in weight table; ignoring");
            continue;
        };

        for (kpi, weight) in weights {
            *totals.entry(*kpi).or_insert_with(|| kpi.baseline()) += weight * ordinal;
        }
    }

    KpiResult::from_totals(totals, KPI_PRECISION)
}

/// Scores every category against the standard catalogs in one pass.
pub fn score_overall(selections: &CategorySelections) -> KpiResult {
    score_overall_with(selections, Category::weight_table)
}

/// Merges the category selections and the tables supplied by `table_for`
/// with the same precedence, then scores once so baselines are applied a
/// single time.
pub fn score_overall_with<'a, F>(selections: &CategorySelections, table_for: F) -> KpiResult
where
    F: Fn(Category) -> &'a WeightTable,
{
    let combined = selections.merged();
    let weights = merge_weight_tables(Category::ordered().into_iter().map(table_for));
    score_category(&combined, &weights)
}
