use super::domain::{Category, Kpi, Level};
use super::engine::{score_category, score_overall, KpiResult, KPI_PRECISION};
use super::selection::CategorySelections;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummaryEntry {
    pub kpi: Kpi,
    pub label: &'static str,
    pub value: f64,
    pub baseline: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScoreEntry {
    pub category: Category,
    pub category_label: &'static str,
    /// Catalog decisions selected above `None`.
    pub active_decisions: usize,
    pub kpis: Vec<KpiSummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub categories: Vec<CategoryScoreEntry>,
    pub overall: Vec<KpiSummaryEntry>,
}

impl ScoreReport {
    pub fn overall_value(&self, kpi: Kpi) -> Option<f64> {
        self.overall
            .iter()
            .find(|entry| entry.kpi == kpi)
            .map(|entry| entry.value)
    }

    /// Overall KPIs as a result map, taken from the already scored rows.
    pub fn overall_result(&self) -> KpiResult {
        let totals = self
            .overall
            .iter()
            .map(|entry| (entry.kpi, entry.value))
            .collect();
        KpiResult::from_totals(totals, KPI_PRECISION)
    }

    pub fn category(&self, category: Category) -> Option<&CategoryScoreEntry> {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
    }
}

impl KpiResult {
    /// Metric rows in KPI order with the change against each baseline.
    pub fn summary(&self, places: i32) -> Vec<KpiSummaryEntry> {
        Kpi::ordered()
            .into_iter()
            .map(|kpi| KpiSummaryEntry {
                kpi,
                label: kpi.label(),
                value: self.get(kpi),
                baseline: kpi.baseline(),
                delta: self.delta(kpi, places),
            })
            .collect()
    }
}

/// Scores each category on its own catalog, then the merged scenario.
pub fn score_report(selections: &CategorySelections) -> ScoreReport {
    let categories = Category::ordered()
        .into_iter()
        .map(|category| {
            let selection = selections.get(category);
            let table = category.weight_table();
            let active_decisions = selection
                .iter()
                .filter(|(decision, level)| {
                    table.contains_key(decision.as_str()) && Level::ordinal_for(level) > 0
                })
                .count();

            CategoryScoreEntry {
                category,
                category_label: category.label(),
                active_decisions,
                kpis: score_category(selection, table).summary(KPI_PRECISION),
            }
        })
        .collect();

    ScoreReport {
        categories,
        overall: score_overall(selections).summary(KPI_PRECISION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_category_and_overall_deltas() {
        let mut selections = CategorySelections::default();
        selections
            .select(Category::GoToMarket, "Marketing Investment", "Medium")
            .select(Category::GoToMarket, "Price Forecast: Power Grid", "None")
            .select(Category::Corporate, "Retention & Engagement", "High")
            .select(Category::Corporate, "Unlisted Initiative", "High");

        let report = score_report(&selections);
        assert_eq!(report.categories.len(), 4);

        let go_to_market = report
            .category(Category::GoToMarket)
            .expect("go-to-market scored");
        assert_eq!(go_to_market.active_decisions, 1);
        let margin = go_to_market
            .kpis
            .iter()
            .find(|entry| entry.kpi == Kpi::OperatingMargin)
            .expect("margin present");
        assert_eq!(margin.value, 9.8);
        assert_eq!(margin.delta, -0.2);

        let corporate = report.category(Category::Corporate).expect("corporate scored");
        assert_eq!(corporate.active_decisions, 1);

        let untouched = report
            .category(Category::PlantsManagement)
            .expect("plants scored");
        assert!(untouched.kpis.iter().all(|entry| entry.delta == 0.0));

        // 70.0 + 0.4*2 + 0.6*3
        assert_eq!(report.overall_value(Kpi::CustomerSatisfaction), Some(72.6));
        assert_eq!(report.overall_result(), score_overall(&selections));
    }
}
