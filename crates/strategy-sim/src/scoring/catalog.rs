use super::domain::{Category, Kpi, KpiWeights, Level, WeightTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Static description of one decision lever and its weight per KPI.
///
/// `weights` follows the order of [`Kpi::ordered`].
#[derive(Debug, Clone, Copy)]
pub struct DecisionTemplate {
    pub name: &'static str,
    pub weights: [f64; 5],
}

impl DecisionTemplate {
    pub fn weight(&self, kpi: Kpi) -> f64 {
        Kpi::ordered()
            .into_iter()
            .zip(self.weights)
            .find_map(|(candidate, weight)| (candidate == kpi).then_some(weight))
            .unwrap_or(0.0)
    }

    pub fn kpi_weights(&self) -> KpiWeights {
        Kpi::ordered().into_iter().zip(self.weights).collect()
    }
}

const GO_TO_MARKET: [DecisionTemplate; 5] = [
    DecisionTemplate {
        name: "Price Forecast: Power Transmission",
        weights: [0.5, 0.3, 0.2, 0.1, 0.4],
    },
    DecisionTemplate {
        name: "Price Forecast: Power Grid",
        weights: [0.4, 0.25, 0.15, 0.1, 0.35],
    },
    DecisionTemplate {
        name: "Price Forecast: Power Connect",
        weights: [0.3, 0.2, 0.1, 0.1, 0.3],
    },
    DecisionTemplate {
        name: "Marketing Investment",
        weights: [0.6, -0.1, 0.1, 0.4, 0.5],
    },
    DecisionTemplate {
        name: "Customer Engagement Initiatives",
        weights: [0.3, 0.1, 0.1, 0.6, 0.3],
    },
];

const PRODUCT_RND: [DecisionTemplate; 5] = [
    DecisionTemplate {
        name: "High Voltage Cable R&D",
        weights: [0.7, 0.2, 0.3, 0.3, 0.4],
    },
    DecisionTemplate {
        name: "Medium Voltage Cable R&D",
        weights: [0.6, 0.25, 0.25, 0.3, 0.35],
    },
    DecisionTemplate {
        name: "Specialty Cable R&D",
        weights: [0.5, 0.2, 0.2, 0.4, 0.3],
    },
    DecisionTemplate {
        name: "Data/Telecom Cable R&D",
        weights: [0.4, 0.15, 0.15, 0.4, 0.25],
    },
    DecisionTemplate {
        name: "Sustainability & Digitalization R&D",
        weights: [0.3, 0.1, 0.1, 0.5, 0.2],
    },
];

const PLANTS_MANAGEMENT: [DecisionTemplate; 5] = [
    DecisionTemplate {
        name: "Plant Expansion: Power Transmission",
        weights: [0.6, 0.3, 0.4, 0.1, 0.3],
    },
    DecisionTemplate {
        name: "Plant Expansion: Power Grid",
        weights: [0.5, 0.25, 0.35, 0.1, 0.25],
    },
    DecisionTemplate {
        name: "Plant Expansion: Power Connect",
        weights: [0.4, 0.2, 0.3, 0.1, 0.2],
    },
    DecisionTemplate {
        name: "Automation & Efficiency",
        weights: [0.3, 0.4, 0.4, 0.2, 0.2],
    },
    DecisionTemplate {
        name: "Supply Chain Resilience",
        weights: [0.2, 0.3, 0.3, 0.3, 0.2],
    },
];

const CORPORATE: [DecisionTemplate; 5] = [
    DecisionTemplate {
        name: "Employee Training & Upskilling",
        weights: [0.3, 0.1, 0.1, 0.5, 0.2],
    },
    DecisionTemplate {
        name: "Talent Acquisition",
        weights: [0.4, 0.1, 0.1, 0.4, 0.3],
    },
    DecisionTemplate {
        name: "Retention & Engagement",
        weights: [0.3, 0.1, 0.1, 0.6, 0.2],
    },
    DecisionTemplate {
        name: "ESG & Corporate Social Responsibility",
        weights: [0.2, 0.05, 0.05, 0.5, 0.1],
    },
    DecisionTemplate {
        name: "Digital Transformation",
        weights: [0.4, 0.2, 0.2, 0.4, 0.3],
    },
];

impl Category {
    /// Decision levers owned by the category, in catalog order.
    pub const fn decisions(self) -> &'static [DecisionTemplate] {
        match self {
            Self::GoToMarket => &GO_TO_MARKET,
            Self::ProductRnd => &PRODUCT_RND,
            Self::PlantsManagement => &PLANTS_MANAGEMENT,
            Self::Corporate => &CORPORATE,
        }
    }

    pub fn decision_names(self) -> Vec<&'static str> {
        self.decisions()
            .iter()
            .map(|decision| decision.name)
            .collect()
    }

    pub fn weight_table(self) -> &'static WeightTable {
        static TABLES: OnceLock<[WeightTable; 4]> = OnceLock::new();
        let tables = TABLES.get_or_init(|| Category::ordered().map(build_weight_table));
        match self {
            Self::GoToMarket => &tables[0],
            Self::ProductRnd => &tables[1],
            Self::PlantsManagement => &tables[2],
            Self::Corporate => &tables[3],
        }
    }
}

fn build_weight_table(category: Category) -> WeightTable {
    category
        .decisions()
        .iter()
        .map(|decision| (decision.name.to_string(), decision.kpi_weights()))
        .collect()
}

/// Level labels in ascending order, for rendering choice controls.
pub fn level_names() -> [&'static str; 5] {
    Level::ordered().map(Level::label)
}

/// Baseline value of every KPI.
pub fn baselines() -> BTreeMap<Kpi, f64> {
    Kpi::ordered()
        .into_iter()
        .map(|kpi| (kpi, kpi.baseline()))
        .collect()
}

/// Folds weight tables together; a decision present in several tables keeps
/// the weights of the last one.
pub fn merge_weight_tables<'a, I>(tables: I) -> WeightTable
where
    I: IntoIterator<Item = &'a WeightTable>,
{
    let mut merged = WeightTable::new();
    for table in tables {
        merged.extend(
            table
                .iter()
                .map(|(decision, weights)| (decision.clone(), weights.clone())),
        );
    }
    merged
}

/// All four category catalogs merged in category precedence order.
pub fn merged_weight_table() -> &'static WeightTable {
    static MERGED: OnceLock<WeightTable> = OnceLock::new();
    MERGED.get_or_init(|| {
        merge_weight_tables(
            Category::ordered()
                .into_iter()
                .map(Category::weight_table),
        )
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelView {
    pub level: Level,
    pub label: &'static str,
    pub ordinal: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiBaselineView {
    pub kpi: Kpi,
    pub label: &'static str,
    pub baseline: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionView {
    pub name: &'static str,
    pub weights: KpiWeights,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCatalogView {
    pub category: Category,
    pub label: &'static str,
    pub decisions: Vec<DecisionView>,
}

/// Everything a front end needs to render the decision controls.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub levels: Vec<LevelView>,
    pub kpis: Vec<KpiBaselineView>,
    pub categories: Vec<CategoryCatalogView>,
}

pub fn catalog_view() -> CatalogView {
    let levels = Level::ordered()
        .into_iter()
        .map(|level| LevelView {
            level,
            label: level.label(),
            ordinal: level.ordinal(),
        })
        .collect();

    let kpis = Kpi::ordered()
        .into_iter()
        .map(|kpi| KpiBaselineView {
            kpi,
            label: kpi.label(),
            baseline: kpi.baseline(),
        })
        .collect();

    let categories = Category::ordered()
        .into_iter()
        .map(|category| CategoryCatalogView {
            category,
            label: category.label(),
            decisions: category
                .decisions()
                .iter()
                .map(|decision| DecisionView {
                    name: decision.name,
                    weights: decision.kpi_weights(),
                })
                .collect(),
        })
        .collect();

    CatalogView {
        levels,
        kpis,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_exposes_five_decisions_with_full_weight_vectors() {
        for category in Category::ordered() {
            let table = category.weight_table();
            assert_eq!(table.len(), 5, "{} catalog size", category.label());
            for weights in table.values() {
                assert_eq!(weights.len(), Kpi::ordered().len());
            }
        }
    }

    #[test]
    fn marketing_investment_carries_negative_margin_weight() {
        let weights = Category::GoToMarket
            .weight_table()
            .get("Marketing Investment")
            .expect("marketing investment present");
        assert_eq!(weights.get(&Kpi::OperatingMargin), Some(&-0.1));
        assert_eq!(weights.get(&Kpi::MarketShare), Some(&0.5));
    }

    #[test]
    fn merged_table_contains_every_catalog_decision() {
        let merged = merged_weight_table();
        assert_eq!(merged.len(), 20);
        assert!(merged.contains_key("Digital Transformation"));
        assert!(merged.contains_key("Price Forecast: Power Grid"));
    }

    #[test]
    fn later_tables_win_when_merging() {
        let mut first = WeightTable::new();
        first.insert(
            "Shared".to_string(),
            KpiWeights::from([(Kpi::RevenueGrowth, 1.0)]),
        );
        let mut second = WeightTable::new();
        second.insert(
            "Shared".to_string(),
            KpiWeights::from([(Kpi::RevenueGrowth, 2.0)]),
        );

        let merged = merge_weight_tables([&first, &second]);
        assert_eq!(
            merged.get("Shared").and_then(|w| w.get(&Kpi::RevenueGrowth)),
            Some(&2.0)
        );
    }

    #[test]
    fn catalog_view_keeps_catalog_order() {
        let view = catalog_view();
        assert_eq!(view.levels.len(), 5);
        assert_eq!(view.levels[4].label, "Very High");
        assert_eq!(view.kpis[2].label, "ROCE (%)");
        assert_eq!(view.categories[1].category, Category::ProductRnd);
        assert_eq!(
            view.categories[3].decisions[4].name,
            "Digital Transformation"
        );
    }

    #[test]
    fn level_names_are_in_ascending_order() {
        assert_eq!(
            level_names(),
            ["None", "Low", "Medium", "High", "Very High"]
        );
    }
}
