use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decision name mapped to the chosen level name, as collected from the caller.
pub type DecisionSelection = BTreeMap<String, String>;

/// Per-KPI weights of a single decision.
pub type KpiWeights = BTreeMap<Kpi, f64>;

/// Decision name mapped to its per-KPI weights; one category's catalog.
pub type WeightTable = BTreeMap<String, KpiWeights>;

/// Investment or effort intensity chosen for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    None,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Level {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::None,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::VeryHigh,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Exact, case-sensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == label)
    }

    /// Ordinal for a level name; names outside the catalog count as `None`.
    pub fn ordinal_for(label: &str) -> u8 {
        Self::from_label(label).map(Self::ordinal).unwrap_or(0)
    }
}

/// Business metrics tracked by the simulation. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kpi {
    #[serde(rename = "Revenue Growth (%)")]
    RevenueGrowth,
    #[serde(rename = "Operating Margin (%)")]
    OperatingMargin,
    #[serde(rename = "ROCE (%)")]
    Roce,
    #[serde(rename = "Customer Satisfaction (%)")]
    CustomerSatisfaction,
    #[serde(rename = "Market Share (%)")]
    MarketShare,
}

impl Kpi {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::RevenueGrowth,
            Self::OperatingMargin,
            Self::Roce,
            Self::CustomerSatisfaction,
            Self::MarketShare,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RevenueGrowth => "Revenue Growth (%)",
            Self::OperatingMargin => "Operating Margin (%)",
            Self::Roce => "ROCE (%)",
            Self::CustomerSatisfaction => "Customer Satisfaction (%)",
            Self::MarketShare => "Market Share (%)",
        }
    }

    /// Short name without the unit suffix, used for metric tiles.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::RevenueGrowth => "Revenue Growth",
            Self::OperatingMargin => "Operating Margin",
            Self::Roce => "ROCE",
            Self::CustomerSatisfaction => "Customer Satisfaction",
            Self::MarketShare => "Market Share",
        }
    }

    /// Value assumed when no decision moves the metric.
    pub const fn baseline(self) -> f64 {
        match self {
            Self::RevenueGrowth => 5.0,
            Self::OperatingMargin => 10.0,
            Self::Roce => 12.0,
            Self::CustomerSatisfaction => 70.0,
            Self::MarketShare => 15.0,
        }
    }
}

/// Business function owning a decision catalog. Declaration order is the
/// precedence used when categories are merged: later categories win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GoToMarket,
    ProductRnd,
    PlantsManagement,
    Corporate,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::GoToMarket,
            Self::ProductRnd,
            Self::PlantsManagement,
            Self::Corporate,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::GoToMarket => "go_to_market",
            Self::ProductRnd => "product_rnd",
            Self::PlantsManagement => "plants_management",
            Self::Corporate => "corporate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GoToMarket => "Go-to-Market",
            Self::ProductRnd => "Product R&D Innovation",
            Self::PlantsManagement => "Plants Management",
            Self::Corporate => "Corporate",
        }
    }

    /// Accepts either the snake_case key or the display label, ignoring case.
    pub fn from_name(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ordered().into_iter().find(|category| {
            category.key().eq_ignore_ascii_case(trimmed)
                || category.label().eq_ignore_ascii_case(trimmed)
        })
    }
}
