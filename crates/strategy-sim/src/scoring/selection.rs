use super::domain::{Category, DecisionSelection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decision selections grouped by business function.
///
/// Missing categories deserialize as empty selections and unknown keys are
/// ignored, so partially filled scenarios still score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelections {
    #[serde(default)]
    pub go_to_market: DecisionSelection,
    #[serde(default)]
    pub product_rnd: DecisionSelection,
    #[serde(default)]
    pub plants_management: DecisionSelection,
    #[serde(default)]
    pub corporate: DecisionSelection,
}

impl CategorySelections {
    pub fn get(&self, category: Category) -> &DecisionSelection {
        match category {
            Category::GoToMarket => &self.go_to_market,
            Category::ProductRnd => &self.product_rnd,
            Category::PlantsManagement => &self.plants_management,
            Category::Corporate => &self.corporate,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut DecisionSelection {
        match category {
            Category::GoToMarket => &mut self.go_to_market,
            Category::ProductRnd => &mut self.product_rnd,
            Category::PlantsManagement => &mut self.plants_management,
            Category::Corporate => &mut self.corporate,
        }
    }

    /// Records a level for a decision, replacing any earlier choice.
    pub fn select(
        &mut self,
        category: Category,
        decision: impl Into<String>,
        level: impl Into<String>,
    ) -> &mut Self {
        self.get_mut(category).insert(decision.into(), level.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        Category::ordered()
            .into_iter()
            .all(|category| self.get(category).is_empty())
    }

    /// Flattens every category into one selection. Categories are applied in
    /// precedence order and a decision chosen in several categories keeps the
    /// level of the last one.
    pub fn merged(&self) -> DecisionSelection {
        let mut combined = DecisionSelection::new();
        for category in Category::ordered() {
            for (decision, level) in self.get(category) {
                if let Some(previous) = combined.insert(decision.clone(), level.clone()) {
                    debug!(
                        decision = %decision,
                        previous = %previous,
                        level = %level,
                        category = category.key(),
                        "decision selected in several categories; keeping later level"
                    );
                }
            }
        }
        combined
    }
}
