//! Strategic investment allocation across the three growth opportunities.
//!
//! Independent from decision scoring: shares are percentages of the
//! investment budget and must add up to exactly 100.

use crate::scoring::{round_to, Kpi, KpiResult, KpiSummaryEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allocation estimates are reported with one decimal place.
pub const ALLOCATION_PRECISION: i32 = 1;

/// Budget in millions of euros split by the default allocation.
pub const DEFAULT_BUDGET_MILLIONS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentArea {
    OffshoreWind,
    GridModernization,
    DataCenter,
}

impl InvestmentArea {
    pub const fn ordered() -> [Self; 3] {
        [Self::OffshoreWind, Self::GridModernization, Self::DataCenter]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OffshoreWind => "Offshore Wind Cables",
            Self::GridModernization => "Grid Modernization",
            Self::DataCenter => "Data Center Infrastructure",
        }
    }

    /// KPI points gained per 100 percentage points invested in the area.
    pub const fn coefficient(self, kpi: Kpi) -> f64 {
        match (self, kpi) {
            (Self::OffshoreWind, Kpi::RevenueGrowth) => 0.25,
            (Self::OffshoreWind, Kpi::OperatingMargin) => 0.08,
            (Self::OffshoreWind, Kpi::Roce) => 0.15,
            (Self::OffshoreWind, Kpi::CustomerSatisfaction) => 0.05,
            (Self::OffshoreWind, Kpi::MarketShare) => 0.06,
            (Self::GridModernization, Kpi::RevenueGrowth) => 0.15,
            (Self::GridModernization, Kpi::OperatingMargin) => 0.12,
            (Self::GridModernization, Kpi::Roce) => 0.10,
            (Self::GridModernization, Kpi::CustomerSatisfaction) => 0.03,
            (Self::GridModernization, Kpi::MarketShare) => 0.04,
            (Self::DataCenter, Kpi::RevenueGrowth) => 0.20,
            (Self::DataCenter, Kpi::OperatingMargin) => 0.05,
            (Self::DataCenter, Kpi::Roce) => 0.08,
            (Self::DataCenter, Kpi::CustomerSatisfaction) => 0.08,
            (Self::DataCenter, Kpi::MarketShare) => 0.03,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("{area} share must be between 0 and 100 (got {value}%)")]
    ShareOutOfRange { area: &'static str, value: u16 },
    #[error("total allocation is {total}%; must equal 100%")]
    TotalMismatch { total: u16 },
}

/// Percentage of the budget assigned to each opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentAllocation {
    pub offshore_wind: u16,
    pub grid_modernization: u16,
    pub data_center: u16,
}

impl Default for InvestmentAllocation {
    fn default() -> Self {
        Self {
            offshore_wind: 40,
            grid_modernization: 40,
            data_center: 20,
        }
    }
}

impl InvestmentAllocation {
    pub const fn share(&self, area: InvestmentArea) -> u16 {
        match area {
            InvestmentArea::OffshoreWind => self.offshore_wind,
            InvestmentArea::GridModernization => self.grid_modernization,
            InvestmentArea::DataCenter => self.data_center,
        }
    }

    pub fn total(&self) -> u16 {
        InvestmentArea::ordered()
            .into_iter()
            .map(|area| self.share(area))
            .fold(0u16, u16::saturating_add)
    }

    pub fn validate(&self) -> Result<(), AllocationError> {
        for area in InvestmentArea::ordered() {
            let value = self.share(area);
            if value > 100 {
                return Err(AllocationError::ShareOutOfRange {
                    area: area.label(),
                    value,
                });
            }
        }

        match self.total() {
            100 => Ok(()),
            total => Err(AllocationError::TotalMismatch { total }),
        }
    }

    /// Estimated KPIs for a valid allocation.
    pub fn kpi_impact(&self) -> Result<KpiResult, AllocationError> {
        self.validate()?;

        let totals: BTreeMap<Kpi, f64> = Kpi::ordered()
            .into_iter()
            .map(|kpi| {
                let weighted: f64 = InvestmentArea::ordered()
                    .into_iter()
                    .map(|area| f64::from(self.share(area)) * area.coefficient(kpi))
                    .sum();
                (kpi, kpi.baseline() + weighted / 100.0)
            })
            .collect();

        Ok(KpiResult::from_totals(totals, ALLOCATION_PRECISION))
    }

    pub fn breakdown(&self, budget_millions: f64) -> Vec<InvestmentLine> {
        InvestmentArea::ordered()
            .into_iter()
            .map(|area| {
                let share_pct = self.share(area);
                InvestmentLine {
                    area,
                    label: area.label(),
                    share_pct,
                    amount_millions: round_to(
                        f64::from(share_pct) * budget_millions / 100.0,
                        2,
                    ),
                }
            })
            .collect()
    }

    pub fn report(&self, budget_millions: f64) -> Result<AllocationReport, AllocationError> {
        let impact = self.kpi_impact()?;
        Ok(AllocationReport {
            total_pct: self.total(),
            budget_millions,
            kpis: impact.summary(ALLOCATION_PRECISION),
            breakdown: self.breakdown(budget_millions),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentLine {
    pub area: InvestmentArea,
    pub label: &'static str,
    pub share_pct: u16,
    pub amount_millions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    pub total_pct: u16,
    pub budget_millions: f64,
    pub kpis: Vec<KpiSummaryEntry>,
    pub breakdown: Vec<InvestmentLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allocation_produces_reference_kpis() {
        let impact = InvestmentAllocation::default()
            .kpi_impact()
            .expect("default allocation is valid");

        assert_eq!(impact.get(Kpi::RevenueGrowth), 5.2);
        assert_eq!(impact.get(Kpi::OperatingMargin), 10.1);
        assert_eq!(impact.get(Kpi::Roce), 12.1);
        assert_eq!(impact.get(Kpi::CustomerSatisfaction), 70.0);
        assert_eq!(impact.get(Kpi::MarketShare), 15.0);
    }

    #[test]
    fn totals_other_than_one_hundred_are_rejected() {
        let allocation = InvestmentAllocation {
            offshore_wind: 50,
            grid_modernization: 40,
            data_center: 20,
        };

        assert_eq!(
            allocation.validate(),
            Err(AllocationError::TotalMismatch { total: 110 })
        );
        assert!(allocation.kpi_impact().is_err());
        assert_eq!(
            AllocationError::TotalMismatch { total: 110 }.to_string(),
            "total allocation is 110%; must equal 100%"
        );
    }

    #[test]
    fn oversized_share_is_reported_before_total() {
        let allocation = InvestmentAllocation {
            offshore_wind: 0,
            grid_modernization: 150,
            data_center: 0,
        };

        assert_eq!(
            allocation.validate(),
            Err(AllocationError::ShareOutOfRange {
                area: "Grid Modernization",
                value: 150,
            })
        );
    }

    #[test]
    fn breakdown_splits_budget_by_share() {
        let lines = InvestmentAllocation::default().breakdown(DEFAULT_BUDGET_MILLIONS);
        let amounts: Vec<f64> = lines.iter().map(|line| line.amount_millions).collect();
        assert_eq!(amounts, vec![200.0, 200.0, 100.0]);
        assert_eq!(lines[2].label, "Data Center Infrastructure");
    }

    #[test]
    fn full_offshore_allocation_reports_deltas() {
        let allocation = InvestmentAllocation {
            offshore_wind: 100,
            grid_modernization: 0,
            data_center: 0,
        };

        let report = allocation.report(250.0).expect("valid allocation");
        let revenue = &report.kpis[0];
        assert_eq!(revenue.kpi, Kpi::RevenueGrowth);
        // 5.0 + 25/100 sits exactly on the tie and rounds to even
        assert_eq!(revenue.value, 5.2);
        assert_eq!(revenue.delta, 0.2);
        assert_eq!(report.breakdown[0].amount_millions, 250.0);
    }

    #[test]
    fn values_just_above_a_tie_round_up() {
        // 10.0 + 0.05 is stored slightly above 10.05
        let data_center_only = InvestmentAllocation {
            offshore_wind: 0,
            grid_modernization: 0,
            data_center: 100,
        }
        .kpi_impact()
        .expect("valid allocation");
        assert_eq!(data_center_only.get(Kpi::OperatingMargin), 10.1);

        let even_split = InvestmentAllocation {
            offshore_wind: 50,
            grid_modernization: 50,
            data_center: 0,
        }
        .kpi_impact()
        .expect("valid allocation");
        assert_eq!(even_split.get(Kpi::MarketShare), 15.1);
        assert_eq!(even_split.get(Kpi::RevenueGrowth), 5.2);
    }
}
