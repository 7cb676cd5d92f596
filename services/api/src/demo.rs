use crate::infra::{parse_assignment, parse_budget_arg, Assignment};
use clap::Args;
use std::path::PathBuf;
use strategy_sim::allocation::{AllocationReport, InvestmentAllocation};
use strategy_sim::config::AppConfig;
use strategy_sim::error::AppError;
use strategy_sim::scoring::{
    level_names, score_report, Category, CategorySelections, Kpi, KpiSummaryEntry, ScoreReport,
    SelectionImporter,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// CSV export with Category, Decision and Level columns
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Selection as category:decision=level; repeatable, applied after the CSV
    #[arg(long = "set", value_parser = parse_assignment)]
    pub(crate) set: Vec<Assignment>,
}

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    /// Share of the budget for offshore wind cables (%)
    #[arg(long, default_value_t = 40)]
    pub(crate) offshore_wind: u16,
    /// Share of the budget for grid modernization (%)
    #[arg(long, default_value_t = 40)]
    pub(crate) grid_modernization: u16,
    /// Share of the budget for data center infrastructure (%)
    #[arg(long, default_value_t = 20)]
    pub(crate) data_center: u16,
    /// Budget in EUR millions (defaults to SIM_BUDGET_MILLIONS)
    #[arg(long, value_parser = parse_budget_arg)]
    pub(crate) budget: Option<f64>,
}

pub(crate) fn run_catalog() {
    println!("Decision levels: {}", level_names().join(" < "));

    println!("\nKPI baselines");
    for kpi in Kpi::ordered() {
        println!("- {}: {:.1}", kpi.label(), kpi.baseline());
    }

    for category in Category::ordered() {
        println!("\n{} ({})", category.label(), category.key());
        for decision in category.decisions() {
            let weights: Vec<String> = Kpi::ordered()
                .into_iter()
                .map(|kpi| format!("{} {:+.2}", kpi.short_label(), decision.weight(kpi)))
                .collect();
            println!("- {}: {}", decision.name, weights.join(", "));
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { csv, set } = args;

    let mut selections = match csv {
        Some(path) => SelectionImporter::from_path(path)?,
        None => CategorySelections::default(),
    };
    apply_assignments(&mut selections, set);

    if selections.is_empty() {
        println!("No decisions selected; every KPI stays at its baseline.");
    }

    render_score_report(&score_report(&selections));
    Ok(())
}

pub(crate) fn run_allocate(args: AllocateArgs) -> Result<(), AppError> {
    let AllocateArgs {
        offshore_wind,
        grid_modernization,
        data_center,
        budget,
    } = args;

    let budget = match budget {
        Some(budget) => budget,
        None => AppConfig::load()?.simulation.budget_millions,
    };

    let allocation = InvestmentAllocation {
        offshore_wind,
        grid_modernization,
        data_center,
    };
    let report = allocation.report(budget)?;
    render_allocation_report(&report);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = AppConfig::load()?;

    println!("Strategy simulation demo");
    let selections = sample_selections();
    render_score_report(&score_report(&selections));

    println!();
    let report = InvestmentAllocation::default().report(config.simulation.budget_millions)?;
    render_allocation_report(&report);
    Ok(())
}

fn apply_assignments(selections: &mut CategorySelections, assignments: Vec<Assignment>) {
    for Assignment {
        category,
        decision,
        level,
    } in assignments
    {
        selections.select(category, decision, level);
    }
}

fn sample_selections() -> CategorySelections {
    let mut selections = CategorySelections::default();
    selections
        .select(Category::GoToMarket, "Price Forecast: Power Grid", "High")
        .select(Category::GoToMarket, "Marketing Investment", "Medium")
        .select(Category::ProductRnd, "High Voltage Cable R&D", "Very High")
        .select(Category::PlantsManagement, "Automation & Efficiency", "Medium")
        .select(Category::Corporate, "Digital Transformation", "High")
        .select(Category::Corporate, "Retention & Engagement", "Low");
    selections
}

fn render_score_report(report: &ScoreReport) {
    for entry in &report.categories {
        println!(
            "\n{} ({} active decision{})",
            entry.category_label,
            entry.active_decisions,
            if entry.active_decisions == 1 { "" } else { "s" }
        );
        render_kpi_rows(&entry.kpis, 2);
    }

    println!("\nOverall impact");
    render_kpi_rows(&report.overall, 2);
}

fn render_allocation_report(report: &AllocationReport) {
    println!("Strategic impact of investment allocation");
    render_kpi_rows(&report.kpis, 1);

    println!(
        "\nInvestment breakdown (EUR {:.0}M, {}% allocated)",
        report.budget_millions, report.total_pct
    );
    for line in &report.breakdown {
        println!(
            "- {}: {}% -> EUR {:.1}M",
            line.label, line.share_pct, line.amount_millions
        );
    }
}

fn render_kpi_rows(entries: &[KpiSummaryEntry], places: usize) {
    for entry in entries {
        println!(
            "- {:<26} {:>7.places$}  ({:+.places$})",
            entry.label,
            entry.value,
            entry.delta,
            places = places
        );
    }
}
