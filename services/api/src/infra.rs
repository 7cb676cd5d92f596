use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use strategy_sim::config::parse_budget;
use strategy_sim::scoring::Category;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) budget_millions: f64,
}

/// One `category:decision=level` selection passed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) category: Category,
    pub(crate) decision: String,
    pub(crate) level: String,
}

pub(crate) fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (category, rest) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected category:decision=level, got '{raw}'"))?;
    let (decision, level) = rest
        .rsplit_once('=')
        .ok_or_else(|| format!("missing '=level' in '{raw}'"))?;

    let category = Category::from_name(category).ok_or_else(|| {
        let known: Vec<&str> = Category::ordered().into_iter().map(Category::key).collect();
        format!(
            "unknown category '{}' (expected one of {})",
            category.trim(),
            known.join(", ")
        )
    })?;

    let decision = decision.trim();
    if decision.is_empty() {
        return Err(format!("missing decision name in '{raw}'"));
    }

    Ok(Assignment {
        category,
        decision: decision.to_string(),
        level: level.trim().to_string(),
    })
}

pub(crate) fn parse_budget_arg(raw: &str) -> Result<f64, String> {
    parse_budget(raw).map_err(|err| err.to_string())
}
