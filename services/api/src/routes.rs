use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strategy_sim::allocation::{AllocationReport, InvestmentAllocation};
use strategy_sim::error::AppError;
use strategy_sim::scoring::{
    catalog_view, score_category, score_report, CatalogView, Category,
    CategorySelections, DecisionSelection, KpiResult, KpiSummaryEntry, ScoreReport, WeightTable,
    KPI_PRECISION,
};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryScoreRequest {
    #[serde(default)]
    pub(crate) category: Option<Category>,
    #[serde(default)]
    pub(crate) selection: DecisionSelection,
    /// Caller-supplied table; takes precedence over `category`.
    #[serde(default)]
    pub(crate) weight_table: Option<WeightTable>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryScoreResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) category: Option<Category>,
    pub(crate) kpis: KpiResult,
    pub(crate) summary: Vec<KpiSummaryEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverallScoreResponse {
    pub(crate) kpis: KpiResult,
    pub(crate) report: ScoreReport,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllocationRequest {
    pub(crate) offshore_wind: u16,
    pub(crate) grid_modernization: u16,
    pub(crate) data_center: u16,
    #[serde(default)]
    pub(crate) budget_millions: Option<f64>,
}

pub(crate) fn simulator_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/catalog", get(catalog_endpoint))
        .route("/api/v1/kpis/category", post(category_score_endpoint))
        .route("/api/v1/kpis/overall", post(overall_score_endpoint))
        .route("/api/v1/investment/allocation", post(allocation_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint() -> Json<CatalogView> {
    Json(catalog_view())
}

pub(crate) async fn category_score_endpoint(
    Json(payload): Json<CategoryScoreRequest>,
) -> Result<Json<CategoryScoreResponse>, AppError> {
    let CategoryScoreRequest {
        category,
        selection,
        weight_table,
    } = payload;

    let kpis = match (&weight_table, category) {
        (Some(table), _) => score_category(&selection, table),
        (None, Some(category)) => score_category(&selection, category.weight_table()),
        (None, None) => {
            return Err(AppError::InvalidRequest(
                "provide either `category` or `weight_table`".to_string(),
            ))
        }
    };
    debug!(?category, decisions = selection.len(), "scored category selection");

    let summary = kpis.summary(KPI_PRECISION);
    Ok(Json(CategoryScoreResponse {
        category,
        kpis,
        summary,
    }))
}

pub(crate) async fn overall_score_endpoint(
    Json(selections): Json<CategorySelections>,
) -> Json<OverallScoreResponse> {
    let report = score_report(&selections);
    Json(OverallScoreResponse {
        kpis: report.overall_result(),
        report,
    })
}

pub(crate) async fn allocation_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AllocationRequest>,
) -> Result<Json<AllocationReport>, AppError> {
    let AllocationRequest {
        offshore_wind,
        grid_modernization,
        data_center,
        budget_millions,
    } = payload;

    let budget = budget_millions.unwrap_or(state.budget_millions);
    if !(budget.is_finite() && budget > 0.0) {
        return Err(AppError::InvalidRequest(format!(
            "budget_millions must be positive (got {budget})"
        )));
    }

    let allocation = InvestmentAllocation {
        offshore_wind,
        grid_modernization,
        data_center,
    };
    Ok(Json(allocation.report(budget)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::collections::BTreeMap;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use strategy_sim::scoring::{Kpi, KpiWeights};
    use tower::ServiceExt;

    fn test_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            budget_millions: 500.0,
        }
    }

    #[tokio::test]
    async fn category_endpoint_scores_against_named_catalog() {
        let request = CategoryScoreRequest {
            category: Some(Category::GoToMarket),
            selection: BTreeMap::from([(
                "Marketing Investment".to_string(),
                "Medium".to_string(),
            )]),
            weight_table: None,
        };

        let Json(body) = category_score_endpoint(Json(request))
            .await
            .expect("category scores");

        assert_eq!(body.kpis.get(Kpi::RevenueGrowth), 6.2);
        assert_eq!(body.kpis.get(Kpi::OperatingMargin), 9.8);
        assert_eq!(body.summary.len(), 5);
    }

    #[tokio::test]
    async fn category_endpoint_prefers_supplied_weight_table() {
        let table = WeightTable::from([(
            "Pilot Program".to_string(),
            KpiWeights::from([(Kpi::MarketShare, 1.5)]),
        )]);
        let request = CategoryScoreRequest {
            category: Some(Category::Corporate),
            selection: BTreeMap::from([("Pilot Program".to_string(), "High".to_string())]),
            weight_table: Some(table),
        };

        let Json(body) = category_score_endpoint(Json(request))
            .await
            .expect("category scores");

        assert_eq!(body.kpis.get(Kpi::MarketShare), 19.5);
        assert_eq!(body.kpis.get(Kpi::RevenueGrowth), 5.0);
    }

    #[tokio::test]
    async fn category_endpoint_requires_a_table_source() {
        let request = CategoryScoreRequest {
            category: None,
            selection: DecisionSelection::new(),
            weight_table: None,
        };

        let err = category_score_endpoint(Json(request))
            .await
            .expect_err("missing table rejected");
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn overall_route_returns_combined_report() {
        let app = simulator_routes().layer(Extension(test_state(true)));
        let body = json!({
            "go_to_market": { "Marketing Investment": "Medium" },
            "corporate": { "Digital Transformation": "Low" },
            "unknown_page": { "Anything": "High" }
        });

        let response = app
            .oneshot(
                Request::post("/api/v1/kpis/overall")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(payload["kpis"]["Revenue Growth (%)"], 6.6);
        assert_eq!(payload["report"]["categories"].as_array().map(Vec::len), Some(4));
        assert_eq!(
            payload.as_object().map(|fields| fields.len()),
            Some(2),
            "overall response carries only kpis and report"
        );
    }

    #[tokio::test]
    async fn overall_endpoint_kpis_agree_with_report_and_repeat() {
        let mut selections = CategorySelections::default();
        selections
            .select(Category::ProductRnd, "High Voltage Cable R&D", "High")
            .select(Category::PlantsManagement, "Automation & Efficiency", "Low");

        let Json(first) = overall_score_endpoint(Json(selections.clone())).await;
        let Json(second) = overall_score_endpoint(Json(selections)).await;

        for entry in &first.report.overall {
            assert_eq!(first.kpis.get(entry.kpi), entry.value);
        }
        assert_eq!(first.kpis, second.kpis);
        assert_eq!(first.report, second.report);
    }

    #[tokio::test]
    async fn allocation_route_rejects_totals_off_one_hundred() {
        let app = simulator_routes().layer(Extension(test_state(true)));
        let body = json!({ "offshore_wind": 50, "grid_modernization": 30, "data_center": 10 });

        let response = app
            .oneshot(
                Request::post("/api/v1/investment/allocation")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert!(payload["error"]
            .as_str()
            .is_some_and(|message| message.contains("90%")));
    }

    #[tokio::test]
    async fn allocation_endpoint_uses_configured_budget() {
        let request = AllocationRequest {
            offshore_wind: 40,
            grid_modernization: 40,
            data_center: 20,
            budget_millions: None,
        };

        let Json(report) = allocation_endpoint(Extension(test_state(true)), Json(request))
            .await
            .expect("allocation valid");

        let amounts: Vec<f64> = report
            .breakdown
            .iter()
            .map(|line| line.amount_millions)
            .collect();
        assert_eq!(amounts, vec![200.0, 200.0, 100.0]);
        assert_eq!(report.kpis[0].value, 5.2);
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let app = simulator_routes().layer(Extension(test_state(false)));
        let response = app
            .oneshot(
                Request::get("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn catalog_endpoint_lists_all_categories() {
        let Json(catalog) = catalog_endpoint().await;
        assert_eq!(catalog.categories.len(), 4);
        assert_eq!(catalog.levels[0].label, "None");
    }
}
