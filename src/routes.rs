//! HTTP surface for the admin dashboard

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::Validate;
use crate::domain::{Customer, Order, ReportPeriod};
use crate::report::{CustomerQuery, OrderQuery, ReportFilter, ReportSummary};
use crate::snapshot::SnapshotInfo;
use crate::{ReportError, ReportService};

pub fn router(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "shopprr-report"})) }))
        .route("/api/v1/report/refresh", post(refresh))
        .route("/api/v1/report/summary", get(summary))
        .route("/api/v1/report/monthly-revenue", get(monthly_revenue))
        .route("/api/v1/report/categories", get(categories))
        .route("/api/v1/orders", get(list_orders))
        .route("/api/v1/customers", get(list_customers))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(service)
}

#[derive(Debug)]
pub struct ApiError { status: StatusCode, message: String, retryable: bool }

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        let status = match e {
            ReportError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self { status, retryable: e.is_retryable(), message: e.to_string() }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: e.to_string(), retryable: false }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"success": false, "message": self.message, "retryable": self.retryable});
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    #[validate(range(min = 1970, max = 9999))] pub revenue_year: Option<i32>,
    #[validate(range(min = 1970, max = 9999))] pub year: Option<i32>,
    #[validate(range(min = 1, max = 12))] pub month: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PeriodParams {
    #[validate(range(min = 1970, max = 9999))] pub year: Option<i32>,
    #[validate(range(min = 1, max = 12))] pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MonthlyRevenueResponse {
    pub year: i32,
    pub months: [Decimal; 12],
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse { pub year: i32, pub month: u32, pub categories: BTreeMap<String, u64>, pub empty: bool }

impl SummaryParams {
    fn filter(&self) -> Result<ReportFilter, ReportError> {
        let now = ReportPeriod::current();
        let period = ReportPeriod::new(self.year.unwrap_or(now.year()), self.month.unwrap_or(now.month()))?;
        Ok(ReportFilter { revenue_year: self.revenue_year.unwrap_or(now.year()), category_period: period })
    }
}

impl PeriodParams {
    fn period(&self) -> Result<ReportPeriod, ReportError> {
        let now = ReportPeriod::current();
        Ok(ReportPeriod::new(self.year.unwrap_or(now.year()), self.month.unwrap_or(now.month()))?)
    }
}

async fn refresh(State(s): State<Arc<ReportService>>) -> Result<Json<SnapshotInfo>, ApiError> {
    Ok(Json(s.refresh().await?.info()))
}

async fn summary(State(s): State<Arc<ReportService>>, Query(p): Query<SummaryParams>) -> Result<Json<ReportSummary>, ApiError> {
    p.validate()?;
    Ok(Json(s.summary(&p.filter()?).await?))
}

async fn monthly_revenue(State(s): State<Arc<ReportService>>, Query(p): Query<PeriodParams>) -> Result<Json<MonthlyRevenueResponse>, ApiError> {
    p.validate()?;
    let revenue = s.monthly_revenue(p.year.unwrap_or(ReportPeriod::current().year())).await?;
    Ok(Json(MonthlyRevenueResponse { year: revenue.year, total: revenue.total(), months: revenue.months }))
}

async fn categories(State(s): State<Arc<ReportService>>, Query(p): Query<PeriodParams>) -> Result<Json<CategoryResponse>, ApiError> {
    p.validate()?;
    let breakdown = s.category_breakdown(p.period()?).await?;
    Ok(Json(CategoryResponse {
        year: breakdown.period.year(), month: breakdown.period.month(),
        empty: breakdown.is_empty(), categories: breakdown.categories,
    }))
}

async fn list_orders(State(s): State<Arc<ReportService>>, Query(q): Query<OrderQuery>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(s.orders(&q).await?))
}

async fn list_customers(State(s): State<Arc<ReportService>>, Query(q): Query<CustomerQuery>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(s.customers(&q).await?))
}
