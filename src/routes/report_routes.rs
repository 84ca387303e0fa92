use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{DashboardResponse, FuelReportQuery, FuelReportResponse};
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/fuel", get(fuel_report))
        .route("/dashboard", get(dashboard))
}

async fn fuel_report(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Query(query): Query<FuelReportQuery>,
) -> Result<Json<FuelReportResponse>, AppError> {
    let controller = ReportController::new(state);
    let response = controller.fuel_report(account.account_id, query).await?;
    Ok(Json(response))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> Result<Json<DashboardResponse>, AppError> {
    let controller = ReportController::new(state);
    let response = controller.dashboard(account.account_id).await?;
    Ok(Json(response))
}
