use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use crate::controllers::fuel_record_controller::FuelRecordController;
use crate::dto::account_dto::ApiResponse;
use crate::dto::fuel_record_dto::{
    CreateFuelRecordRequest, FuelRecordFilters, FuelRecordResponse, UpdateFuelRecordRequest,
};
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_fuel_record_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fuel_record))
        .route("/", get(list_fuel_records))
        .route("/:id", get(get_fuel_record))
        .route("/:id", put(update_fuel_record))
        .route("/:id", delete(delete_fuel_record))
}

async fn create_fuel_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(request): Json<CreateFuelRecordRequest>,
) -> Result<Json<ApiResponse<FuelRecordResponse>>, AppError> {
    let controller = FuelRecordController::new(state.pool.clone());
    let response = controller.create(account.account_id, request).await?;
    Ok(Json(response))
}

async fn list_fuel_records(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Query(filters): Query<FuelRecordFilters>,
) -> Result<Json<Vec<FuelRecordResponse>>, AppError> {
    let controller = FuelRecordController::new(state.pool.clone());
    let response = controller
        .list_by_account(account.account_id, filters.vehicle_id)
        .await?;
    Ok(Json(response))
}

async fn get_fuel_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<FuelRecordResponse>, AppError> {
    let controller = FuelRecordController::new(state.pool.clone());
    let response = controller.get_by_id(id, account.account_id).await?;
    Ok(Json(response))
}

async fn update_fuel_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFuelRecordRequest>,
) -> Result<Json<ApiResponse<FuelRecordResponse>>, AppError> {
    let controller = FuelRecordController::new(state.pool.clone());
    let response = controller.update(id, account.account_id, request).await?;
    Ok(Json(response))
}

async fn delete_fuel_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = FuelRecordController::new(state.pool.clone());
    controller.delete(id, account.account_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Carga de combustible eliminada exitosamente"
    })))
}
