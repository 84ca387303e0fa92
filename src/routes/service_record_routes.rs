use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use crate::controllers::service_record_controller::ServiceRecordController;
use crate::dto::account_dto::ApiResponse;
use crate::dto::service_record_dto::{
    CreateServiceRecordRequest, ServiceRecordFilters, ServiceRecordResponse,
    UpdateServiceRecordRequest,
};
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_service_record_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_service_record))
        .route("/", get(list_service_records))
        .route("/:id", get(get_service_record))
        .route("/:id", put(update_service_record))
        .route("/:id", delete(delete_service_record))
}

async fn create_service_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(request): Json<CreateServiceRecordRequest>,
) -> Result<Json<ApiResponse<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state);
    let response = controller.create(account.account_id, request).await?;
    Ok(Json(response))
}

async fn list_service_records(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Query(filters): Query<ServiceRecordFilters>,
) -> Result<Json<Vec<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state);
    let response = controller
        .list_by_account(account.account_id, filters.vehicle_id)
        .await?;
    Ok(Json(response))
}

async fn get_service_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRecordResponse>, AppError> {
    let controller = ServiceRecordController::new(state);
    let response = controller.get_by_id(id, account.account_id).await?;
    Ok(Json(response))
}

async fn update_service_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRecordRequest>,
) -> Result<Json<ApiResponse<ServiceRecordResponse>>, AppError> {
    let controller = ServiceRecordController::new(state);
    let response = controller.update(id, account.account_id, request).await?;
    Ok(Json(response))
}

async fn delete_service_record(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ServiceRecordController::new(state);
    controller.delete(id, account.account_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de servicio eliminado exitosamente"
    })))
}
