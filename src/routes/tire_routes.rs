use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use crate::controllers::tire_controller::TireController;
use crate::dto::account_dto::ApiResponse;
use crate::dto::tire_dto::{TireResponse, UpdateTireRequest};
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_tire_router() -> Router<AppState> {
    Router::new()
        .route("/vehicle/:vehicle_id", get(list_tires))
        .route("/:id", put(update_tire))
}

async fn list_tires(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<TireResponse>>, AppError> {
    let controller = TireController::new(state);
    let response = controller
        .list_by_vehicle(vehicle_id, account.account_id)
        .await?;
    Ok(Json(response))
}

async fn update_tire(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTireRequest>,
) -> Result<Json<ApiResponse<TireResponse>>, AppError> {
    let controller = TireController::new(state);
    let response = controller.update(id, account.account_id, request).await?;
    Ok(Json(response))
}
