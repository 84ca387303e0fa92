use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use crate::controllers::task_controller::TaskController;
use crate::dto::account_dto::ApiResponse;
use crate::dto::task_dto::{CreateTaskRequest, TaskFilters, TaskResponse};
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_task_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/", post(create_task))
        .route("/:id/complete", put(complete_task))
}

async fn list_tasks(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Query(filters): Query<TaskFilters>,
) -> Result<Json<Vec<TaskResponse>>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    let response = controller.list(account.account_id, filters).await?;
    Ok(Json(response))
}

async fn create_task(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<ApiResponse<TaskResponse>>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    let response = controller.create(account.account_id, request).await?;
    Ok(Json(response))
}

async fn complete_task(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TaskResponse>>, AppError> {
    let controller = TaskController::new(state.pool.clone());
    let response = controller.complete(id, account.account_id).await?;
    Ok(Json(response))
}
