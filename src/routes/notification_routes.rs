use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use crate::controllers::notification_controller::NotificationController;
use crate::dto::account_dto::ApiResponse;
use crate::dto::notification_dto::UpcomingNotificationsQuery;
use crate::middleware::auth::AuthenticatedAccount;
use crate::services::notification_projector::NotificationItem;
use crate::services::task_synchronizer::SyncReport;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/upcoming", get(upcoming_notifications))
        .route("/sync", post(sync_account_tasks))
}

async fn upcoming_notifications(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Query(query): Query<UpcomingNotificationsQuery>,
) -> Result<Json<Vec<NotificationItem>>, AppError> {
    let controller = NotificationController::new(state);
    let response = controller.upcoming(account.account_id, query).await?;
    Ok(Json(response))
}

async fn sync_account_tasks(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> Result<Json<ApiResponse<SyncReport>>, AppError> {
    let controller = NotificationController::new(state);
    let response = controller.sync(account.account_id).await?;
    Ok(Json(response))
}
