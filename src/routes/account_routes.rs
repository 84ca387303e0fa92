use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use crate::controllers::account_controller::AccountController;
use crate::dto::account_dto::{
    AccountResponse, ApiResponse, LoginRequest, LoginResponse, RegisterAccountRequest,
};
use crate::middleware::auth::AuthenticatedAccount;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

/// Rutas públicas: registro y login
pub fn create_account_public_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Rutas protegidas de la cuenta
pub fn create_account_protected_router() -> Router<AppState> {
    Router::new().route("/me", get(get_current_account))
}

fn controller(state: &AppState) -> AccountController {
    AccountController::new(state.pool.clone(), JwtConfig::from(&state.config))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let response = controller(&state).register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = controller(&state).login(request).await?;
    Ok(Json(response))
}

async fn get_current_account(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
) -> Result<Json<AccountResponse>, AppError> {
    let response = controller(&state).me(account.account_id).await?;
    Ok(Json(response))
}
