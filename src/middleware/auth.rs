//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT: extracción del token,
//! verificación y carga de la cuenta autenticada en las extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::repositories::account_repository::AccountRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Cuenta autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)
        .map_err(|_| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    let account_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    // Verificar que la cuenta siga existiendo
    let repository = AccountRepository::new(state.pool.clone());
    repository
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Cuenta no encontrada".to_string()))?;

    request
        .extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(request).await)
}
