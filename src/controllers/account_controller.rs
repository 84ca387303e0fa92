use crate::dto::account_dto::{
    AccountResponse, ApiResponse, LoginRequest, LoginResponse, RegisterAccountRequest,
};
use crate::models::account::Account;
use crate::repositories::account_repository::AccountRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AccountController {
    repository: AccountRepository,
    jwt: JwtConfig,
}

impl AccountController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            repository: AccountRepository::new(pool),
            jwt,
        }
    }

    pub async fn register(
        &self,
        request: RegisterAccountRequest,
    ) -> Result<ApiResponse<AccountResponse>, AppError> {
        request.validate()?;

        // Verificar que el email no exista
        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?;

        let account = Account::new(request.name, request.email, password_hash);
        let saved = self.repository.create(&account).await?;

        Ok(ApiResponse::success_with_message(
            AccountResponse::from(saved),
            "Cuenta registrada exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        // Buscar cuenta por email
        let account = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &account.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(account.id, &self.jwt)?;

        Ok(LoginResponse::success(
            token,
            account.id.to_string(),
            account.name,
        ))
    }

    pub async fn me(&self, account_id: Uuid) -> Result<AccountResponse, AppError> {
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cuenta no encontrada".to_string()))?;

        Ok(AccountResponse::from(account))
    }
}
