use crate::dto::account_dto::ApiResponse;
use crate::dto::fuel_record_dto::{
    CreateFuelRecordRequest, FuelRecordResponse, UpdateFuelRecordRequest,
};
use crate::models::fuel_record::FuelRecord;
use crate::repositories::fuel_record_repository::FuelRecordRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_positive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct FuelRecordController {
    repository: FuelRecordRepository,
    vehicles: VehicleRepository,
}

impl FuelRecordController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FuelRecordRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    fn validate_amounts(liters: Option<Decimal>, unit_price: Option<Decimal>) -> Result<(), AppError> {
        if let Some(liters) = liters {
            validate_positive(liters)
                .map_err(|_| AppError::BadRequest("Los litros deben ser mayores a cero".to_string()))?;
        }
        if let Some(unit_price) = unit_price {
            validate_positive(unit_price).map_err(|_| {
                AppError::BadRequest("El precio unitario debe ser mayor a cero".to_string())
            })?;
        }
        Ok(())
    }

    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreateFuelRecordRequest,
    ) -> Result<ApiResponse<FuelRecordResponse>, AppError> {
        request.validate()?;
        Self::validate_amounts(Some(request.liters), Some(request.unit_price))?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Las cargas no participan de los vencimientos, no hay nada que
        // resincronizar
        let record = FuelRecord::new(
            account_id,
            vehicle.id,
            request.filled_on,
            request.liters,
            request.unit_price,
            request.odometer_km,
        );
        let saved = self.repository.create(&record).await?;

        Ok(ApiResponse::success_with_message(
            FuelRecordResponse::from(saved),
            "Carga de combustible registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        account_id: Uuid,
    ) -> Result<FuelRecordResponse, AppError> {
        let record = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Carga de combustible no encontrada".to_string())
            })?;

        Ok(FuelRecordResponse::from(record))
    }

    pub async fn list_by_account(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> Result<Vec<FuelRecordResponse>, AppError> {
        let records = self.repository.find_by_account(account_id, vehicle_id).await?;

        Ok(records.into_iter().map(FuelRecordResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        request: UpdateFuelRecordRequest,
    ) -> Result<ApiResponse<FuelRecordResponse>, AppError> {
        request.validate()?;
        Self::validate_amounts(request.liters, request.unit_price)?;

        let record = self
            .repository
            .update(
                id,
                account_id,
                request.filled_on,
                request.liters,
                request.unit_price,
                request.odometer_km,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            FuelRecordResponse::from(record),
            "Carga de combustible actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id, account_id).await?;
        if !deleted {
            return Err(AppError::NotFound(
                "Carga de combustible no encontrada".to_string(),
            ));
        }

        Ok(())
    }
}
