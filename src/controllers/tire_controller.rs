use crate::dto::account_dto::ApiResponse;
use crate::dto::tire_dto::{TireResponse, UpdateTireRequest};
use crate::repositories::tire_repository::TireRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;
use validator::Validate;

pub struct TireController {
    state: AppState,
    repository: TireRepository,
    vehicles: VehicleRepository,
}

impl TireController {
    pub fn new(state: AppState) -> Self {
        Self {
            repository: TireRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            state,
        }
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
        account_id: Uuid,
    ) -> Result<Vec<TireResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let tires = self.repository.find_by_vehicle(account_id, vehicle_id).await?;

        Ok(tires
            .into_iter()
            .map(|tire| TireResponse::from_tire(tire, vehicle.current_km))
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        request: UpdateTireRequest,
    ) -> Result<ApiResponse<TireResponse>, AppError> {
        request.validate()?;

        let tire = self
            .repository
            .update(
                id,
                account_id,
                request.brand,
                request.size,
                request.tread_pattern,
                request.condition,
                request.serial_no,
                request.dot_code,
                request.installed_km,
                request.estimated_lifetime_km,
                request.installed_on,
            )
            .await?;

        let vehicle = self
            .vehicles
            .find_by_id(tire.vehicle_id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // La vida útil o el km de montaje afectan la tarea de cambio
        let report = self.state.sync_vehicle_tasks(&vehicle).await;

        let message = match report.warning_message() {
            Some(warning) => format!("Neumático actualizado. {}", warning),
            None => "Neumático actualizado".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            TireResponse::from_tire(tire, vehicle.current_km),
            message,
        ))
    }
}
