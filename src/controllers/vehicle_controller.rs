use crate::dto::account_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateMileageRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::tire_repository::TireRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_license_plate;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    state: AppState,
    repository: VehicleRepository,
    tires: TireRepository,
    tasks: TaskRepository,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.pool.clone()),
            tires: TireRepository::new(state.pool.clone()),
            tasks: TaskRepository::new(state.pool.clone()),
            state,
        }
    }

    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;
        validate_license_plate(&request.plate)
            .map_err(|_| AppError::BadRequest("Formato de patente inválido".to_string()))?;

        // Verificar que la patente no exista entre los vehículos vivos
        if self
            .repository
            .plate_exists(account_id, &request.plate, None)
            .await?
        {
            return Err(AppError::Conflict(
                "La patente ya está registrada".to_string(),
            ));
        }

        let vehicle = Vehicle::new(
            account_id,
            request.plate,
            Some(request.brand),
            Some(request.model),
            request.year,
            request.current_km.unwrap_or(0),
            request.axle_count.unwrap_or(2),
            request.dual_rear_wheels.unwrap_or(false),
            request.subject_to_inspection.unwrap_or(true),
            request.inspection_valid_until,
            request.exhaust_check_due,
            request.insurance_valid_until,
        );
        let saved = self.repository.create(&vehicle).await?;
        info!("🚚 Vehículo creado: {} ({})", saved.plate, saved.id);

        // Posiciones de neumático según la configuración de ejes
        self.tires.sync_positions(&saved).await?;

        // Las fechas cargadas pueden estar ya vencidas o por vencer
        let report = self.state.sync_vehicle_tasks(&saved).await;

        let message = match report.warning_message() {
            Some(warning) => format!("Vehículo creado exitosamente. {}", warning),
            None => "Vehículo creado exitosamente".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            message,
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        account_id: Uuid,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_account(account_id).await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if let Some(plate) = &request.plate {
            validate_license_plate(plate)
                .map_err(|_| AppError::BadRequest("Formato de patente inválido".to_string()))?;

            if self.repository.plate_exists(account_id, plate, Some(id)).await? {
                return Err(AppError::Conflict(
                    "La patente ya está registrada".to_string(),
                ));
            }
        }

        let axle_config_changed =
            request.axle_count.is_some() || request.dual_rear_wheels.is_some();

        let vehicle = self
            .repository
            .update(
                id,
                account_id,
                request.plate,
                request.brand,
                request.model,
                request.year,
                request.axle_count,
                request.dual_rear_wheels,
                request.subject_to_inspection,
                request.inspection_valid_until,
                request.exhaust_check_due,
                request.insurance_valid_until,
            )
            .await?;

        if axle_config_changed {
            self.tires.sync_positions(&vehicle).await?;
        }

        // Las fechas de obligación pueden haber cambiado
        let report = self.state.sync_vehicle_tasks(&vehicle).await;

        let message = match report.warning_message() {
            Some(warning) => format!("Vehículo actualizado exitosamente. {}", warning),
            None => "Vehículo actualizado exitosamente".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            message,
        ))
    }

    pub async fn update_mileage(
        &self,
        id: Uuid,
        account_id: Uuid,
        request: UpdateMileageRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if request.current_km < current.current_km {
            return Err(AppError::BadRequest(format!(
                "El kilometraje no puede retroceder: actual {} km, recibido {} km",
                current.current_km, request.current_km
            )));
        }

        // La condición SQL vuelve a chequear la monotonía por si otro
        // request actualizó el odómetro en el medio
        let vehicle = self
            .repository
            .update_mileage(id, account_id, request.current_km)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "El kilometraje fue actualizado por otra operación".to_string(),
                )
            })?;

        info!(
            "🧭 Odómetro actualizado: {} => {} km",
            vehicle.plate, vehicle.current_km
        );

        // El avance del odómetro puede disparar service o neumáticos
        let report = self.state.sync_vehicle_tasks(&vehicle).await;

        let message = match report.warning_message() {
            Some(warning) => format!("Kilometraje actualizado. {}", warning),
            None => "Kilometraje actualizado".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            message,
        ))
    }

    pub async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<(), AppError> {
        let vehicle = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Cerrar las tareas abiertas antes del borrado lógico
        let closed = self
            .tasks
            .complete_open_for_vehicle(account_id, vehicle.id)
            .await?;

        self.repository.soft_delete(id, account_id).await?;
        info!(
            "🗑️ Vehículo eliminado: {} ({} tareas cerradas)",
            vehicle.plate, closed
        );

        Ok(())
    }
}
