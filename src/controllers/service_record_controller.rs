use crate::dto::account_dto::ApiResponse;
use crate::dto::service_record_dto::{
    CreateServiceRecordRequest, ServiceRecordResponse, UpdateServiceRecordRequest,
};
use crate::models::service_record::ServiceRecord;
use crate::repositories::service_record_repository::ServiceRecordRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

pub struct ServiceRecordController {
    state: AppState,
    repository: ServiceRecordRepository,
    vehicles: VehicleRepository,
}

impl ServiceRecordController {
    pub fn new(state: AppState) -> Self {
        Self {
            repository: ServiceRecordRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            state,
        }
    }

    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreateServiceRecordRequest,
    ) -> Result<ApiResponse<ServiceRecordResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let record = ServiceRecord::new(
            account_id,
            vehicle.id,
            request.performed_on,
            request.odometer_km,
            request.title,
            request.notes,
            request.cost,
            request.next_service_km,
            request.next_service_date,
        );

        if !record.has_next_due() {
            debug!(
                "📋 Servicio sin próxima revisión declarada para {}",
                vehicle.plate
            );
        }

        let saved = self.repository.create(&record).await?;

        // El nuevo registro puede cambiar cuál gobierna el próximo service
        let report = self.state.sync_vehicle_tasks(&vehicle).await;

        let message = match report.warning_message() {
            Some(warning) => format!("Servicio registrado exitosamente. {}", warning),
            None => "Servicio registrado exitosamente".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            ServiceRecordResponse::from(saved),
            message,
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        account_id: Uuid,
    ) -> Result<ServiceRecordResponse, AppError> {
        let record = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Registro de servicio no encontrado".to_string())
            })?;

        Ok(ServiceRecordResponse::from(record))
    }

    pub async fn list_by_account(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> Result<Vec<ServiceRecordResponse>, AppError> {
        let records = self.repository.find_by_account(account_id, vehicle_id).await?;

        Ok(records.into_iter().map(ServiceRecordResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        request: UpdateServiceRecordRequest,
    ) -> Result<ApiResponse<ServiceRecordResponse>, AppError> {
        request.validate()?;

        let record = self
            .repository
            .update(
                id,
                account_id,
                request.performed_on,
                request.odometer_km,
                request.title,
                request.notes,
                request.cost,
                request.next_service_km,
                request.next_service_date,
            )
            .await?;

        let message = match self.sync_if_vehicle_alive(account_id, record.vehicle_id).await? {
            Some(warning) => format!("Servicio actualizado exitosamente. {}", warning),
            None => "Servicio actualizado exitosamente".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            ServiceRecordResponse::from(record),
            message,
        ))
    }

    pub async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<(), AppError> {
        let record = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Registro de servicio no encontrado".to_string())
            })?;

        self.repository.delete(id, account_id).await?;

        // Al borrar el registro puede pasar a gobernar uno anterior
        self.sync_if_vehicle_alive(account_id, record.vehicle_id).await?;

        Ok(())
    }

    /// Resincroniza el vehículo si sigue vivo. El vehículo estaba vivo al
    /// tocar el registro, pero una baja concurrente puede colarse en el
    /// medio; en ese caso no queda nada que disparar.
    async fn sync_if_vehicle_alive(
        &self,
        account_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Option<String>, AppError> {
        match self.vehicles.find_by_id(vehicle_id, account_id).await? {
            Some(vehicle) => {
                let report = self.state.sync_vehicle_tasks(&vehicle).await;
                Ok(report.warning_message())
            }
            None => Ok(None),
        }
    }
}
