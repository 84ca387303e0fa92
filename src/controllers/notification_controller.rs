use std::collections::HashMap;

use crate::dto::account_dto::ApiResponse;
use crate::dto::notification_dto::UpcomingNotificationsQuery;
use crate::repositories::store::PgMaintenanceStore;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::notification_projector::{project_upcoming, NotificationItem};
use crate::services::task_synchronizer::{SyncReport, TaskSynchronizer};
use crate::state::AppState;
use crate::utils::errors::AppError;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

pub struct NotificationController {
    state: AppState,
    tasks: TaskRepository,
    vehicles: VehicleRepository,
}

impl NotificationController {
    pub fn new(state: AppState) -> Self {
        Self {
            tasks: TaskRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            state,
        }
    }

    /// Recordatorios que vencen dentro del horizonte, listos para mostrar
    pub async fn upcoming(
        &self,
        account_id: Uuid,
        query: UpcomingNotificationsQuery,
    ) -> Result<Vec<NotificationItem>, AppError> {
        let horizon_days = match query.horizon_days {
            Some(days) if days < 0 => {
                return Err(AppError::BadRequest(
                    "El horizonte no puede ser negativo".to_string(),
                ))
            }
            Some(days) => days,
            None => self.state.reminders.horizon_days,
        };

        let tasks = self.tasks.list_open(account_id, None, None).await?;
        let vehicles = self.vehicles.find_by_account(account_id).await?;
        let plates: HashMap<Uuid, String> =
            vehicles.into_iter().map(|v| (v.id, v.plate)).collect();

        let today = Utc::now().date_naive();
        Ok(project_upcoming(&tasks, &plates, today, horizon_days))
    }

    /// Resincronización de toda la cuenta. El índice único parcial de
    /// tasks cubre la carrera con sincronizaciones por vehículo en curso.
    pub async fn sync(&self, account_id: Uuid) -> Result<ApiResponse<SyncReport>, AppError> {
        let store = PgMaintenanceStore::new(self.state.pool.clone());
        let synchronizer = TaskSynchronizer::new(&store, &self.state.reminders);

        let today = Utc::now().date_naive();
        let report = synchronizer.sync_account(account_id, today).await?;
        info!(
            "🔄 Sincronización de cuenta {}: {} creadas, {} actualizadas, {} cerradas, {} fallas",
            account_id,
            report.created,
            report.updated,
            report.completed,
            report.failures.len()
        );

        let message = match report.warning_message() {
            Some(warning) => warning,
            None => "Sincronización completada".to_string(),
        };

        Ok(ApiResponse::success_with_message(report, message))
    }
}
