use crate::dto::account_dto::ApiResponse;
use crate::dto::task_dto::{CreateTaskRequest, TaskFilters, TaskResponse};
use crate::models::task::Task;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

pub struct TaskController {
    repository: TaskRepository,
    vehicles: VehicleRepository,
}

impl TaskController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TaskRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        account_id: Uuid,
        filters: TaskFilters,
    ) -> Result<Vec<TaskResponse>, AppError> {
        let limit = filters
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = filters.offset.unwrap_or(0).max(0);

        let tasks = self
            .repository
            .find_with_filters(
                account_id,
                filters.vehicle_id,
                filters.category,
                filters.include_completed.unwrap_or(false),
                limit,
                offset,
            )
            .await?;

        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    /// Alta manual de un recordatorio. La unicidad de tarea abierta por
    /// (vehículo, categoría) rige igual que para las generadas.
    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreateTaskRequest,
    ) -> Result<ApiResponse<TaskResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let task = Task::new_open(
            account_id,
            vehicle.id,
            request.category,
            request.description,
            request.due_date,
            request.due_km,
        );
        let saved = self.repository.create(&task).await?;
        info!(
            "📌 Tarea manual creada: {} para {}",
            saved.category.label(),
            vehicle.plate
        );

        Ok(ApiResponse::success_with_message(
            TaskResponse::from(saved),
            "Tarea creada exitosamente".to_string(),
        ))
    }

    pub async fn complete(
        &self,
        id: Uuid,
        account_id: Uuid,
    ) -> Result<ApiResponse<TaskResponse>, AppError> {
        let task = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tarea no encontrada".to_string()))?;

        if task.completed {
            return Err(AppError::Conflict("La tarea ya estaba completada".to_string()));
        }

        self.repository.mark_completed(id).await?;

        // Releer para devolver completed_at
        let completed = self
            .repository
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tarea no encontrada".to_string()))?;

        Ok(ApiResponse::success_with_message(
            TaskResponse::from(completed),
            "Tarea completada".to_string(),
        ))
    }
}
