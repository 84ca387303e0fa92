//! Acceso de persistencia del sincronizador
//!
//! El sincronizador y el proyector no hablan con repositorios concretos:
//! trabajan contra el trait `MaintenanceStore`, lo que permite suplantar
//! la base de datos con una implementación en memoria en los tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::service_record::ServiceRecord;
use crate::models::task::{Task, TaskCategory};
use crate::models::tire::Tire;
use crate::models::vehicle::Vehicle;
use crate::repositories::service_record_repository::ServiceRecordRepository;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::tire_repository::TireRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppResult;

/// Estado deseado de una tarea gestionada por el sincronizador.
/// `id` ausente crea; presente actualiza en el lugar.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub id: Option<Uuid>,
    pub account_id: Uuid,
    pub vehicle_id: Uuid,
    pub category: TaskCategory,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub due_km: Option<i32>,
}

#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn list_vehicles(&self, account_id: Uuid) -> AppResult<Vec<Vehicle>>;

    async fn list_service_records(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<ServiceRecord>>;

    async fn list_tires(&self, account_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<Tire>>;

    async fn list_open_tasks(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
        category: Option<TaskCategory>,
    ) -> AppResult<Vec<Task>>;

    async fn upsert_task(&self, draft: TaskDraft) -> AppResult<Task>;

    async fn mark_task_completed(&self, task_id: Uuid) -> AppResult<()>;
}

/// Implementación PostgreSQL sobre los repositorios
pub struct PgMaintenanceStore {
    vehicles: VehicleRepository,
    service_records: ServiceRecordRepository,
    tires: TireRepository,
    tasks: TaskRepository,
}

impl PgMaintenanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            service_records: ServiceRecordRepository::new(pool.clone()),
            tires: TireRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool),
        }
    }
}

#[async_trait]
impl MaintenanceStore for PgMaintenanceStore {
    async fn list_vehicles(&self, account_id: Uuid) -> AppResult<Vec<Vehicle>> {
        self.vehicles.find_by_account(account_id).await
    }

    async fn list_service_records(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<ServiceRecord>> {
        self.service_records
            .find_by_account(account_id, vehicle_id)
            .await
    }

    async fn list_tires(&self, account_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<Tire>> {
        self.tires.find_by_vehicle(account_id, vehicle_id).await
    }

    async fn list_open_tasks(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
        category: Option<TaskCategory>,
    ) -> AppResult<Vec<Task>> {
        self.tasks.list_open(account_id, vehicle_id, category).await
    }

    async fn upsert_task(&self, draft: TaskDraft) -> AppResult<Task> {
        match draft.id {
            Some(id) => {
                self.tasks
                    .update_open(id, &draft.description, draft.due_date, draft.due_km)
                    .await
            }
            None => {
                let task = Task::new_open(
                    draft.account_id,
                    draft.vehicle_id,
                    draft.category,
                    draft.description,
                    draft.due_date,
                    draft.due_km,
                );
                self.tasks.create(&task).await
            }
        }
    }

    async fn mark_task_completed(&self, task_id: Uuid) -> AppResult<()> {
        self.tasks.mark_completed(task_id).await?;
        Ok(())
    }
}
