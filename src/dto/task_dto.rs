use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

use crate::models::task::{Task, TaskCategory};

// Request para crear una tarea manual
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    pub vehicle_id: Uuid,
    pub category: TaskCategory,

    #[validate(length(min = 2, max = 200))]
    pub description: String,

    pub due_date: Option<NaiveDate>,

    #[validate(range(min = 1))]
    pub due_km: Option<i32>,
}

// Filtros para listado de tareas (por defecto solo las abiertas)
#[derive(Debug, Deserialize)]
pub struct TaskFilters {
    pub vehicle_id: Option<Uuid>,
    pub category: Option<TaskCategory>,
    pub include_completed: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Response de tarea
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub category: TaskCategory,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub due_km: Option<i32>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            vehicle_id: task.vehicle_id,
            category: task.category,
            description: task.description,
            due_date: task.due_date,
            due_km: task.due_km,
            completed: task.completed,
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
