//! Modelo de Task
//!
//! Tareas de mantenimiento pendientes o completadas por vehículo.
//! Mapea exactamente a la tabla tasks. La unicidad de tareas abiertas
//! por (vehicle_id, category) la garantiza un índice parcial en la base
//! de datos; el sincronizador depende de ese invariante.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Categoría de tarea - mapea al ENUM task_category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "task_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Inspection,
    ExhaustCheck,
    Service,
    Insurance,
    TireChange,
}

impl TaskCategory {
    /// Todas las categorías que el sincronizador puede generar
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Inspection,
        TaskCategory::ExhaustCheck,
        TaskCategory::Service,
        TaskCategory::Insurance,
        TaskCategory::TireChange,
    ];

    /// Identificador estable, igual al valor del ENUM en PostgreSQL
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Inspection => "inspection",
            TaskCategory::ExhaustCheck => "exhaust_check",
            TaskCategory::Service => "service",
            TaskCategory::Insurance => "insurance",
            TaskCategory::TireChange => "tire_change",
        }
    }

    /// Etiqueta legible para resúmenes y notificaciones
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Inspection => "Revisión técnica",
            TaskCategory::ExhaustCheck => "Control de gases",
            TaskCategory::Service => "Service",
            TaskCategory::Insurance => "Seguro",
            TaskCategory::TireChange => "Cambio de neumáticos",
        }
    }
}

/// Task principal - mapea exactamente a la tabla tasks
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub account_id: Uuid,
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

impl Task {
    /// Tarea abierta recién creada
    pub fn new_open(
        account_id: Uuid,
        vehicle_id: Uuid,
        category: TaskCategory,
        description: String,
        due_date: Option<NaiveDate>,
        due_km: Option<i32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            vehicle_id,
            category,
            description,
            due_date,
            due_km,
            completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str_matches_enum_values() {
        assert_eq!(TaskCategory::Inspection.as_str(), "inspection");
        assert_eq!(TaskCategory::ExhaustCheck.as_str(), "exhaust_check");
        assert_eq!(TaskCategory::TireChange.as_str(), "tire_change");
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&TaskCategory::ExhaustCheck).unwrap();
        assert_eq!(json, "\"exhaust_check\"");

        let parsed: TaskCategory = serde_json::from_str("\"tire_change\"").unwrap();
        assert_eq!(parsed, TaskCategory::TireChange);
    }
}
