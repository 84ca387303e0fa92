//! Proyector de notificaciones
//!
//! Vista de solo lectura sobre la colección de tareas: filtra las
//! abiertas cuyo vencimiento cae dentro del horizonte y las anota para
//! presentación (días restantes, patente del vehículo). No escribe nada.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::task::{Task, TaskCategory};

/// Recordatorio próximo, listo para mostrar
#[derive(Debug, Clone, Serialize)]
pub struct NotificationItem {
    pub task_id: Uuid,
    pub vehicle_id: Uuid,
    pub plate: String,
    pub category: TaskCategory,
    pub description: String,
    pub due_date: NaiveDate,
    pub days_remaining: i64,
    pub due_km: Option<i32>,
}

/// Proyectar las tareas próximas a vencer.
///
/// Quedan las tareas abiertas con `0 <= (due_date - today) <= horizon`;
/// las tareas sin fecha no califican. El orden es ascendente por días
/// restantes con desempate por patente, para que el resultado sea
/// determinista. Si nada califica se devuelve un vector vacío.
pub fn project_upcoming(
    tasks: &[Task],
    plates: &HashMap<Uuid, String>,
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<NotificationItem> {
    let mut items: Vec<NotificationItem> = tasks
        .iter()
        .filter(|task| !task.completed)
        .filter_map(|task| {
            let due_date = task.due_date?;
            let days_remaining = (due_date - today).num_days();
            if days_remaining < 0 || days_remaining > horizon_days {
                return None;
            }
            // Sin patente no hay cómo presentarla (vehículo dado de baja)
            let plate = plates.get(&task.vehicle_id)?;

            Some(NotificationItem {
                task_id: task.id,
                vehicle_id: task.vehicle_id,
                plate: plate.clone(),
                category: task.category,
                description: task.description.clone(),
                due_date,
                days_remaining,
                due_km: task.due_km,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        a.days_remaining
            .cmp(&b.days_remaining)
            .then_with(|| a.plate.cmp(&b.plate))
    });

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn open_task(
        vehicle_id: Uuid,
        category: TaskCategory,
        due_in_days: Option<i64>,
    ) -> Task {
        Task::new_open(
            Uuid::new_v4(),
            vehicle_id,
            category,
            format!("{} de prueba", category.label()),
            due_in_days.map(|d| today() + Duration::days(d)),
            None,
        )
    }

    fn plates_for(entries: &[(Uuid, &str)]) -> HashMap<Uuid, String> {
        entries
            .iter()
            .map(|(id, plate)| (*id, plate.to_string()))
            .collect()
    }

    #[test]
    fn test_projector_orders_by_days_remaining() {
        let vehicle = Uuid::new_v4();
        let plates = plates_for(&[(vehicle, "AB 123 CD")]);

        // Inspección a 20 días y neumáticos a 25: la inspección va primero
        let tire = open_task(vehicle, TaskCategory::TireChange, Some(25));
        let inspection = open_task(vehicle, TaskCategory::Inspection, Some(20));

        let items = project_upcoming(&[tire, inspection], &plates, today(), 30);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, TaskCategory::Inspection);
        assert_eq!(items[0].days_remaining, 20);
        assert_eq!(items[1].category, TaskCategory::TireChange);
        assert_eq!(items[1].days_remaining, 25);
    }

    #[test]
    fn test_projector_window_bounds() {
        let vehicle = Uuid::new_v4();
        let plates = plates_for(&[(vehicle, "AB 123 CD")]);

        let due_today = open_task(vehicle, TaskCategory::Inspection, Some(0));
        let at_horizon = open_task(vehicle, TaskCategory::ExhaustCheck, Some(30));
        let beyond = open_task(vehicle, TaskCategory::Insurance, Some(31));
        let overdue = open_task(vehicle, TaskCategory::Service, Some(-1));

        let items = project_upcoming(
            &[due_today, at_horizon, beyond, overdue],
            &plates,
            today(),
            30,
        );

        // Hoy y el borde del horizonte entran; más allá y lo vencido no
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].days_remaining, 0);
        assert_eq!(items[1].days_remaining, 30);
    }

    #[test]
    fn test_projector_skips_completed_and_undated() {
        let vehicle = Uuid::new_v4();
        let plates = plates_for(&[(vehicle, "AB 123 CD")]);

        let mut completed = open_task(vehicle, TaskCategory::Inspection, Some(10));
        completed.completed = true;
        let undated = open_task(vehicle, TaskCategory::Service, None);

        let items = project_upcoming(&[completed, undated], &plates, today(), 30);

        assert!(items.is_empty());
    }

    #[test]
    fn test_projector_ties_broken_by_plate() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let plates = plates_for(&[(first, "ZZ 999 ZZ"), (second, "AA 111 AA")]);

        let task_z = open_task(first, TaskCategory::Inspection, Some(10));
        let task_a = open_task(second, TaskCategory::Inspection, Some(10));

        let items = project_upcoming(&[task_z, task_a], &plates, today(), 30);

        assert_eq!(items[0].plate, "AA 111 AA");
        assert_eq!(items[1].plate, "ZZ 999 ZZ");
    }

    #[test]
    fn test_projector_skips_unknown_vehicles() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let plates = plates_for(&[(known, "AB 123 CD")]);

        let visible = open_task(known, TaskCategory::Inspection, Some(5));
        let ghost = open_task(unknown, TaskCategory::Service, Some(5));

        let items = project_upcoming(&[visible, ghost], &plates, today(), 30);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].plate, "AB 123 CD");
    }

    #[test]
    fn test_projector_empty_input_yields_empty_output() {
        let plates = HashMap::new();
        let items = project_upcoming(&[], &plates, today(), 30);
        assert!(items.is_empty());
    }
}
