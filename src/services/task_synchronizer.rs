//! Sincronizador de tareas
//!
//! Reconcilia la salida del evaluador con las tareas persistidas, un
//! vehículo por vez: crea la tarea que falta, actualiza en el lugar la
//! que cambió y cierra la que dejó de corresponder. Corre en forma
//! síncrona después de cada escritura relevante; como es idempotente,
//! repetirlo con los mismos datos no produce escrituras.
//!
//! Cada categoría se sincroniza de manera independiente: una falla de
//! persistencia se registra en el reporte y no bloquea a las demás.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::config::ReminderConfig;
use crate::models::task::{Task, TaskCategory};
use crate::models::vehicle::Vehicle;
use crate::repositories::store::{MaintenanceStore, TaskDraft};
use crate::services::due_evaluator::{evaluate_vehicle, ObligationAssessment};
use crate::utils::errors::{AppError, AppResult};

/// Resultado agregado de una corrida de sincronización
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub created: u32,
    pub updated: u32,
    pub completed: u32,
    pub failures: Vec<SyncFailure>,
}

/// Falla aislada de una categoría (o de la carga de datos del vehículo
/// cuando `category` es None)
#[derive(Debug, Serialize)]
pub struct SyncFailure {
    pub vehicle_id: Uuid,
    pub category: Option<TaskCategory>,
    pub message: String,
}

impl SyncReport {
    pub fn merge(&mut self, other: SyncReport) {
        self.created += other.created;
        self.updated += other.updated;
        self.completed += other.completed;
        self.failures.extend(other.failures);
    }

    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.completed == 0
    }

    /// Advertencia agregada para adjuntar a la respuesta del request que
    /// disparó la sincronización; None si no hubo fallas.
    pub fn warning_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            None
        } else {
            Some(format!(
                "La sincronización de recordatorios falló en {} operación(es); se reintentará en la próxima escritura",
                self.failures.len()
            ))
        }
    }

    fn record_failure(&mut self, vehicle_id: Uuid, category: Option<TaskCategory>, error: &AppError) {
        self.failures.push(SyncFailure {
            vehicle_id,
            category,
            message: error.to_string(),
        });
    }
}

/// Texto estable para la tarea: ancla la obligación a su fecha o km
/// absolutos. El "faltan N días/km" se calcula recién al presentar,
/// así la resincronización diaria no reescribe tareas sin cambios.
fn task_description(assessment: &ObligationAssessment) -> String {
    let label = match &assessment.subject {
        Some(subject) => format!("{} ({})", assessment.category.label(), subject),
        None => assessment.category.label().to_string(),
    };

    match (assessment.due_date, assessment.due_km) {
        (Some(date), Some(km)) => format!("{}: vence el {} o a los {} km", label, date, km),
        (Some(date), None) => format!("{}: vence el {}", label, date),
        (None, Some(km)) => format!("{}: previsto a los {} km", label, km),
        (None, None) => label,
    }
}

pub struct TaskSynchronizer<'a> {
    store: &'a dyn MaintenanceStore,
    config: &'a ReminderConfig,
}

impl<'a> TaskSynchronizer<'a> {
    pub fn new(store: &'a dyn MaintenanceStore, config: &'a ReminderConfig) -> Self {
        Self { store, config }
    }

    /// Sincroniza todas las categorías de un vehículo. Nunca devuelve
    /// error: las fallas quedan en el reporte.
    pub async fn sync_vehicle(&self, vehicle: &Vehicle, today: NaiveDate) -> SyncReport {
        let mut report = SyncReport::default();

        let service_records = match self
            .store
            .list_service_records(vehicle.account_id, Some(vehicle.id))
            .await
        {
            Ok(records) => records,
            Err(e) => {
                report.record_failure(vehicle.id, None, &e);
                return report;
            }
        };

        let tires = match self.store.list_tires(vehicle.account_id, vehicle.id).await {
            Ok(tires) => tires,
            Err(e) => {
                report.record_failure(vehicle.id, None, &e);
                return report;
            }
        };

        let open_tasks = match self
            .store
            .list_open_tasks(vehicle.account_id, Some(vehicle.id), None)
            .await
        {
            Ok(tasks) => tasks,
            Err(e) => {
                report.record_failure(vehicle.id, None, &e);
                return report;
            }
        };

        let assessments = evaluate_vehicle(vehicle, &service_records, &tires, today, self.config);
        let by_category: HashMap<TaskCategory, &ObligationAssessment> =
            assessments.iter().map(|a| (a.category, a)).collect();

        // Tareas abiertas por categoría, en orden de alta (las más
        // antiguas primero: ante duplicados esa es la que sobrevive)
        let mut open_by_category: HashMap<TaskCategory, Vec<Task>> = HashMap::new();
        for task in open_tasks {
            open_by_category.entry(task.category).or_default().push(task);
        }

        for category in TaskCategory::ALL {
            let open = open_by_category.remove(&category).unwrap_or_default();
            let desired = by_category
                .get(&category)
                .filter(|a| a.status.needs_task())
                .copied();

            if let Err(e) = self
                .sync_category(vehicle, category, desired, open, &mut report)
                .await
            {
                warn!(
                    "⚠️ Falla sincronizando {} de {}: {}",
                    category.as_str(),
                    vehicle.plate,
                    e
                );
                report.record_failure(vehicle.id, Some(category), &e);
            }
        }

        report
    }

    /// Resincronización de toda la cuenta, vehículo por vehículo, con la
    /// misma tolerancia a fallas parciales.
    pub async fn sync_account(&self, account_id: Uuid, today: NaiveDate) -> AppResult<SyncReport> {
        let vehicles = self.store.list_vehicles(account_id).await?;

        let mut report = SyncReport::default();
        for vehicle in &vehicles {
            report.merge(self.sync_vehicle(vehicle, today).await);
        }

        Ok(report)
    }

    async fn sync_category(
        &self,
        vehicle: &Vehicle,
        category: TaskCategory,
        desired: Option<&ObligationAssessment>,
        open: Vec<Task>,
        report: &mut SyncReport,
    ) -> AppResult<()> {
        // Reparación de duplicados: conflicto de integridad, se conserva
        // la tarea más antigua y se cierran las demás
        let mut open_iter = open.into_iter();
        let current = open_iter.next();
        for duplicate in open_iter {
            warn!(
                "⚠️ Tareas abiertas duplicadas para {} / {}: se cierra {}",
                vehicle.plate,
                category.as_str(),
                duplicate.id
            );
            self.store.mark_task_completed(duplicate.id).await?;
            report.completed += 1;
        }

        match (desired, current) {
            // Obligación vigente sin tarea: crear
            (Some(assessment), None) => {
                self.store
                    .upsert_task(TaskDraft {
                        id: None,
                        account_id: vehicle.account_id,
                        vehicle_id: vehicle.id,
                        category,
                        description: task_description(assessment),
                        due_date: assessment.due_date,
                        due_km: assessment.due_km,
                    })
                    .await?;
                report.created += 1;
            }

            // Ya hay tarea abierta: actualizar en el lugar solo si los
            // campos de origen cambiaron; nunca crear una segunda
            (Some(assessment), Some(task)) => {
                let description = task_description(assessment);
                let changed = task.due_date != assessment.due_date
                    || task.due_km != assessment.due_km
                    || task.description != description;

                if changed {
                    self.store
                        .upsert_task(TaskDraft {
                            id: Some(task.id),
                            account_id: vehicle.account_id,
                            vehicle_id: vehicle.id,
                            category,
                            description,
                            due_date: assessment.due_date,
                            due_km: assessment.due_km,
                        })
                        .await?;
                    report.updated += 1;
                }
            }

            // La obligación se cumplió o dejó de informarse: cerrar la
            // tarea sin borrar historia
            (None, Some(task)) => {
                self.store.mark_task_completed(task.id).await?;
                report.completed += 1;
            }

            // En regla y sin tarea: nada que hacer
            (None, None) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service_record::ServiceRecord;
    use crate::models::tire::Tire;
    use chrono::Duration;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Doble de persistencia en memoria con fallas inyectables
    #[derive(Default)]
    struct InMemoryStore {
        vehicles: Mutex<Vec<Vehicle>>,
        service_records: Mutex<Vec<ServiceRecord>>,
        tires: Mutex<Vec<Tire>>,
        tasks: Mutex<Vec<Task>>,
        failing_categories: Mutex<HashSet<TaskCategory>>,
        writes: AtomicU32,
    }

    impl InMemoryStore {
        fn push_vehicle(&self, vehicle: Vehicle) {
            self.vehicles.lock().unwrap().push(vehicle);
        }

        fn push_task(&self, task: Task) {
            self.tasks.lock().unwrap().push(task);
        }

        fn fail_category(&self, category: TaskCategory) {
            self.failing_categories.lock().unwrap().insert(category);
        }

        fn write_count(&self) -> u32 {
            self.writes.load(Ordering::SeqCst)
        }

        fn open_tasks_for(&self, vehicle_id: Uuid, category: TaskCategory) -> Vec<Task> {
            self.tasks
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.vehicle_id == vehicle_id && t.category == category && !t.completed)
                .cloned()
                .collect()
        }

        fn task_by_id(&self, id: Uuid) -> Option<Task> {
            self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned()
        }
    }

    #[async_trait::async_trait]
    impl MaintenanceStore for InMemoryStore {
        async fn list_vehicles(&self, account_id: Uuid) -> AppResult<Vec<Vehicle>> {
            Ok(self
                .vehicles
                .lock()
                .unwrap()
                .iter()
                .filter(|v| v.account_id == account_id && v.deleted_at.is_none())
                .cloned()
                .collect())
        }

        async fn list_service_records(
            &self,
            account_id: Uuid,
            vehicle_id: Option<Uuid>,
        ) -> AppResult<Vec<ServiceRecord>> {
            Ok(self
                .service_records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| {
                    r.account_id == account_id
                        && vehicle_id.map(|v| r.vehicle_id == v).unwrap_or(true)
                })
                .cloned()
                .collect())
        }

        async fn list_tires(&self, account_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<Tire>> {
            Ok(self
                .tires
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.account_id == account_id && t.vehicle_id == vehicle_id)
                .cloned()
                .collect())
        }

        async fn list_open_tasks(
            &self,
            account_id: Uuid,
            vehicle_id: Option<Uuid>,
            category: Option<TaskCategory>,
        ) -> AppResult<Vec<Task>> {
            let mut tasks: Vec<Task> = self
                .tasks
                .lock()
                .unwrap()
                .iter()
                .filter(|t| {
                    t.account_id == account_id
                        && !t.completed
                        && vehicle_id.map(|v| t.vehicle_id == v).unwrap_or(true)
                        && category.map(|c| t.category == c).unwrap_or(true)
                })
                .cloned()
                .collect();
            tasks.sort_by_key(|t| t.created_at);
            Ok(tasks)
        }

        async fn upsert_task(&self, draft: TaskDraft) -> AppResult<Task> {
            if self.failing_categories.lock().unwrap().contains(&draft.category) {
                return Err(AppError::Internal("falla simulada".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);

            let mut tasks = self.tasks.lock().unwrap();
            match draft.id {
                Some(id) => {
                    let task = tasks
                        .iter_mut()
                        .find(|t| t.id == id && !t.completed)
                        .expect("tarea abierta inexistente en el doble de pruebas");
                    task.description = draft.description;
                    task.due_date = draft.due_date;
                    task.due_km = draft.due_km;
                    task.updated_at = chrono::Utc::now();
                    Ok(task.clone())
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
                    tasks.push(task.clone());
                    Ok(task)
                }
            }
        }

        async fn mark_task_completed(&self, task_id: Uuid) -> AppResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut tasks = self.tasks.lock().unwrap();
            if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
                task.completed = true;
                task.completed_at = Some(chrono::Utc::now());
            }
            Ok(())
        }
    }

    fn test_config() -> ReminderConfig {
        ReminderConfig {
            horizon_days: 30,
            service_km_threshold: 500,
            tire_km_threshold: 1000,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn vehicle_with_inspection(days_from_today: i64) -> Vehicle {
        Vehicle::new(
            Uuid::new_v4(),
            "AB 123 CD".to_string(),
            Some("Renault".to_string()),
            Some("Master".to_string()),
            Some(2020),
            59_600,
            2,
            false,
            true,
            Some(today() + Duration::days(days_from_today)),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_sync_creates_task_for_due_soon_inspection() {
        let store = InMemoryStore::default();
        let config = test_config();
        let vehicle = vehicle_with_inspection(20);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        let report = sync.sync_vehicle(&vehicle, today()).await;

        assert_eq!(report.created, 1);
        assert!(report.failures.is_empty());

        let open = store.open_tasks_for(vehicle.id, TaskCategory::Inspection);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].due_date, Some(today() + Duration::days(20)));
        assert!(open[0].is_open());
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let store = InMemoryStore::default();
        let config = test_config();
        let vehicle = vehicle_with_inspection(20);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        sync.sync_vehicle(&vehicle, today()).await;
        let writes_after_first = store.write_count();

        // Segunda corrida con los mismos datos: cero escrituras
        let report = sync.sync_vehicle(&vehicle, today()).await;
        assert!(report.is_noop());
        assert_eq!(store.write_count(), writes_after_first);
    }

    #[tokio::test]
    async fn test_sync_updates_task_in_place_on_date_edit() {
        let store = InMemoryStore::default();
        let config = test_config();
        let mut vehicle = vehicle_with_inspection(10);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        sync.sync_vehicle(&vehicle, today()).await;
        let original = store.open_tasks_for(vehicle.id, TaskCategory::Inspection)[0].clone();

        // Se corrige la fecha de la inspección (sigue dentro del horizonte)
        vehicle.inspection_valid_until = Some(today() + Duration::days(25));
        let report = sync.sync_vehicle(&vehicle, today()).await;

        assert_eq!(report.updated, 1);
        assert_eq!(report.created, 0);

        let open = store.open_tasks_for(vehicle.id, TaskCategory::Inspection);
        // Misma identidad, nueva fecha, sin segunda tarea
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, original.id);
        assert_eq!(open[0].due_date, Some(today() + Duration::days(25)));
    }

    #[tokio::test]
    async fn test_sync_completes_task_on_renewal_beyond_horizon() {
        let store = InMemoryStore::default();
        let config = test_config();
        let mut vehicle = vehicle_with_inspection(5);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        sync.sync_vehicle(&vehicle, today()).await;
        let task_id = store.open_tasks_for(vehicle.id, TaskCategory::Inspection)[0].id;

        // Renovación: la nueva fecha queda fuera del horizonte
        vehicle.inspection_valid_until = Some(today() + Duration::days(365));
        let report = sync.sync_vehicle(&vehicle, today()).await;

        assert_eq!(report.completed, 1);
        assert!(store.open_tasks_for(vehicle.id, TaskCategory::Inspection).is_empty());
        // La tarea cerrada conserva su historia
        let completed = store.task_by_id(task_id).unwrap();
        assert!(completed.completed);
        assert!(completed.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_sync_completes_task_when_obligation_no_longer_reported() {
        let store = InMemoryStore::default();
        let config = test_config();
        let mut vehicle = vehicle_with_inspection(5);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        sync.sync_vehicle(&vehicle, today()).await;

        // La fecha desaparece (p. ej. se borra el dato): la tarea se cierra
        vehicle.inspection_valid_until = None;
        let report = sync.sync_vehicle(&vehicle, today()).await;

        assert_eq!(report.completed, 1);
        assert!(store.open_tasks_for(vehicle.id, TaskCategory::Inspection).is_empty());
    }

    #[tokio::test]
    async fn test_sync_never_creates_duplicate_open_task() {
        let store = InMemoryStore::default();
        let config = test_config();
        let mut vehicle = vehicle_with_inspection(10);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);

        // Corridas sucesivas con ediciones intercaladas
        for days in [10, 12, 8, 15, 15] {
            vehicle.inspection_valid_until = Some(today() + Duration::days(days));
            sync.sync_vehicle(&vehicle, today()).await;
            let open = store.open_tasks_for(vehicle.id, TaskCategory::Inspection);
            assert_eq!(open.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_sync_repairs_duplicate_open_tasks() {
        let store = InMemoryStore::default();
        let config = test_config();
        let vehicle = vehicle_with_inspection(10);
        store.push_vehicle(vehicle.clone());

        // Estado corrupto: dos tareas abiertas para la misma categoría
        let older = Task::new_open(
            vehicle.account_id,
            vehicle.id,
            TaskCategory::Inspection,
            "duplicada vieja".to_string(),
            Some(today() + Duration::days(10)),
            None,
        );
        let mut newer = Task::new_open(
            vehicle.account_id,
            vehicle.id,
            TaskCategory::Inspection,
            "duplicada nueva".to_string(),
            Some(today() + Duration::days(10)),
            None,
        );
        newer.created_at = older.created_at + Duration::seconds(5);
        let older_id = older.id;
        let newer_id = newer.id;
        store.push_task(older);
        store.push_task(newer);

        let sync = TaskSynchronizer::new(&store, &config);
        sync.sync_vehicle(&vehicle, today()).await;

        // Sobrevive la más antigua; la más nueva queda cerrada
        let open = store.open_tasks_for(vehicle.id, TaskCategory::Inspection);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, older_id);
        assert!(store.task_by_id(newer_id).unwrap().completed);
    }

    #[tokio::test]
    async fn test_sync_partial_failure_does_not_block_other_categories() {
        let store = InMemoryStore::default();
        let config = test_config();
        let mut vehicle = vehicle_with_inspection(10);
        vehicle.exhaust_check_due = Some(today() + Duration::days(15));
        store.push_vehicle(vehicle.clone());
        store.fail_category(TaskCategory::Inspection);

        let sync = TaskSynchronizer::new(&store, &config);
        let report = sync.sync_vehicle(&vehicle, today()).await;

        // La inspección falló pero el control de gases se creó igual
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].category, Some(TaskCategory::Inspection));
        assert_eq!(report.created, 1);
        assert_eq!(
            store.open_tasks_for(vehicle.id, TaskCategory::ExhaustCheck).len(),
            1
        );
        assert!(report.warning_message().is_some());
    }

    #[tokio::test]
    async fn test_sync_noop_when_ok_and_no_task() {
        let store = InMemoryStore::default();
        let config = test_config();
        // Inspección a un año: en regla
        let vehicle = vehicle_with_inspection(365);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        let report = sync.sync_vehicle(&vehicle, today()).await;

        assert!(report.is_noop());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_sync_account_covers_all_vehicles() {
        let store = InMemoryStore::default();
        let config = test_config();
        let account_id = Uuid::new_v4();

        let mut first = vehicle_with_inspection(10);
        first.account_id = account_id;
        let mut second = vehicle_with_inspection(20);
        second.account_id = account_id;
        second.plate = "EF 456 GH".to_string();
        store.push_vehicle(first);
        store.push_vehicle(second);

        let sync = TaskSynchronizer::new(&store, &config);
        let report = sync.sync_account(account_id, today()).await.unwrap();

        assert_eq!(report.created, 2);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_sync_task_description_is_stable_across_days() {
        let store = InMemoryStore::default();
        let config = test_config();
        let vehicle = vehicle_with_inspection(20);
        store.push_vehicle(vehicle.clone());

        let sync = TaskSynchronizer::new(&store, &config);
        sync.sync_vehicle(&vehicle, today()).await;
        let writes = store.write_count();

        // Al día siguiente la obligación sigue igual: no se reescribe
        let report = sync.sync_vehicle(&vehicle, today() + Duration::days(1)).await;
        assert!(report.is_noop());
        assert_eq!(store.write_count(), writes);
    }
}
