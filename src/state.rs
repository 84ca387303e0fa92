//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: pool de PostgreSQL, configuración y el
//! registro de candados de sincronización por vehículo.

use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::config::reminders::ReminderConfig;
use crate::models::vehicle::Vehicle;
use crate::repositories::store::PgMaintenanceStore;
use crate::services::task_synchronizer::{SyncReport, TaskSynchronizer};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub reminders: ReminderConfig,
    /// Candados por vehículo: dos sincronizaciones sobre el mismo
    /// vehículo no deben intercalarse (el índice único parcial de tasks
    /// es el respaldo del lado del servidor)
    sync_locks: Arc<RwLock<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, reminders: ReminderConfig) -> Self {
        Self {
            pool,
            config,
            reminders,
            sync_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Obtener el candado de sincronización de un vehículo
    async fn vehicle_sync_lock(&self, vehicle_id: Uuid) -> Arc<Mutex<()>> {
        {
            let locks = self.sync_locks.read().await;
            if let Some(lock) = locks.get(&vehicle_id) {
                return lock.clone();
            }
        }

        let mut locks = self.sync_locks.write().await;
        // Mantener el registro acotado: descartar candados sin usuarios
        if locks.len() > 256 {
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        locks
            .entry(vehicle_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Sincronizar las tareas de un vehículo bajo su candado.
    /// Nunca falla: las fallas de persistencia quedan en el reporte.
    pub async fn sync_vehicle_tasks(&self, vehicle: &Vehicle) -> SyncReport {
        let lock = self.vehicle_sync_lock(vehicle.id).await;
        let _guard = lock.lock().await;

        let store = PgMaintenanceStore::new(self.pool.clone());
        let synchronizer = TaskSynchronizer::new(&store, &self.reminders);
        synchronizer
            .sync_vehicle(vehicle, chrono::Utc::now().date_naive())
            .await
    }
}
