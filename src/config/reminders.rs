//! Configuración de recordatorios
//!
//! Umbrales que usa el evaluador de obligaciones: horizonte de aviso
//! para fechas de vencimiento y distancias restantes para servicio
//! y neumáticos.

use std::env;

/// Umbrales configurables del evaluador
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// Ventana de aviso en días para obligaciones con fecha (inspección,
    /// gases, seguro, servicio por fecha) y para la vista de próximos.
    pub horizon_days: i64,
    /// Km restantes a partir de los cuales un servicio por kilometraje
    /// se considera próximo.
    pub service_km_threshold: i32,
    /// Km de vida restante a partir de los cuales un neumático se
    /// considera próximo a cambio.
    pub tire_km_threshold: i32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            service_km_threshold: 500,
            tire_km_threshold: 1000,
        }
    }
}

impl ReminderConfig {
    /// Cargar los umbrales desde variables de entorno, con defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            horizon_days: env::var("REMINDER_HORIZON_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.horizon_days),
            service_km_threshold: env::var("SERVICE_KM_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.service_km_threshold),
            tire_km_threshold: env::var("TIRE_KM_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tire_km_threshold),
        }
    }
}
