//! Modelo de ServiceRecord
//!
//! Un registro histórico de mantenimiento de un vehículo. Es historia
//! inmutable salvo ediciones de corrección. Sus campos `next_service_km`
//! y `next_service_date` alimentan al evaluador de obligaciones.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// ServiceRecord - mapea exactamente a la tabla service_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub vehicle_id: Uuid,
    pub performed_on: NaiveDate,
    /// Odómetro del vehículo al realizar el servicio
    pub odometer_km: i32,
    pub next_service_km: Option<i32>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub title: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ServiceRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: Uuid,
        vehicle_id: Uuid,
        performed_on: NaiveDate,
        odometer_km: i32,
        title: String,
        notes: Option<String>,
        cost: Option<Decimal>,
        next_service_km: Option<i32>,
        next_service_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            vehicle_id,
            performed_on,
            odometer_km,
            next_service_km,
            next_service_date,
            cost,
            title,
            notes,
            created_at: Utc::now(),
        }
    }

    /// Indica si el registro define alguna próxima revisión
    pub fn has_next_due(&self) -> bool {
        self.next_service_km.is_some() || self.next_service_date.is_some()
    }
}

/// Seleccionar el registro de servicio que gobierna la próxima revisión:
/// el más reciente por fecha de realización (desempate por fecha de alta)
/// que declare al menos un criterio de vencimiento.
pub fn latest_with_next_due(records: &[ServiceRecord]) -> Option<&ServiceRecord> {
    records
        .iter()
        .filter(|r| r.has_next_due())
        .max_by_key(|r| (r.performed_on, r.created_at))
}
