use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::models::fuel_record::FuelRecord;

// Request para registrar una carga de combustible.
// El total se recalcula en el servidor; no se acepta del cliente.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFuelRecordRequest {
    pub vehicle_id: Uuid,

    pub filled_on: NaiveDate,

    pub liters: Decimal,
    pub unit_price: Decimal,

    #[validate(range(min = 0))]
    pub odometer_km: Option<i32>,
}

// Request para corregir una carga existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFuelRecordRequest {
    pub filled_on: Option<NaiveDate>,

    pub liters: Option<Decimal>,
    pub unit_price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub odometer_km: Option<i32>,
}

// Filtro de listado
#[derive(Debug, Deserialize)]
pub struct FuelRecordFilters {
    pub vehicle_id: Option<Uuid>,
}

// Response de carga de combustible
#[derive(Debug, Serialize)]
pub struct FuelRecordResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub filled_on: NaiveDate,
    pub liters: Decimal,
    pub unit_price: Decimal,
    pub total_cost: Decimal,
    pub odometer_km: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<FuelRecord> for FuelRecordResponse {
    fn from(record: FuelRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            filled_on: record.filled_on,
            liters: record.liters,
            unit_price: record.unit_price,
            total_cost: record.total_cost,
            odometer_km: record.odometer_km,
            created_at: record.created_at,
        }
    }
}
