use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::models::service_record::ServiceRecord;

// Request para registrar un servicio realizado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRecordRequest {
    pub vehicle_id: Uuid,

    pub performed_on: NaiveDate,

    #[validate(range(min = 0))]
    pub odometer_km: i32,

    #[validate(length(min = 2, max = 150))]
    pub title: String,

    pub notes: Option<String>,
    pub cost: Option<Decimal>,

    #[validate(range(min = 1))]
    pub next_service_km: Option<i32>,

    pub next_service_date: Option<NaiveDate>,
}

// Request para corregir un servicio existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRecordRequest {
    pub performed_on: Option<NaiveDate>,

    #[validate(range(min = 0))]
    pub odometer_km: Option<i32>,

    #[validate(length(min = 2, max = 150))]
    pub title: Option<String>,

    pub notes: Option<String>,
    pub cost: Option<Decimal>,

    #[validate(range(min = 1))]
    pub next_service_km: Option<i32>,

    pub next_service_date: Option<NaiveDate>,
}

// Filtro de listado
#[derive(Debug, Deserialize)]
pub struct ServiceRecordFilters {
    pub vehicle_id: Option<Uuid>,
}

// Response de servicio
#[derive(Debug, Serialize)]
pub struct ServiceRecordResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub performed_on: NaiveDate,
    pub odometer_km: i32,
    pub title: String,
    pub notes: Option<String>,
    pub cost: Option<Decimal>,
    pub next_service_km: Option<i32>,
    pub next_service_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceRecord> for ServiceRecordResponse {
    fn from(record: ServiceRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            performed_on: record.performed_on,
            odometer_km: record.odometer_km,
            title: record.title,
            notes: record.notes,
            cost: record.cost,
            next_service_km: record.next_service_km,
            next_service_date: record.next_service_date,
            created_at: record.created_at,
        }
    }
}
