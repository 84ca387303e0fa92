use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

use crate::models::tire::Tire;

// Request para actualizar un neumático (las posiciones las genera el sistema)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTireRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub size: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub tread_pattern: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub condition: Option<String>,

    pub serial_no: Option<String>,
    pub dot_code: Option<String>,

    #[validate(range(min = 0))]
    pub installed_km: Option<i32>,

    #[validate(range(min = 1))]
    pub estimated_lifetime_km: Option<i32>,

    pub installed_on: Option<NaiveDate>,
}

// Response de neumático con la vida restante estimada
#[derive(Debug, Serialize)]
pub struct TireResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub position: String,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub tread_pattern: Option<String>,
    pub condition: Option<String>,
    pub serial_no: Option<String>,
    pub dot_code: Option<String>,
    pub installed_km: i32,
    pub estimated_lifetime_km: Option<i32>,
    pub installed_on: Option<NaiveDate>,
    /// km estimados antes del cambio; negativo si ya se pasó
    pub remaining_km: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TireResponse {
    pub fn from_tire(tire: Tire, vehicle_current_km: i32) -> Self {
        let remaining_km = tire
            .estimated_lifetime_km
            .map(|lifetime| lifetime - (vehicle_current_km - tire.installed_km));

        Self {
            id: tire.id,
            vehicle_id: tire.vehicle_id,
            position: tire.position,
            brand: tire.brand,
            size: tire.size,
            tread_pattern: tire.tread_pattern,
            condition: tire.condition,
            serial_no: tire.serial_no,
            dot_code: tire.dot_code,
            installed_km: tire.installed_km,
            estimated_lifetime_km: tire.estimated_lifetime_km,
            installed_on: tire.installed_on,
            remaining_km,
            created_at: tire.created_at,
        }
    }
}
