use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 4, max = 12))]
    pub plate: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(range(min = 0))]
    pub current_km: Option<i32>,

    #[validate(range(min = 1, max = 6))]
    pub axle_count: Option<i16>,

    pub dual_rear_wheels: Option<bool>,

    pub subject_to_inspection: Option<bool>,
    pub inspection_valid_until: Option<NaiveDate>,
    pub exhaust_check_due: Option<NaiveDate>,
    pub insurance_valid_until: Option<NaiveDate>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 4, max = 12))]
    pub plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(range(min = 1, max = 6))]
    pub axle_count: Option<i16>,

    pub dual_rear_wheels: Option<bool>,

    pub subject_to_inspection: Option<bool>,
    pub inspection_valid_until: Option<NaiveDate>,
    pub exhaust_check_due: Option<NaiveDate>,
    pub insurance_valid_until: Option<NaiveDate>,
}

// Request para actualizar kilometraje (solo crece)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMileageRequest {
    #[validate(range(min = 0))]
    pub current_km: i32,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub current_km: i32,
    pub axle_count: i16,
    pub dual_rear_wheels: bool,
    pub subject_to_inspection: bool,
    pub inspection_valid_until: Option<NaiveDate>,
    pub exhaust_check_due: Option<NaiveDate>,
    pub insurance_valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            account_id: vehicle.account_id,
            plate: vehicle.plate,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            current_km: vehicle.current_km,
            axle_count: vehicle.axle_count,
            dual_rear_wheels: vehicle.dual_rear_wheels,
            subject_to_inspection: vehicle.subject_to_inspection,
            inspection_valid_until: vehicle.inspection_valid_until,
            exhaust_check_due: vehicle.exhaust_check_due,
            insurance_valid_until: vehicle.insurance_valid_until,
            created_at: vehicle.created_at,
        }
    }
}
