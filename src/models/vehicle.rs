//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle con los campos de seguimiento
//! de obligaciones: inspección (visado), revisión de gases, seguro y
//! odómetro actual. El odómetro es monótono no decreciente.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_id: Uuid,
        plate: String,
        brand: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        current_km: i32,
        axle_count: i16,
        dual_rear_wheels: bool,
        subject_to_inspection: bool,
        inspection_valid_until: Option<NaiveDate>,
        exhaust_check_due: Option<NaiveDate>,
        insurance_valid_until: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            plate,
            brand,
            model,
            year,
            current_km,
            axle_count,
            dual_rear_wheels,
            subject_to_inspection,
            inspection_valid_until,
            exhaust_check_due,
            insurance_valid_until,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }
}
