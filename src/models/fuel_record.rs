//! Modelo de FuelRecord
//!
//! Cargas de combustible por vehículo. Solo alimentan los reportes,
//! nunca la lógica de vencimientos. El total se recalcula siempre en el
//! servidor como litros × precio unitario; no se confía en el valor
//! recibido para evitar desvíos.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// FuelRecord - mapea exactamente a la tabla fuel_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FuelRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub vehicle_id: Uuid,
    pub filled_on: NaiveDate,
    pub liters: Decimal,
    pub unit_price: Decimal,
    /// Siempre liters × unit_price, redondeado a 2 decimales
    pub total_cost: Decimal,
    pub odometer_km: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl FuelRecord {
    pub fn new(
        account_id: Uuid,
        vehicle_id: Uuid,
        filled_on: NaiveDate,
        liters: Decimal,
        unit_price: Decimal,
        odometer_km: Option<i32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            vehicle_id,
            filled_on,
            liters,
            unit_price,
            total_cost: compute_total_cost(liters, unit_price),
            odometer_km,
            created_at: Utc::now(),
        }
    }
}

/// Calcular el costo total de una carga
pub fn compute_total_cost(liters: Decimal, unit_price: Decimal) -> Decimal {
    (liters * unit_price).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_compute_total_cost() {
        let total = compute_total_cost(dec("40.5"), dec("1.88"));
        assert_eq!(total, dec("76.14"));
    }

    #[test]
    fn test_compute_total_cost_rounds_to_two_decimals() {
        let total = compute_total_cost(dec("13.333"), dec("1.71"));
        // 22.799430 -> 22.80
        assert_eq!(total, dec("22.80"));
    }

    #[test]
    fn test_compute_total_cost_exact() {
        let total = compute_total_cost(dec("10"), dec("2"));
        assert_eq!(total, dec("20"));
    }
}
