//! Modelo de Tire
//!
//! Un vehículo posee un conjunto fijo de posiciones de neumático derivado
//! de su número de ejes y de si el último eje lleva rueda gemela. Cada
//! posición guarda los atributos del neumático montado y los datos para
//! estimar su vida restante.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tire - mapea exactamente a la tabla tires
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tire {
    pub id: Uuid,
    pub account_id: Uuid,
    pub vehicle_id: Uuid,
    /// Posición en el vehículo, p. ej. "1L", "2RO"
    pub position: String,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub tread_pattern: Option<String>,
    pub condition: Option<String>,
    pub serial_no: Option<String>,
    pub dot_code: Option<String>,
    /// Odómetro del vehículo al montar el neumático
    pub installed_km: i32,
    /// Vida útil estimada en km desde el montaje
    pub estimated_lifetime_km: Option<i32>,
    pub installed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Tire {
    /// Neumático vacío para una posición recién generada
    pub fn empty(account_id: Uuid, vehicle_id: Uuid, position: String, installed_km: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            vehicle_id,
            position,
            brand: None,
            size: None,
            tread_pattern: None,
            condition: None,
            serial_no: None,
            dot_code: None,
            installed_km,
            estimated_lifetime_km: None,
            installed_on: None,
            created_at: Utc::now(),
        }
    }
}

/// Generar las etiquetas de posición de neumático para un vehículo.
///
/// Cada eje aporta una posición izquierda y una derecha (`1L`, `1R`,
/// `2L`, ...). Si el último eje lleva rueda gemela, ese eje aporta
/// cuatro posiciones: exterior e interior por lado (`LO`, `LI`, `RI`,
/// `RO`).
pub fn tire_positions(axle_count: i16, dual_rear_wheels: bool) -> Vec<String> {
    let mut positions = Vec::new();
    if axle_count < 1 {
        return positions;
    }

    for axle in 1..=axle_count {
        let is_dual_axle = dual_rear_wheels && axle == axle_count;
        if is_dual_axle {
            positions.push(format!("{}LO", axle));
            positions.push(format!("{}LI", axle));
            positions.push(format!("{}RI", axle));
            positions.push(format!("{}RO", axle));
        } else {
            positions.push(format!("{}L", axle));
            positions.push(format!("{}R", axle));
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_simple_car() {
        // Turismo: dos ejes, sin gemela
        let positions = tire_positions(2, false);
        assert_eq!(positions, vec!["1L", "1R", "2L", "2R"]);
    }

    #[test]
    fn test_positions_truck_with_dual_rear() {
        // Camión ligero: dos ejes, gemela atrás -> 6 neumáticos
        let positions = tire_positions(2, true);
        assert_eq!(positions, vec!["1L", "1R", "2LO", "2LI", "2RI", "2RO"]);
    }

    #[test]
    fn test_positions_three_axles_dual() {
        let positions = tire_positions(3, true);
        assert_eq!(positions.len(), 8);
        // Solo el último eje lleva gemela
        assert!(positions.contains(&"2L".to_string()));
        assert!(positions.contains(&"3RO".to_string()));
    }

    #[test]
    fn test_positions_invalid_axle_count() {
        assert!(tire_positions(0, false).is_empty());
        assert!(tire_positions(-1, true).is_empty());
    }
}
