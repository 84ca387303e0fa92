//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod account;
pub mod fuel_record;
pub mod service_record;
pub mod task;
pub mod tire;
pub mod vehicle;
