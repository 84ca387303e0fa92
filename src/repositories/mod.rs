//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad sobre el pool de PostgreSQL, con queries
//! verificadas en runtime. Toda query filtra por `account_id`.

pub mod account_repository;
pub mod fuel_record_repository;
pub mod service_record_repository;
pub mod store;
pub mod task_repository;
pub mod tire_repository;
pub mod vehicle_repository;

pub use account_repository::AccountRepository;
pub use fuel_record_repository::FuelRecordRepository;
pub use service_record_repository::ServiceRecordRepository;
pub use store::{MaintenanceStore, PgMaintenanceStore, TaskDraft};
pub use task_repository::TaskRepository;
pub use tire_repository::TireRepository;
pub use vehicle_repository::VehicleRepository;
