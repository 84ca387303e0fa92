//! DTOs de la API
//!
//! Requests, responses y filtros por entidad. La response genérica
//! `ApiResponse<T>` vive en `account_dto`.

pub mod account_dto;
pub mod fuel_record_dto;
pub mod notification_dto;
pub mod report_dto;
pub mod service_record_dto;
pub mod task_dto;
pub mod tire_dto;
pub mod vehicle_dto;
