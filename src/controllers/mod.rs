//! Controladores de la API
//!
//! Cada controlador concentra la lógica de un recurso: validación de
//! entrada, chequeos de pertenencia a la cuenta y orquestación de
//! repositorios y sincronización de tareas.

pub mod account_controller;
pub mod fuel_record_controller;
pub mod notification_controller;
pub mod report_controller;
pub mod service_record_controller;
pub mod task_controller;
pub mod tire_controller;
pub mod vehicle_controller;
