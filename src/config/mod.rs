//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno
//! y los umbrales de recordatorios del sistema.

pub mod environment;
pub mod reminders;

pub use environment::*;
pub use reminders::*;
