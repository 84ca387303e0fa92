//! Services module
//!
//! Este módulo contiene la lógica de negocio de mantenimiento: el
//! evaluador de vencimientos (puro), el sincronizador de tareas y el
//! proyector de notificaciones.

pub mod due_evaluator;
pub mod notification_projector;
pub mod task_synchronizer;

pub use due_evaluator::{evaluate_vehicle, DueStatus, ObligationAssessment};
pub use notification_projector::{project_upcoming, NotificationItem};
pub use task_synchronizer::{SyncFailure, SyncReport, TaskSynchronizer};
