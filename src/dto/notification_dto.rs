use serde::Deserialize;

// Query para notificaciones próximas. Sin horizon_days se usa el
// horizonte configurado (REMINDER_HORIZON_DAYS, 30 por defecto).
#[derive(Debug, Deserialize)]
pub struct UpcomingNotificationsQuery {
    pub horizon_days: Option<i64>,
}
