use crate::dto::report_dto::{DashboardResponse, FuelReportQuery, FuelReportResponse};
use crate::repositories::fuel_record_repository::FuelRecordRepository;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use chrono::{Datelike, Duration, Utc};
use uuid::Uuid;

pub struct ReportController {
    state: AppState,
    fuel: FuelRecordRepository,
    tasks: TaskRepository,
    vehicles: VehicleRepository,
}

impl ReportController {
    pub fn new(state: AppState) -> Self {
        Self {
            fuel: FuelRecordRepository::new(state.pool.clone()),
            tasks: TaskRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            state,
        }
    }

    /// Reporte de combustible del período: totales de la cuenta más la
    /// agregación por vehículo ordenada por gasto descendente.
    pub async fn fuel_report(
        &self,
        account_id: Uuid,
        query: FuelReportQuery,
    ) -> Result<FuelReportResponse, AppError> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AppError::BadRequest(
                    "El rango de fechas está invertido".to_string(),
                ));
            }
        }

        let (fill_count, total_liters, total_cost) = self
            .fuel
            .totals(account_id, query.vehicle_id, query.from, query.to)
            .await?;
        let by_vehicle = self
            .fuel
            .summary_by_vehicle(account_id, query.vehicle_id, query.from, query.to)
            .await?;

        Ok(FuelReportResponse {
            from: query.from,
            to: query.to,
            fill_count,
            total_liters,
            total_cost,
            by_vehicle,
        })
    }

    /// Resumen general: tamaño de flota, estado de tareas y gasto de
    /// combustible del mes en curso.
    pub async fn dashboard(&self, account_id: Uuid) -> Result<DashboardResponse, AppError> {
        let today = Utc::now().date_naive();
        let horizon_end = today + Duration::days(self.state.reminders.horizon_days);
        let month_start = today.with_day(1).unwrap_or(today);

        let vehicle_count = self.vehicles.count_by_account(account_id).await?;
        let (open_task_count, overdue_task_count, due_soon_task_count) =
            self.tasks.open_counts(account_id, today, horizon_end).await?;
        let month_fuel_cost = self.fuel.cost_between(account_id, month_start, today).await?;

        Ok(DashboardResponse {
            vehicle_count,
            open_task_count,
            overdue_task_count,
            due_soon_task_count,
            month_fuel_cost,
        })
    }
}
