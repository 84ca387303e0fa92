use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

// Query para el reporte de combustible
#[derive(Debug, Deserialize)]
pub struct FuelReportQuery {
    pub vehicle_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// Resumen de combustible por vehículo (fila de agregación SQL)
#[derive(Debug, Serialize, FromRow)]
pub struct VehicleFuelSummary {
    pub vehicle_id: Uuid,
    pub plate: String,
    pub fill_count: i64,
    pub total_liters: Decimal,
    pub total_cost: Decimal,
    pub average_unit_price: Decimal,
}

// Reporte de combustible. `by_vehicle` viene ordenado por gasto
// descendente: el primer elemento es el vehículo que más gastó.
#[derive(Debug, Serialize)]
pub struct FuelReportResponse {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub fill_count: i64,
    pub total_liters: Decimal,
    pub total_cost: Decimal,
    pub by_vehicle: Vec<VehicleFuelSummary>,
}

// Resumen general de la flota
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub vehicle_count: i64,
    pub open_task_count: i64,
    pub overdue_task_count: i64,
    pub due_soon_task_count: i64,
    pub month_fuel_cost: Decimal,
}
