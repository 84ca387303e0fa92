use crate::dto::report_dto::VehicleFuelSummary;
use crate::models::fuel_record::{compute_total_cost, FuelRecord};
use crate::utils::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

// Igual que con los servicios, las cargas de vehículos dados de baja
// quedan fuera de listados, lecturas y reportes; sólo persisten en la
// base como historia.
const FIND_BY_ID_SQL: &str = r#"
    SELECT * FROM fuel_records
    WHERE id = $1
      AND account_id = $2
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
"#;

const FIND_BY_ACCOUNT_SQL: &str = r#"
    SELECT * FROM fuel_records
    WHERE account_id = $1
      AND ($2::uuid IS NULL OR vehicle_id = $2)
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
    ORDER BY filled_on DESC, created_at DESC
"#;

const DELETE_SQL: &str = r#"
    DELETE FROM fuel_records
    WHERE id = $1
      AND account_id = $2
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
"#;

const TOTALS_SQL: &str = r#"
    SELECT COUNT(*),
           COALESCE(SUM(liters), 0),
           COALESCE(SUM(total_cost), 0)
    FROM fuel_records
    WHERE account_id = $1
      AND ($2::uuid IS NULL OR vehicle_id = $2)
      AND ($3::date IS NULL OR filled_on >= $3)
      AND ($4::date IS NULL OR filled_on <= $4)
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
"#;

const SUMMARY_BY_VEHICLE_SQL: &str = r#"
    SELECT f.vehicle_id,
           v.plate,
           COUNT(*) AS fill_count,
           SUM(f.liters) AS total_liters,
           SUM(f.total_cost) AS total_cost,
           ROUND(AVG(f.unit_price), 2) AS average_unit_price
    FROM fuel_records f
    JOIN vehicles v ON v.id = f.vehicle_id
    WHERE f.account_id = $1
      AND v.deleted_at IS NULL
      AND ($2::uuid IS NULL OR f.vehicle_id = $2)
      AND ($3::date IS NULL OR f.filled_on >= $3)
      AND ($4::date IS NULL OR f.filled_on <= $4)
    GROUP BY f.vehicle_id, v.plate
    ORDER BY SUM(f.total_cost) DESC
"#;

const COST_BETWEEN_SQL: &str = r#"
    SELECT COALESCE(SUM(total_cost), 0)
    FROM fuel_records
    WHERE account_id = $1
      AND filled_on >= $2
      AND filled_on <= $3
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
"#;

pub struct FuelRecordRepository {
    pool: PgPool,
}

impl FuelRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &FuelRecord) -> AppResult<FuelRecord> {
        let result = sqlx::query_as::<_, FuelRecord>(
            r#"
            INSERT INTO fuel_records (
                id, account_id, vehicle_id, filled_on, liters, unit_price,
                total_cost, odometer_km, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.account_id)
        .bind(record.vehicle_id)
        .bind(record.filled_on)
        .bind(record.liters)
        .bind(record.unit_price)
        .bind(record.total_cost)
        .bind(record.odometer_km)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> AppResult<Option<FuelRecord>> {
        let result = sqlx::query_as::<_, FuelRecord>(FIND_BY_ID_SQL)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_account(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<FuelRecord>> {
        let result = sqlx::query_as::<_, FuelRecord>(FIND_BY_ACCOUNT_SQL)
            .bind(account_id)
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// El total se recalcula aquí a partir de los valores ya combinados;
    /// el total enviado por el cliente nunca se persiste.
    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        filled_on: Option<NaiveDate>,
        liters: Option<Decimal>,
        unit_price: Option<Decimal>,
        odometer_km: Option<i32>,
    ) -> AppResult<FuelRecord> {
        let current = self
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Carga de combustible no encontrada".to_string()))?;

        let liters = liters.unwrap_or(current.liters);
        let unit_price = unit_price.unwrap_or(current.unit_price);
        let total_cost = compute_total_cost(liters, unit_price);

        let record = sqlx::query_as::<_, FuelRecord>(
            r#"
            UPDATE fuel_records
            SET filled_on = $3, liters = $4, unit_price = $5, total_cost = $6,
                odometer_km = $7
            WHERE id = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(filled_on.unwrap_or(current.filled_on))
        .bind(liters)
        .bind(unit_price)
        .bind(total_cost)
        .bind(odometer_km.or(current.odometer_km))
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: Uuid, account_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(DELETE_SQL)
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Totales del período (cantidad de cargas, litros y gasto)
    pub async fn totals(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<(i64, Decimal, Decimal)> {
        let result: (i64, Decimal, Decimal) = sqlx::query_as(TOTALS_SQL)
            .bind(account_id)
            .bind(vehicle_id)
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await?;

        Ok(result)
    }

    /// Agregación por vehículo, ordenada por gasto descendente
    pub async fn summary_by_vehicle(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<VehicleFuelSummary>> {
        let result = sqlx::query_as::<_, VehicleFuelSummary>(SUMMARY_BY_VEHICLE_SQL)
            .bind(account_id)
            .bind(vehicle_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// Gasto de combustible en el rango dado (para el tablero)
    pub async fn cost_between(
        &self,
        account_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Decimal> {
        let result: (Decimal,) = sqlx::query_as(COST_BETWEEN_SQL)
            .bind(account_id)
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
