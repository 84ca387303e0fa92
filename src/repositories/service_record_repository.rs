use crate::models::service_record::ServiceRecord;
use crate::utils::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

// El borrado de vehículos es lógico (deleted_at): el historial de un
// vehículo dado de baja se conserva en la base pero deja de servirse.
const FIND_BY_ID_SQL: &str = r#"
    SELECT * FROM service_records
    WHERE id = $1
      AND account_id = $2
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
"#;

const FIND_BY_ACCOUNT_SQL: &str = r#"
    SELECT * FROM service_records
    WHERE account_id = $1
      AND ($2::uuid IS NULL OR vehicle_id = $2)
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
    ORDER BY performed_on DESC, created_at DESC
"#;

const DELETE_SQL: &str = r#"
    DELETE FROM service_records
    WHERE id = $1
      AND account_id = $2
      AND vehicle_id IN (SELECT id FROM vehicles WHERE deleted_at IS NULL)
"#;

pub struct ServiceRecordRepository {
    pool: PgPool,
}

impl ServiceRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &ServiceRecord) -> AppResult<ServiceRecord> {
        let result = sqlx::query_as::<_, ServiceRecord>(
            r#"
            INSERT INTO service_records (
                id, account_id, vehicle_id, performed_on, odometer_km,
                next_service_km, next_service_date, cost, title, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.account_id)
        .bind(record.vehicle_id)
        .bind(record.performed_on)
        .bind(record.odometer_km)
        .bind(record.next_service_km)
        .bind(record.next_service_date)
        .bind(record.cost)
        .bind(&record.title)
        .bind(&record.notes)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> AppResult<Option<ServiceRecord>> {
        let result = sqlx::query_as::<_, ServiceRecord>(FIND_BY_ID_SQL)
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
    ) -> AppResult<Vec<ServiceRecord>> {
        let result = sqlx::query_as::<_, ServiceRecord>(FIND_BY_ACCOUNT_SQL)
            .bind(account_id)
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        performed_on: Option<NaiveDate>,
        odometer_km: Option<i32>,
        title: Option<String>,
        notes: Option<String>,
        cost: Option<Decimal>,
        next_service_km: Option<i32>,
        next_service_date: Option<NaiveDate>,
    ) -> AppResult<ServiceRecord> {
        // Obtener registro actual; None en un campo conserva su valor
        let current = self
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Registro de servicio no encontrado".to_string()))?;

        let record = sqlx::query_as::<_, ServiceRecord>(
            r#"
            UPDATE service_records
            SET performed_on = $3, odometer_km = $4, title = $5, notes = $6,
                cost = $7, next_service_km = $8, next_service_date = $9
            WHERE id = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(performed_on.unwrap_or(current.performed_on))
        .bind(odometer_km.unwrap_or(current.odometer_km))
        .bind(title.unwrap_or(current.title))
        .bind(notes.or(current.notes))
        .bind(cost.or(current.cost))
        .bind(next_service_km.or(current.next_service_km))
        .bind(next_service_date.or(current.next_service_date))
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
}
