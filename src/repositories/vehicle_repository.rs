use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, account_id, plate, brand, model, year, current_km,
                axle_count, dual_rear_wheels, subject_to_inspection,
                inspection_valid_until, exhaust_check_due, insurance_valid_until,
                deleted_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.account_id)
        .bind(&vehicle.plate)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.current_km)
        .bind(vehicle.axle_count)
        .bind(vehicle.dual_rear_wheels)
        .bind(vehicle.subject_to_inspection)
        .bind(vehicle.inspection_valid_until)
        .bind(vehicle.exhaust_check_due)
        .bind(vehicle.insurance_valid_until)
        .bind(vehicle.deleted_at)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Busca un vehículo vivo de la cuenta. Los borrados no se devuelven.
    pub async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> AppResult<Option<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND account_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_account(&self, account_id: Uuid) -> AppResult<Vec<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE account_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn count_by_account(&self, account_id: Uuid) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM vehicles WHERE account_id = $1 AND deleted_at IS NULL",
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Unicidad de patente entre vehículos vivos de la cuenta
    pub async fn plate_exists(
        &self,
        account_id: Uuid,
        plate: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE account_id = $1 AND plate = $2 AND deleted_at IS NULL
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(account_id)
        .bind(plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        account_id: Uuid,
        plate: Option<String>,
        brand: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        axle_count: Option<i16>,
        dual_rear_wheels: Option<bool>,
        subject_to_inspection: Option<bool>,
        inspection_valid_until: Option<NaiveDate>,
        exhaust_check_due: Option<NaiveDate>,
        insurance_valid_until: Option<NaiveDate>,
    ) -> AppResult<Vehicle> {
        // Obtener vehículo actual; None en un campo conserva su valor
        let current = self
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $3, brand = $4, model = $5, year = $6,
                axle_count = $7, dual_rear_wheels = $8, subject_to_inspection = $9,
                inspection_valid_until = $10, exhaust_check_due = $11,
                insurance_valid_until = $12
            WHERE id = $1 AND account_id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(plate.unwrap_or(current.plate))
        .bind(brand.or(current.brand))
        .bind(model.or(current.model))
        .bind(year.or(current.year))
        .bind(axle_count.unwrap_or(current.axle_count))
        .bind(dual_rear_wheels.unwrap_or(current.dual_rear_wheels))
        .bind(subject_to_inspection.unwrap_or(current.subject_to_inspection))
        .bind(inspection_valid_until.or(current.inspection_valid_until))
        .bind(exhaust_check_due.or(current.exhaust_check_due))
        .bind(insurance_valid_until.or(current.insurance_valid_until))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Actualiza el odómetro. La condición `current_km <= $3` hace cumplir
    /// la monotonía también a nivel SQL; devuelve None si no hay fila
    /// que cumpla (vehículo inexistente o kilometraje en retroceso).
    pub async fn update_mileage(
        &self,
        id: Uuid,
        account_id: Uuid,
        new_km: i32,
    ) -> AppResult<Option<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET current_km = $3
            WHERE id = $1 AND account_id = $2 AND deleted_at IS NULL
              AND current_km <= $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(new_km)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Borrado lógico: el vehículo deja de aparecer en listados pero su
    /// historial se conserva.
    pub async fn soft_delete(&self, id: Uuid, account_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET deleted_at = $3
            WHERE id = $1 AND account_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
