use crate::models::tire::{tire_positions, Tire};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct TireRepository {
    pool: PgPool,
}

impl TireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> AppResult<Option<Tire>> {
        let result =
            sqlx::query_as::<_, Tire>("SELECT * FROM tires WHERE id = $1 AND account_id = $2")
                .bind(id)
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(result)
    }

    pub async fn find_by_vehicle(&self, account_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<Tire>> {
        let result = sqlx::query_as::<_, Tire>(
            r#"
            SELECT * FROM tires
            WHERE account_id = $1 AND vehicle_id = $2
            ORDER BY position
            "#,
        )
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
        brand: Option<String>,
        size: Option<String>,
        tread_pattern: Option<String>,
        condition: Option<String>,
        serial_no: Option<String>,
        dot_code: Option<String>,
        installed_km: Option<i32>,
        estimated_lifetime_km: Option<i32>,
        installed_on: Option<chrono::NaiveDate>,
    ) -> AppResult<Tire> {
        // Obtener neumático actual; None en un campo conserva su valor
        let current = self
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Neumático no encontrado".to_string()))?;

        let tire = sqlx::query_as::<_, Tire>(
            r#"
            UPDATE tires
            SET brand = $3, size = $4, tread_pattern = $5, condition = $6,
                serial_no = $7, dot_code = $8, installed_km = $9,
                estimated_lifetime_km = $10, installed_on = $11
            WHERE id = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(brand.or(current.brand))
        .bind(size.or(current.size))
        .bind(tread_pattern.or(current.tread_pattern))
        .bind(condition.or(current.condition))
        .bind(serial_no.or(current.serial_no))
        .bind(dot_code.or(current.dot_code))
        .bind(installed_km.unwrap_or(current.installed_km))
        .bind(estimated_lifetime_km.or(current.estimated_lifetime_km))
        .bind(installed_on.or(current.installed_on))
        .fetch_one(&self.pool)
        .await?;

        Ok(tire)
    }

    /// Alinea las posiciones de neumático con la configuración de ejes del
    /// vehículo: crea vacías las que faltan y elimina las que sobran.
    /// Las posiciones existentes no se tocan.
    pub async fn sync_positions(&self, vehicle: &Vehicle) -> AppResult<Vec<Tire>> {
        let desired = tire_positions(vehicle.axle_count, vehicle.dual_rear_wheels);

        let existing = self.find_by_vehicle(vehicle.account_id, vehicle.id).await?;
        let existing_positions: Vec<&str> =
            existing.iter().map(|t| t.position.as_str()).collect();

        let mut created = 0u32;
        for position in &desired {
            if !existing_positions.contains(&position.as_str()) {
                let tire = Tire::empty(
                    vehicle.account_id,
                    vehicle.id,
                    position.clone(),
                    vehicle.current_km,
                );
                sqlx::query(
                    r#"
                    INSERT INTO tires (
                        id, account_id, vehicle_id, position, brand, size,
                        tread_pattern, condition, serial_no, dot_code,
                        installed_km, estimated_lifetime_km, installed_on, created_at
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                    ON CONFLICT (vehicle_id, position) DO NOTHING
                    "#,
                )
                .bind(tire.id)
                .bind(tire.account_id)
                .bind(tire.vehicle_id)
                .bind(&tire.position)
                .bind(&tire.brand)
                .bind(&tire.size)
                .bind(&tire.tread_pattern)
                .bind(&tire.condition)
                .bind(&tire.serial_no)
                .bind(&tire.dot_code)
                .bind(tire.installed_km)
                .bind(tire.estimated_lifetime_km)
                .bind(tire.installed_on)
                .bind(tire.created_at)
                .execute(&self.pool)
                .await?;
                created += 1;
            }
        }

        let removed = sqlx::query(
            r#"
            DELETE FROM tires
            WHERE account_id = $1 AND vehicle_id = $2
              AND position <> ALL($3)
            "#,
        )
        .bind(vehicle.account_id)
        .bind(vehicle.id)
        .bind(&desired)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if created > 0 || removed > 0 {
            info!(
                "🛞 Posiciones de neumático sincronizadas para {}: +{} -{}",
                vehicle.plate, created, removed
            );
        }

        self.find_by_vehicle(vehicle.account_id, vehicle.id).await
    }
}
