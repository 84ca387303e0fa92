use crate::models::task::{Task, TaskCategory};
use crate::utils::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TaskRepository {
    pool: PgPool,
}

/// Violación del índice único parcial (vehicle_id, category) de tareas abiertas
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta una tarea. Si ya existe una abierta para el mismo
    /// (vehículo, categoría) el índice único responde y se devuelve 409.
    pub async fn create(&self, task: &Task) -> AppResult<Task> {
        let result = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                id, account_id, vehicle_id, category, description,
                due_date, due_km, completed, completed_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(task.id)
        .bind(task.account_id)
        .bind(task.vehicle_id)
        .bind(task.category)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.due_km)
        .bind(task.completed)
        .bind(task.completed_at)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(
                    "Ya existe una tarea abierta para este vehículo y categoría".to_string(),
                )
            } else {
                AppError::from(e)
            }
        })?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> AppResult<Option<Task>> {
        let result =
            sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND account_id = $2")
                .bind(id)
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(result)
    }

    pub async fn find_with_filters(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
        category: Option<TaskCategory>,
        include_completed: bool,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Task>> {
        let result = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE account_id = $1
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::task_category IS NULL OR category = $3)
              AND ($4 OR NOT completed)
            ORDER BY completed ASC, due_date ASC NULLS LAST, created_at ASC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(account_id)
        .bind(vehicle_id)
        .bind(category)
        .bind(include_completed)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Tareas abiertas ordenadas por fecha de alta: ante duplicados el
    /// sincronizador conserva la más antigua.
    pub async fn list_open(
        &self,
        account_id: Uuid,
        vehicle_id: Option<Uuid>,
        category: Option<TaskCategory>,
    ) -> AppResult<Vec<Task>> {
        let result = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE account_id = $1 AND NOT completed
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::task_category IS NULL OR category = $3)
            ORDER BY created_at ASC
            "#,
        )
        .bind(account_id)
        .bind(vehicle_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Actualización en el lugar de una tarea abierta (misma identidad)
    pub async fn update_open(
        &self,
        id: Uuid,
        description: &str,
        due_date: Option<NaiveDate>,
        due_km: Option<i32>,
    ) -> AppResult<Task> {
        let result = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET description = $2, due_date = $3, due_km = $4, updated_at = $5
            WHERE id = $1 AND NOT completed
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(due_date)
        .bind(due_km)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarea abierta no encontrada".to_string()))?;

        Ok(result)
    }

    pub async fn mark_completed(&self, id: Uuid) -> AppResult<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET completed = TRUE, completed_at = $2, updated_at = $2
            WHERE id = $1 AND NOT completed
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Cierra todas las tareas abiertas de un vehículo (borrado lógico)
    pub async fn complete_open_for_vehicle(
        &self,
        account_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<u64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET completed = TRUE, completed_at = $3, updated_at = $3
            WHERE account_id = $1 AND vehicle_id = $2 AND NOT completed
            "#,
        )
        .bind(account_id)
        .bind(vehicle_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Conteos para el tablero: abiertas, vencidas y por vencer dentro
    /// del horizonte (solo tareas con fecha)
    pub async fn open_counts(
        &self,
        account_id: Uuid,
        today: NaiveDate,
        horizon_end: NaiveDate,
    ) -> AppResult<(i64, i64, i64)> {
        let result: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE due_date IS NOT NULL AND due_date < $2),
                   COUNT(*) FILTER (WHERE due_date IS NOT NULL AND due_date >= $2 AND due_date <= $3)
            FROM tasks
            WHERE account_id = $1 AND NOT completed
            "#,
        )
        .bind(account_id)
        .bind(today)
        .bind(horizon_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }
}
