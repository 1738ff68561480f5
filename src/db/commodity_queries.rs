use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Commodity, UpdateCommodity};

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Commodity>, sqlx::Error> {
    sqlx::query_as::<_, Commodity>(
        "SELECT id, name, unit, is_active, created_at, updated_at
         FROM commodities
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Commodity>, sqlx::Error> {
    sqlx::query_as::<_, Commodity>(
        "SELECT id, name, unit, is_active, created_at, updated_at
         FROM commodities
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(pool: &PgPool, input: Commodity) -> Result<Commodity, sqlx::Error> {
    sqlx::query_as::<_, Commodity>(
        "INSERT INTO commodities (id, name, unit, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, name, unit, is_active, created_at, updated_at",
    )
    .bind(input.id)
    .bind(input.name)
    .bind(input.unit)
    .bind(input.is_active)
    .bind(input.created_at)
    .bind(input.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: UpdateCommodity,
) -> Result<Option<Commodity>, sqlx::Error> {
    sqlx::query_as::<_, Commodity>(
        "UPDATE commodities
         SET name = $1, unit = $2, is_active = $3, updated_at = now()
         WHERE id = $4
         RETURNING id, name, unit, is_active, created_at, updated_at",
    )
    .bind(input.name)
    .bind(input.unit)
    .bind(input.is_active)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM commodities WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
