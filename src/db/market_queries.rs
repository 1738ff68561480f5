use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Market, UpdateMarket};

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Market>, sqlx::Error> {
    sqlx::query_as::<_, Market>(
        "SELECT id, name, is_active, created_at, updated_at
         FROM markets
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

pub async fn insert(pool: &PgPool, input: Market) -> Result<Market, sqlx::Error> {
    sqlx::query_as::<_, Market>(
        "INSERT INTO markets (id, name, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, name, is_active, created_at, updated_at",
    )
    .bind(input.id)
    .bind(input.name)
    .bind(input.is_active)
    .bind(input.created_at)
    .bind(input.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: UpdateMarket,
) -> Result<Option<Market>, sqlx::Error> {
    sqlx::query_as::<_, Market>(
        "UPDATE markets
         SET name = $1, is_active = $2, updated_at = now()
         WHERE id = $3
         RETURNING id, name, is_active, created_at, updated_at",
    )
    .bind(input.name)
    .bind(input.is_active)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM markets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
