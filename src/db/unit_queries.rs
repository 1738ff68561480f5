use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Unit;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Unit>, sqlx::Error> {
    sqlx::query_as::<_, Unit>(
        "SELECT id, name, is_active, created_at, updated_at
         FROM units
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM units WHERE lower(name) = lower($1))")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn insert(pool: &PgPool, input: Unit) -> Result<Unit, sqlx::Error> {
    sqlx::query_as::<_, Unit>(
        "INSERT INTO units (id, name, is_active, created_at, updated_at)
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

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM units WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
