use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_queries;
use crate::errors::AppError;
use crate::models::{CreateUser, Role, UpdateUser, User, UserProfile};
use crate::services::auth;

pub async fn create(pool: &PgPool, input: CreateUser) -> Result<UserProfile, AppError> {
    if input.username.trim().is_empty() {
        return Err(AppError::Validation("Username cannot be empty".into()));
    }
    if input.email.trim().is_empty() {
        return Err(AppError::Validation("Email cannot be empty".into()));
    }
    if input.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    let market = validate_market(input.role, input.market)?;

    if user_queries::fetch_by_email(pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Validation(
            "A user with this email already exists".into(),
        ));
    }

    let now = chrono::Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username: input.username.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        password_hash: auth::hash_password(&input.password)?,
        role: input.role,
        market,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let user = user_queries::insert(pool, user).await?;
    Ok(user.into())
}

pub async fn update(pool: &PgPool, id: Uuid, input: UpdateUser) -> Result<UserProfile, AppError> {
    if input.username.trim().is_empty() {
        return Err(AppError::Validation("Username cannot be empty".into()));
    }
    let market = validate_market(input.role, input.market)?;

    let user = user_queries::update(
        pool,
        id,
        UpdateUser {
            username: input.username.trim().to_string(),
            role: input.role,
            market,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(user.into())
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<UserProfile>, AppError> {
    let users = user_queries::fetch_all(pool).await?;
    Ok(users.into_iter().map(UserProfile::from).collect())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    match user_queries::delete(pool, id).await? {
        0 => Err(AppError::NotFound("User not found".to_string())),
        _ => Ok(()),
    }
}

// A market assignment is required for officers and meaningless for admins.
fn validate_market(role: Role, market: Option<String>) -> Result<Option<String>, AppError> {
    let market = market.filter(|m| !m.trim().is_empty());
    match role {
        Role::Admin => Ok(None),
        Role::Officer => match market {
            Some(m) => Ok(Some(m)),
            None => Err(AppError::Validation(
                "An officer account requires a market assignment".into(),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_officer_requires_market() {
        assert!(matches!(
            validate_market(Role::Officer, None),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            validate_market(Role::Officer, Some("Pasar Baru".to_string())).unwrap(),
            Some("Pasar Baru".to_string())
        );
    }

    #[test]
    fn test_admin_market_is_cleared() {
        assert_eq!(
            validate_market(Role::Admin, Some("Pasar Baru".to_string())).unwrap(),
            None
        );
    }
}
