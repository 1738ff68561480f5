use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::async_trait;
use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::user_queries;
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, Role, User};
use crate::state::AppState;

const TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub market: Option<String>,
    pub exp: usize,
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Validation(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn create_token(user: &User, secret: &str) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role,
        market: user.market.clone(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::Unauthorized)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

pub async fn login(
    pool: &PgPool,
    secret: &str,
    input: LoginRequest,
) -> Result<LoginResponse, AppError> {
    let user = user_queries::fetch_by_email(pool, &input.email)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&input.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    info!("User {} logged in", user.username);
    let token = create_token(&user, secret)?;
    Ok(LoginResponse {
        token,
        user: user.into(),
    })
}

/// The caller's scope, read from the bearer token. Admins see every market;
/// officers are clamped to their assigned one.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub market: Option<String>,
}

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Officer => Err(AppError::Forbidden),
        }
    }

    /// Which market a write or a worksheet view targets. Admins must name
    /// one; officers default to their assigned market and may not name
    /// another.
    pub fn resolve_market(&self, requested: Option<String>) -> Result<String, AppError> {
        let requested = requested.filter(|m| !m.trim().is_empty());
        match self.role {
            Role::Admin => requested
                .ok_or_else(|| AppError::Validation("Market is required".into())),
            Role::Officer => {
                let own = self.market.clone().ok_or_else(|| {
                    AppError::Validation("Officer account has no assigned market".into())
                })?;
                match requested {
                    Some(m) if m != own => Err(AppError::Forbidden),
                    _ => Ok(own),
                }
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
        let claims = decode_token(token, &state.jwt_secret)?;
        Ok(CurrentUser {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
            market: claims.market,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            role: Role::Admin,
            market: None,
        }
    }

    fn officer(market: &str) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "petugas".to_string(),
            role: Role::Officer,
            market: Some(market.to_string()),
        }
    }

    #[test]
    fn test_admin_may_target_any_market_but_must_name_one() {
        let user = admin();
        assert_eq!(
            user.resolve_market(Some("Pasar Lama".to_string())).unwrap(),
            "Pasar Lama"
        );
        assert!(matches!(
            user.resolve_market(None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_officer_defaults_to_assigned_market() {
        let user = officer("Pasar Baru");
        assert_eq!(user.resolve_market(None).unwrap(), "Pasar Baru");
        assert_eq!(
            user.resolve_market(Some("Pasar Baru".to_string())).unwrap(),
            "Pasar Baru"
        );
    }

    #[test]
    fn test_officer_may_not_write_another_market() {
        let user = officer("Pasar Baru");
        assert!(matches!(
            user.resolve_market(Some("Pasar Lama".to_string())),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("rahasia123").unwrap();
        assert!(verify_password("rahasia123", &hash));
        assert!(!verify_password("salah", &hash));
    }

    #[test]
    fn test_token_roundtrip() {
        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "petugas".to_string(),
            email: "petugas@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Officer,
            market: Some("Pasar Baru".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let token = create_token(&user, "secret").unwrap();
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Officer);
        assert_eq!(claims.market.as_deref(), Some("Pasar Baru"));

        assert!(matches!(
            decode_token(&token, "other-secret"),
            Err(AppError::Unauthorized)
        ));
    }
}
