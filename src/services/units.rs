use sqlx::PgPool;
use tracing::info;

use crate::db::unit_queries;
use crate::errors::AppError;
use crate::models::Unit;

pub async fn create(pool: &PgPool, name: String) -> Result<Unit, AppError> {
    let exists = unit_queries::exists_by_name(pool, name.trim()).await?;
    let name = validate_new_name(&name, exists)?;
    info!("Creating unit {}", name);
    let unit = unit_queries::insert(pool, Unit::new(name)).await?;
    Ok(unit)
}

// Unit names are compared case-insensitively; "kg" and "Kg" are the same
// unit of measure.
pub fn validate_new_name(name: &str, exists: bool) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Unit name cannot be empty".into()));
    }
    if exists {
        return Err(AppError::Validation("Unit name already exists".into()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_is_rejected() {
        assert!(matches!(
            validate_new_name("Kg", true),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_new_name_is_trimmed() {
        assert_eq!(validate_new_name("  Liter ", false).unwrap(), "Liter");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(
            validate_new_name("   ", false),
            Err(AppError::Validation(_))
        ));
    }
}
