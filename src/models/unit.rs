use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Unit of measure for commodity prices (Kg, Liter, Ons, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unit {
    pub id: uuid::Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUnit {
    pub name: String,
}

impl Unit {
    pub(crate) fn new(name: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
