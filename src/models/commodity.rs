use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A monitored commodity variant, e.g. "Beras Cap C4 (Medium)".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Commodity {
    pub id: uuid::Uuid,
    pub name: String,
    pub unit: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommodity {
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCommodity {
    pub name: String,
    pub unit: String,
    pub is_active: bool,
}

impl Commodity {
    pub(crate) fn new(name: String, unit: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            unit,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
