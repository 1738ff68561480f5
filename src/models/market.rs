use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A physical market (pasar) monitored by officers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Market {
    pub id: uuid::Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMarket {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMarket {
    pub name: String,
    pub is_active: bool,
}

impl Market {
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
