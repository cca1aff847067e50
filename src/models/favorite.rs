use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One bookmark row; (user_id, pet_id) is the composite key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub user_id: Uuid,
    pub pet_id: Uuid,
    pub created_at: DateTime<Utc>,
}
