use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: String,
    pub agent_id: String,
    pub user_id: String,
    pub content: String,
    pub role: String,
    pub created_at: String,
}
