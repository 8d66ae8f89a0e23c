use serde::{Deserialize, Serialize};

/// A registered agent. `knowledge_base`, `response_scope`, `integrations`
/// and `widget_config` are opaque serialized payloads, stored and echoed
/// as-is, never parsed here. Timestamps are caller-supplied strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub knowledge_base: String,
    pub response_scope: String,
    pub api_key: String,
    pub integrations: String,
    pub widget_config: String,
    pub created_at: String,
    pub updated_at: String,
}
