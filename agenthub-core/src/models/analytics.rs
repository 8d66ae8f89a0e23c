use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalyticsRecord {
    pub id: String,
    pub agent_id: String,
    pub total_messages: i64,
    pub active_users: i64,
    pub response_rate: f64,
    pub avg_response_time: f64,
    pub satisfaction_rate: f64,
    pub date: String,
}

/// Cross-agent aggregate over analytics rows dated today. The sums and
/// averages are NULL when no row matches, so they stay optional end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub active_agents: i64,
    pub total_messages: Option<i64>,
    pub avg_satisfaction_rate: Option<f64>,
}
