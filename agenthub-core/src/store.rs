//! Storage layer over the embedded SQLite database.
//!
//! Every operation is a single parameterized statement against the shared
//! pool. Constraint violations (duplicate primary key, NULL in a NOT NULL
//! column) propagate as [`HubError::Database`]; nothing here checks
//! referential integrity before writing.

use sqlx::SqlitePool;

use crate::error::HubError;
use crate::models::{Agent, AnalyticsRecord, GlobalStats};

/// All registered agents, newest first (ISO-8601 timestamps sort
/// lexicographically, so TEXT ordering is chronological).
pub async fn list_agents(pool: &SqlitePool) -> Result<Vec<Agent>, HubError> {
    let agents = sqlx::query_as::<_, Agent>(
        r#"
        SELECT id, name, description, knowledge_base, response_scope, api_key,
               integrations, widget_config, created_at, updated_at
        FROM agents
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(agents)
}

/// Insert one fully-populated agent row verbatim. No field is defaulted or
/// generated here; the caller supplies all ten columns, including id and
/// timestamps.
pub async fn insert_agent(pool: &SqlitePool, agent: &Agent) -> Result<(), HubError> {
    sqlx::query(
        r#"
        INSERT INTO agents (id, name, description, knowledge_base, response_scope,
                            api_key, integrations, widget_config, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&agent.id)
    .bind(&agent.name)
    .bind(&agent.description)
    .bind(&agent.knowledge_base)
    .bind(&agent.response_scope)
    .bind(&agent.api_key)
    .bind(&agent.integrations)
    .bind(&agent.widget_config)
    .bind(&agent.created_at)
    .bind(&agent.updated_at)
    .execute(pool)
    .await?;

    tracing::debug!(agent_id = %agent.id, "Registered agent");
    Ok(())
}

/// Analytics rows for one agent whose date falls within the inclusive
/// range, newest first. Either bound may be `None`, in which case that side
/// of the range is unconstrained.
pub async fn list_agent_analytics(
    pool: &SqlitePool,
    agent_id: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<AnalyticsRecord>, HubError> {
    let records = sqlx::query_as::<_, AnalyticsRecord>(
        r#"
        SELECT id, agent_id, total_messages, active_users, response_rate,
               avg_response_time, satisfaction_rate, date
        FROM analytics
        WHERE agent_id = ?1
          AND (?2 IS NULL OR date >= ?2)
          AND (?3 IS NULL OR date <= ?3)
        ORDER BY date DESC
        "#,
    )
    .bind(agent_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Cross-agent aggregate restricted to analytics rows dated today.
/// `DATE('now')` is evaluated by SQLite itself, i.e. in UTC, independent of
/// the host timezone. The WHERE clause filters the joined rows, so agents
/// without a today-dated analytics row do not count.
pub async fn global_stats(pool: &SqlitePool) -> Result<GlobalStats, HubError> {
    let stats = sqlx::query_as::<_, GlobalStats>(
        r#"
        SELECT COUNT(DISTINCT a.id)      AS active_agents,
               SUM(an.total_messages)    AS total_messages,
               AVG(an.satisfaction_rate) AS avg_satisfaction_rate
        FROM agents a
        LEFT JOIN analytics an ON a.id = an.agent_id
        WHERE an.date = DATE('now')
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
