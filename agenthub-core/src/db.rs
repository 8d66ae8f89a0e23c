use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::HubError;

// Idempotent DDL, run on every process start. The `agent_id` foreign keys
// are declared intent only: SQLite leaves enforcement off by default and
// this layer never turns it on, so inserts do not validate parent rows.
const CREATE_AGENTS: &str = r#"
CREATE TABLE IF NOT EXISTS agents (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    knowledge_base TEXT NOT NULL,
    response_scope TEXT NOT NULL,
    api_key TEXT NOT NULL,
    integrations TEXT NOT NULL,
    widget_config TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#;

const CREATE_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    agent_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    content TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (agent_id) REFERENCES agents (id)
)"#;

const CREATE_ANALYTICS: &str = r#"
CREATE TABLE IF NOT EXISTS analytics (
    id TEXT PRIMARY KEY,
    agent_id TEXT NOT NULL,
    total_messages INTEGER NOT NULL,
    active_users INTEGER NOT NULL,
    response_rate REAL NOT NULL,
    avg_response_time REAL NOT NULL,
    satisfaction_rate REAL NOT NULL,
    date TEXT NOT NULL,
    FOREIGN KEY (agent_id) REFERENCES agents (id)
)"#;

/// Open (or create) the database file and build the connection pool.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, HubError> {
    if let Some(parent) = Path::new(&config.path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc creates the file on first run. sqlx enables the
    // foreign_keys pragma by default, so it is switched off explicitly to
    // keep SQLite's own default (unenforced) behavior.
    let url = format!("sqlite:{}?mode=rwc", config.path);
    let options = SqliteConnectOptions::from_str(&url)?.foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// In-memory pool for tests. Capped at one connection: every SQLite
/// `:memory:` connection is its own database, so a larger pool would hand
/// callers an empty one.
pub async fn memory_pool() -> Result<SqlitePool, HubError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Ensure the three tables exist. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), HubError> {
    sqlx::query(CREATE_AGENTS).execute(pool).await?;
    sqlx::query(CREATE_MESSAGES).execute(pool).await?;
    sqlx::query(CREATE_ANALYTICS).execute(pool).await?;

    tracing::info!("Database schema ensured (agents, messages, analytics)");
    Ok(())
}

pub async fn health_check(pool: &SqlitePool) -> Result<String, HubError> {
    let row: (String,) = sqlx::query_as("SELECT sqlite_version()")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
