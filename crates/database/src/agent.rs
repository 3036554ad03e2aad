//! Agent operations.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::enums::{AgentStatus, LlmModel, Voice};
use crate::error::{DatabaseError, Result};
use crate::models::{Agent, AgentWidgetConfig, NewAgent};
use crate::validation;
use crate::widget_config;

const AGENT_COLUMNS: &str =
    "id, name, type, prompt_id, llm_model, voice, status, user_id, created_at, updated_at";

/// A single agent field changed from the setup page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentField {
    Name(String),
    LlmModel(LlmModel),
    Voice(Voice),
}

impl AgentField {
    /// Get the database column name for this field.
    pub fn column_name(&self) -> &'static str {
        match self {
            AgentField::Name(_) => "name",
            AgentField::LlmModel(_) => "llm_model",
            AgentField::Voice(_) => "voice",
        }
    }

    /// Value as stored in the column.
    fn value(&self) -> &str {
        match self {
            AgentField::Name(name) => name.trim(),
            AgentField::LlmModel(model) => model.as_str(),
            AgentField::Voice(voice) => voice.as_str(),
        }
    }
}

/// Create a draft agent owned by `user_id`.
///
/// Both a name and a prompt are required; a missing one is rejected before
/// anything is written.
pub async fn create_agent(pool: &SqlitePool, new: &NewAgent, user_id: &str) -> Result<Agent> {
    validation::require_all(&[("name", new.name.as_str()), ("prompt", new.prompt_id.as_str())])?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO agents (id, name, type, prompt_id, status, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(new.name.trim())
    .bind(new.agent_type)
    .bind(&new.prompt_id)
    .bind(AgentStatus::Draft)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::on_insert(e, "Agent", &id))?;

    tracing::info!(agent_id = %id, agent_type = %new.agent_type, "Created agent");

    get_agent(pool, &id).await
}

/// Get an agent by ID.
pub async fn get_agent(pool: &SqlitePool, id: &str) -> Result<Agent> {
    let query = format!("SELECT {AGENT_COLUMNS} FROM agents WHERE id = ?");

    sqlx::query_as::<_, Agent>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Agent",
            id: id.to_string(),
        })
}

/// List all agents, newest first.
pub async fn list_agents(pool: &SqlitePool) -> Result<Vec<Agent>> {
    let query = format!("SELECT {AGENT_COLUMNS} FROM agents ORDER BY created_at DESC, rowid DESC");

    let agents = sqlx::query_as::<_, Agent>(&query).fetch_all(pool).await?;

    Ok(agents)
}

/// Persist one field change and return the updated agent.
pub async fn update_agent_field(pool: &SqlitePool, id: &str, field: &AgentField) -> Result<Agent> {
    if let AgentField::Name(name) = field {
        validation::require("name", name)?;
    }

    // Column names come from the AgentField enum, never from input.
    let query = format!(
        r#"
        UPDATE agents
        SET {column} = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
        column = field.column_name()
    );

    let result = sqlx::query(&query)
        .bind(field.value())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Agent",
            id: id.to_string(),
        });
    }

    tracing::info!(agent_id = %id, field = field.column_name(), "Updated agent");

    get_agent(pool, id).await
}

/// Save the widget configuration, then mark the agent published.
///
/// Both writes share one transaction so an agent is never published without
/// its configuration row.
pub async fn publish_agent(pool: &SqlitePool, config: &AgentWidgetConfig) -> Result<Agent> {
    let mut tx = pool.begin().await?;

    widget_config::put_widget_config(&mut *tx, config).await?;

    let result = sqlx::query(
        r#"
        UPDATE agents
        SET status = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(AgentStatus::Published)
    .bind(&config.agent_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Agent",
            id: config.agent_id.clone(),
        });
    }

    tx.commit().await?;

    tracing::info!(agent_id = %config.agent_id, "Published agent");

    get_agent(pool, &config.agent_id).await
}

/// Count total agents.
pub async fn count_agents(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM agents
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Count agents in the given status.
pub async fn count_agents_by_status(pool: &SqlitePool, status: AgentStatus) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM agents WHERE status = ?
        "#,
    )
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
