//! Widget configuration storage, one row per agent.

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::error::Result;
use crate::models::AgentWidgetConfig;

/// Get an agent's stored widget configuration, if it has been saved.
pub async fn get_widget_config(pool: &SqlitePool, agent_id: &str) -> Result<Option<AgentWidgetConfig>> {
    let record = sqlx::query_as::<_, AgentWidgetConfig>(
        r#"
        SELECT agent_id, position, color, shape, trigger_style, title_text, welcome_message
        FROM agent_widget_config
        WHERE agent_id = ?
        "#,
    )
    .bind(agent_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Stored configuration, or the defaults when none has been saved yet.
pub async fn get_or_default(pool: &SqlitePool, agent_id: &str) -> Result<AgentWidgetConfig> {
    Ok(get_widget_config(pool, agent_id)
        .await?
        .unwrap_or_else(|| AgentWidgetConfig::defaults(agent_id)))
}

/// Create or replace an agent's widget configuration.
///
/// Idempotent: saving the same values twice leaves a single row.
pub async fn put_widget_config<'e, E>(executor: E, config: &AgentWidgetConfig) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO agent_widget_config
            (agent_id, position, color, shape, trigger_style, title_text, welcome_message)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(agent_id) DO UPDATE SET
            position = excluded.position,
            color = excluded.color,
            shape = excluded.shape,
            trigger_style = excluded.trigger_style,
            title_text = excluded.title_text,
            welcome_message = excluded.welcome_message
        "#,
    )
    .bind(&config.agent_id)
    .bind(config.position)
    .bind(&config.color)
    .bind(config.shape)
    .bind(config.trigger_style)
    .bind(&config.title_text)
    .bind(&config.welcome_message)
    .execute(executor)
    .await?;

    tracing::info!(agent_id = %config.agent_id, "Saved widget configuration");

    Ok(())
}

/// Count configuration rows for an agent (zero or one).
pub async fn count_for_agent(pool: &SqlitePool, agent_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM agent_widget_config WHERE agent_id = ?
        "#,
    )
    .bind(agent_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
