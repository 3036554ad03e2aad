//! Prompt CRUD operations.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Prompt, PromptFields};
use crate::validation;

/// Sort order for prompt listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOrder {
    /// Newest first, for the prompts page.
    Newest,
    /// Alphabetical, for prompt pickers.
    Name,
}

impl PromptOrder {
    fn clause(&self) -> &'static str {
        match self {
            PromptOrder::Newest => "created_at DESC, rowid DESC",
            PromptOrder::Name => "name ASC, rowid ASC",
        }
    }
}

/// Create a new prompt owned by `user_id`.
pub async fn create_prompt(pool: &SqlitePool, fields: &PromptFields, user_id: &str) -> Result<Prompt> {
    validation::require("name", &fields.name)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO prompts (id, name, description, prompt_body, user_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(fields.name.trim())
    .bind(&fields.description)
    .bind(&fields.prompt_body)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::on_insert(e, "Prompt", &id))?;

    tracing::info!(prompt_id = %id, name = %fields.name.trim(), "Created prompt");

    get_prompt(pool, &id).await
}

/// Get a prompt by ID.
pub async fn get_prompt(pool: &SqlitePool, id: &str) -> Result<Prompt> {
    sqlx::query_as::<_, Prompt>(
        r#"
        SELECT id, name, description, prompt_body, user_id, created_at, updated_at
        FROM prompts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Prompt",
        id: id.to_string(),
    })
}

/// Replace the editable fields of an existing prompt.
pub async fn update_prompt(pool: &SqlitePool, id: &str, fields: &PromptFields) -> Result<Prompt> {
    validation::require("name", &fields.name)?;

    let result = sqlx::query(
        r#"
        UPDATE prompts
        SET name = ?, description = ?, prompt_body = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(fields.name.trim())
    .bind(&fields.description)
    .bind(&fields.prompt_body)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Prompt",
            id: id.to_string(),
        });
    }

    tracing::info!(prompt_id = %id, "Updated prompt");

    get_prompt(pool, id).await
}

/// Delete a prompt by ID.
///
/// Agents referencing the prompt keep their `prompt_id`.
pub async fn delete_prompt(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM prompts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Prompt",
            id: id.to_string(),
        });
    }

    tracing::info!(prompt_id = %id, "Deleted prompt");

    Ok(())
}

/// List all prompts in the given order.
pub async fn list_prompts(pool: &SqlitePool, order: PromptOrder) -> Result<Vec<Prompt>> {
    let query = format!(
        r#"
        SELECT id, name, description, prompt_body, user_id, created_at, updated_at
        FROM prompts
        ORDER BY {}
        "#,
        order.clause()
    );

    let prompts = sqlx::query_as::<_, Prompt>(&query).fetch_all(pool).await?;

    Ok(prompts)
}

/// Count total prompts.
pub async fn count_prompts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM prompts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PLACEHOLDER_OWNER_ID;
    use crate::test_support::test_db;

    fn fields(name: &str, body: &str) -> PromptFields {
        PromptFields {
            name: name.to_string(),
            description: String::new(),
            prompt_body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_prompt_crud() {
        let db = test_db().await;

        // Create
        let prompt = create_prompt(db.pool(), &fields("Support", "Help the user"), PLACEHOLDER_OWNER_ID)
            .await
            .unwrap();
        assert_eq!(prompt.name, "Support");
        assert_eq!(prompt.user_id, PLACEHOLDER_OWNER_ID);

        // Update
        let updated = update_prompt(db.pool(), &prompt.id, &fields("Support v2", "Be brief"))
            .await
            .unwrap();
        assert_eq!(updated.id, prompt.id);
        assert_eq!(updated.prompt_body, "Be brief");

        // Delete
        delete_prompt(db.pool(), &prompt.id).await.unwrap();
        let result = get_prompt(db.pool(), &prompt.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        assert!(list_prompts(db.pool(), PromptOrder::Newest).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_names_are_trimmed() {
        let db = test_db().await;

        let prompt = create_prompt(db.pool(), &fields("  Support ", "Help"), PLACEHOLDER_OWNER_ID)
            .await
            .unwrap();
        assert_eq!(prompt.name, "Support");

        let updated = update_prompt(db.pool(), &prompt.id, &fields(" Sales\n", "Sell"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Sales");
    }

    #[tokio::test]
    async fn test_list_orders() {
        let db = test_db().await;

        for name in ["Beta", "Alpha", "Gamma"] {
            create_prompt(db.pool(), &fields(name, ""), PLACEHOLDER_OWNER_ID)
                .await
                .unwrap();
        }

        let by_name: Vec<String> = list_prompts(db.pool(), PromptOrder::Name)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(by_name, vec!["Alpha", "Beta", "Gamma"]);

        let newest: Vec<String> = list_prompts(db.pool(), PromptOrder::Newest)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(newest, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let db = test_db().await;

        let result = update_prompt(db.pool(), "missing", &fields("x", "")).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { entity: "Prompt", .. })));

        let result = delete_prompt(db.pool(), "missing").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { entity: "Prompt", .. })));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = test_db().await;

        let result = create_prompt(db.pool(), &fields("", "body"), PLACEHOLDER_OWNER_ID).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert_eq!(count_prompts(db.pool()).await.unwrap(), 0);
    }
}
