//! Profile operations.
//!
//! Profiles are only ever created and listed; there is no edit or delete flow.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::enums::ProfileStatus;
use crate::error::{DatabaseError, Result};
use crate::models::{NewProfile, Profile};
use crate::validation;

/// Create a new active profile with a fresh id.
pub async fn create_profile(pool: &SqlitePool, new: &NewProfile) -> Result<Profile> {
    validation::require("full name", &new.full_name)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO profiles (id, full_name, role, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(new.full_name.trim())
    .bind(new.role)
    .bind(ProfileStatus::Active)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::on_insert(e, "Profile", &id))?;

    tracing::info!(profile_id = %id, role = %new.role, "Created profile");

    get_profile(pool, &id).await
}

/// Get a profile by ID.
pub async fn get_profile(pool: &SqlitePool, id: &str) -> Result<Profile> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, full_name, role, status, created_at, updated_at
        FROM profiles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Profile",
        id: id.to_string(),
    })
}

/// List all profiles, newest first.
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, full_name, role, status, created_at, updated_at
        FROM profiles
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

/// Count total profiles.
pub async fn count_profiles(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM profiles
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
