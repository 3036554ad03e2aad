//! SQLite persistence layer for AgentHub.
//!
//! This crate provides async database operations for profiles, prompts,
//! agents and their widget configuration using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{agent, prompt, Database, NewAgent, PromptFields, PLACEHOLDER_OWNER_ID};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:agenthub.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a prompt and a draft agent that uses it
//!     let support = prompt::create_prompt(
//!         db.pool(),
//!         &PromptFields {
//!             name: "Support".to_string(),
//!             description: String::new(),
//!             prompt_body: "Help the user".to_string(),
//!         },
//!         PLACEHOLDER_OWNER_ID,
//!     )
//!     .await?;
//!
//!     let new = NewAgent {
//!         name: "Bot1".to_string(),
//!         agent_type: Default::default(),
//!         prompt_id: support.id,
//!     };
//!     agent::create_agent(db.pool(), &new, PLACEHOLDER_OWNER_ID).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod enums;
pub mod error;
pub mod models;
pub mod profile;
pub mod prompt;
pub mod validation;
pub mod widget_config;

pub use agent::AgentField;
pub use enums::{
    AgentStatus, AgentType, LlmModel, ProfileStatus, Role, TriggerStyle, Voice, WidgetPosition,
    WidgetShape,
};
pub use error::{DatabaseError, Result};
pub use models::{
    Agent, AgentWidgetConfig, NewAgent, NewProfile, Profile, Prompt, PromptFields,
    PLACEHOLDER_OWNER_ID, WIDGET_COLORS,
};
pub use prompt::PromptOrder;
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/agenthub.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the pool can reach the database.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
