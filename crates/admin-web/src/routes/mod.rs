//! Route handlers for the admin web interface.

pub mod agents;
pub mod api;
pub mod dashboard;
pub mod health;
pub mod pages;
pub mod prompts;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;
use serde::Deserialize;
use tracing::warn;

use crate::nav::Notice;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(pages::root))
        .route("/dashboard", get(dashboard::dashboard_page))
        .route(
            "/dashboard/users",
            get(users::users_page).post(users::create_user),
        )
        .route("/dashboard/agents", get(agents::agents_page))
        .route(
            "/dashboard/agents/create",
            get(agents::create_page).post(agents::create_agent),
        )
        .route("/dashboard/agents/setup/:id", get(agents::setup_page))
        .route("/dashboard/agents/setup/:id/agent", post(agents::update_agent))
        .route("/dashboard/agents/setup/:id/config", post(agents::save_config))
        .route("/dashboard/agents/setup/:id/publish", post(agents::publish))
        .route("/dashboard/agents/setup/:id/preview", post(agents::preview))
        .route(
            "/dashboard/prompts",
            get(prompts::prompts_page).post(prompts::create_prompt),
        )
        .route("/dashboard/prompts/new", get(prompts::new_prompt_page))
        .route("/dashboard/prompts/:id", post(prompts::update_prompt))
        .route("/dashboard/prompts/:id/edit", get(prompts::edit_prompt_page))
        .route(
            "/dashboard/prompts/:id/delete",
            get(prompts::delete_page).post(prompts::delete_prompt),
        )
        .route("/dashboard/settings", get(pages::settings_page))
        .route("/login", get(pages::login_page))
        .route("/logout", post(pages::logout))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/stats", get(dashboard::stats_api))
        .route(
            "/api/profiles",
            get(api::list_profiles).post(api::create_profile),
        )
        .route("/api/prompts", get(api::list_prompts).post(api::create_prompt))
        .route(
            "/api/prompts/:id",
            put(api::update_prompt).delete(api::delete_prompt),
        )
        .route("/api/agents", get(api::list_agents).post(api::create_agent))
        .route("/api/agents/:id", get(api::get_agent).patch(api::patch_agent))
        .route(
            "/api/agents/:id/widget-config",
            get(api::get_widget_config).put(api::put_widget_config),
        )
        .route("/api/agents/:id/publish", post(api::publish_agent))
}

/// Result of fetching a list for a page.
///
/// A failed fetch is kept apart from an empty one so the page can say which
/// happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> Listing<T> {
    pub fn from_result(list: &'static str, result: database::Result<Vec<T>>) -> Self {
        match result {
            Ok(rows) => Listing::Loaded(rows),
            Err(e) => {
                warn!(list, error = %e, "Failed to load list");
                Listing::Failed(e.to_string())
            }
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::Loaded(rows) => rows,
            Listing::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Listing::Loaded(_) => None,
            Listing::Failed(message) => Some(message),
        }
    }

    /// Loaded, with nothing in it.
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Loaded(rows) if rows.is_empty())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        match self {
            Listing::Loaded(rows) => Listing::Loaded(rows.into_iter().map(f).collect()),
            Listing::Failed(message) => Listing::Failed(message),
        }
    }
}

/// One `<option>` of a select or radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// `?notice=` carried over from a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub fn message(&self) -> Option<String> {
        self.notice
            .as_deref()
            .and_then(Notice::from_key)
            .map(|notice| notice.message().to_string())
    }
}
