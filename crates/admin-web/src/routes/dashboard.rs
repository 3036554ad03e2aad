//! Dashboard routes.

use askama::Template;
use axum::extract::{Query, State};
use axum::Json;
use database::{agent, profile, prompt, AgentStatus, Database};
use serde::Serialize;
use tracing::warn;

use crate::nav::Sidebar;
use crate::routes::NoticeQuery;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub stats: Stats,
}

/// Dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_agents: i64,
    pub active_agents: i64,
    pub total_prompts: i64,
    pub total_users: i64,
    /// Counters whose query failed and are shown as zero.
    pub unavailable: Vec<&'static str>,
}

/// Render the dashboard page.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> DashboardTemplate {
    let stats = get_stats(&state.db).await;
    DashboardTemplate {
        nav: Sidebar::for_path("/dashboard"),
        notice: query.message(),
        stats,
    }
}

/// Get dashboard statistics as JSON.
pub async fn stats_api(State(state): State<AppState>) -> Json<Stats> {
    Json(get_stats(&state.db).await)
}

/// Run the four counts concurrently.
///
/// A failed count does not fail the page; it reads as zero and is listed in
/// `unavailable`.
pub async fn get_stats(db: &Database) -> Stats {
    let pool = db.pool();

    let (agents, published, prompts, users) = tokio::join!(
        agent::count_agents(pool),
        agent::count_agents_by_status(pool, AgentStatus::Published),
        prompt::count_prompts(pool),
        profile::count_profiles(pool),
    );

    let mut unavailable = Vec::new();
    let mut counter = |name: &'static str, result: database::Result<i64>| match result {
        Ok(count) => count,
        Err(e) => {
            warn!(counter = name, error = %e, "Dashboard counter unavailable");
            unavailable.push(name);
            0
        }
    };

    let total_agents = counter("agents", agents);
    let active_agents = counter("active agents", published);
    let total_prompts = counter("prompts", prompts);
    let total_users = counter("users", users);

    Stats {
        total_agents,
        active_agents,
        total_prompts,
        total_users,
        unavailable,
    }
}
