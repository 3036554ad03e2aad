//! Navigable routes and the sidebar menu.

use database::AgentType;

/// A page the admin UI can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Users,
    Agents,
    AgentCreate(AgentType),
    AgentSetup(String),
    Prompts,
    Settings,
    Login,
}

impl Route {
    /// URL path (with query, if any) for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Users => "/dashboard/users".to_string(),
            Route::Agents => "/dashboard/agents".to_string(),
            Route::AgentCreate(agent_type) => {
                format!("/dashboard/agents/create?type={}", agent_type.as_str())
            }
            Route::AgentSetup(agent_id) => format!("/dashboard/agents/setup/{}", agent_id),
            Route::Prompts => "/dashboard/prompts".to_string(),
            Route::Settings => "/dashboard/settings".to_string(),
            Route::Login => "/login".to_string(),
        }
    }

    /// Path with a `notice` query parameter appended.
    pub fn with_notice(&self, notice: Notice) -> String {
        let path = self.path();
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}notice={}", path, sep, notice.key())
    }
}

/// One-shot messages carried across a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AgentNotFound,
    AgentPublished,
    AgentUpdated,
    ConfigSaved,
    PromptSaved,
    PromptDeleted,
    PromptNotFound,
    UserCreated,
    LoggedOut,
}

impl Notice {
    const ALL: [Notice; 9] = [
        Notice::AgentNotFound,
        Notice::AgentPublished,
        Notice::AgentUpdated,
        Notice::ConfigSaved,
        Notice::PromptSaved,
        Notice::PromptDeleted,
        Notice::PromptNotFound,
        Notice::UserCreated,
        Notice::LoggedOut,
    ];

    /// Notice for a query-string key; unknown keys are ignored.
    pub fn from_key(key: &str) -> Option<Notice> {
        Self::ALL.into_iter().find(|notice| notice.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Notice::AgentNotFound => "agent_not_found",
            Notice::AgentPublished => "agent_published",
            Notice::AgentUpdated => "agent_updated",
            Notice::ConfigSaved => "config_saved",
            Notice::PromptSaved => "prompt_saved",
            Notice::PromptDeleted => "prompt_deleted",
            Notice::PromptNotFound => "prompt_not_found",
            Notice::UserCreated => "user_created",
            Notice::LoggedOut => "logged_out",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::AgentNotFound => "Agent not found",
            Notice::AgentPublished => "Agent published successfully",
            Notice::AgentUpdated => "Agent updated",
            Notice::ConfigSaved => "Configuration saved successfully",
            Notice::PromptSaved => "Prompt saved",
            Notice::PromptDeleted => "Prompt deleted",
            Notice::PromptNotFound => "Prompt not found",
            Notice::UserCreated => "User created",
            Notice::LoggedOut => "You have been logged out",
        }
    }
}

/// A sidebar entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub href: String,
    pub icon: &'static str,
    pub active: bool,
}

const MENU: [(&str, Route, &str); 5] = [
    ("Dashboard", Route::Dashboard, "layout-dashboard"),
    ("Users", Route::Users, "users"),
    ("Agents", Route::Agents, "message-square"),
    ("Prompts", Route::Prompts, "file-text"),
    ("Settings", Route::Settings, "settings"),
];

/// Sidebar menu with the entry for the current page highlighted.
#[derive(Debug, Clone)]
pub struct Sidebar {
    pub items: Vec<NavItem>,
}

impl Sidebar {
    pub fn for_path(path: &str) -> Self {
        let items = MENU
            .iter()
            .map(|&(label, ref route, icon)| {
                let href = route.path();
                let active = is_active(&href, path);
                NavItem {
                    label,
                    href,
                    icon,
                    active,
                }
            })
            .collect();
        Self { items }
    }
}

/// A menu entry is active on its own page and on pages nested below it.
///
/// The dashboard root is every page's parent, so it only matches exactly.
fn is_active(href: &str, path: &str) -> bool {
    if path == href {
        return true;
    }
    href != "/dashboard"
        && path
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}
