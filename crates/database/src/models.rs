//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::enums::{
    AgentStatus, AgentType, LlmModel, ProfileStatus, Role, TriggerStyle, Voice, WidgetPosition,
    WidgetShape,
};

/// Owner id recorded when no authenticated caller is known.
pub const PLACEHOLDER_OWNER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Preset widget colors offered by the configuration form.
pub const WIDGET_COLORS: [&str; 6] = [
    "#3B82F6", "#10B981", "#8B5CF6", "#F59E0B", "#EF4444", "#06B6D4",
];

/// A user account shown on the users page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub role: Role,
    pub status: ProfileStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields supplied when creating a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub full_name: String,
    pub role: Role,
}

/// A reusable prompt that agents reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt_body: String,
    /// Owning user.
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Editable prompt fields, shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt_body: String,
}

impl From<&Prompt> for PromptFields {
    fn from(prompt: &Prompt) -> Self {
        Self {
            name: prompt.name.clone(),
            description: prompt.description.clone(),
            prompt_body: prompt.prompt_body.clone(),
        }
    }
}

/// An automation agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub agent_type: AgentType,
    /// Weak reference to a prompt; not checked against the prompts table.
    pub prompt_id: Option<String>,
    pub llm_model: Option<LlmModel>,
    pub voice: Option<Voice>,
    pub status: AgentStatus,
    /// Owning user.
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields supplied when creating an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    #[serde(rename = "type", default)]
    pub agent_type: AgentType,
    pub prompt_id: String,
}

/// Appearance of the embeddable chat widget, one row per agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AgentWidgetConfig {
    pub agent_id: String,
    pub position: WidgetPosition,
    pub color: String,
    pub shape: WidgetShape,
    pub trigger_style: TriggerStyle,
    pub title_text: String,
    pub welcome_message: String,
}

impl AgentWidgetConfig {
    pub const DEFAULT_COLOR: &'static str = "#3B82F6";
    pub const DEFAULT_TITLE: &'static str = "Chat with us";
    pub const DEFAULT_WELCOME: &'static str = "Hello! How can I help you today?";

    /// Configuration used until the agent's first save.
    pub fn defaults(agent_id: &str) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            position: WidgetPosition::BottomRight,
            color: Self::DEFAULT_COLOR.to_string(),
            shape: WidgetShape::Rounded,
            trigger_style: TriggerStyle::Bubble,
            title_text: Self::DEFAULT_TITLE.to_string(),
            welcome_message: Self::DEFAULT_WELCOME.to_string(),
        }
    }
}
