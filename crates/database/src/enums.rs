//! Closed value sets stored as text columns.
//!
//! Every enum here round-trips through SQLite as its wire string (`as_str`),
//! so an unknown value in a row fails to decode instead of leaking into the
//! application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Role stored on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

/// Whether a profile may use the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProfileStatus {
    Active,
    Inactive,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Inactive => "inactive",
        }
    }
}

/// Channel and modality an agent is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AgentType {
    WidgetText,
    WidgetVoice,
    WidgetVideo,
    WhatsappText,
    WhatsappVoice,
    Inbound,
    Outbound,
}

impl AgentType {
    pub const ALL: [AgentType; 7] = [
        AgentType::WidgetText,
        AgentType::WidgetVoice,
        AgentType::WidgetVideo,
        AgentType::WhatsappText,
        AgentType::WhatsappVoice,
        AgentType::Inbound,
        AgentType::Outbound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::WidgetText => "widget_text",
            AgentType::WidgetVoice => "widget_voice",
            AgentType::WidgetVideo => "widget_video",
            AgentType::WhatsappText => "whatsapp_text",
            AgentType::WhatsappVoice => "whatsapp_voice",
            AgentType::Inbound => "inbound",
            AgentType::Outbound => "outbound",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentType::WidgetText => "Widget Text",
            AgentType::WidgetVoice => "Widget Voice",
            AgentType::WidgetVideo => "Widget Video",
            AgentType::WhatsappText => "WhatsApp Text",
            AgentType::WhatsappVoice => "WhatsApp Voice",
            AgentType::Inbound => "Inbound",
            AgentType::Outbound => "Outbound",
        }
    }
}

impl Default for AgentType {
    fn default() -> Self {
        AgentType::WidgetText
    }
}

/// Agent lifecycle. Only `Draft -> Published` is ever performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AgentStatus {
    Draft,
    Published,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Draft => "draft",
            AgentStatus::Published => "published",
        }
    }
}

/// Language models an agent can be wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum LlmModel {
    #[serde(rename = "GPT-4.1")]
    #[sqlx(rename = "GPT-4.1")]
    Gpt41,
    #[serde(rename = "GPT-4.1-mini")]
    #[sqlx(rename = "GPT-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "Claude 3.5 Sonnet")]
    #[sqlx(rename = "Claude 3.5 Sonnet")]
    Claude35Sonnet,
    #[serde(rename = "Claude 3.5 Haiku")]
    #[sqlx(rename = "Claude 3.5 Haiku")]
    Claude35Haiku,
    #[serde(rename = "Llama 3.1")]
    #[sqlx(rename = "Llama 3.1")]
    Llama31,
    #[serde(rename = "Gemini 2.0")]
    #[sqlx(rename = "Gemini 2.0")]
    Gemini20,
}

impl LlmModel {
    pub const ALL: [LlmModel; 6] = [
        LlmModel::Gpt41,
        LlmModel::Gpt41Mini,
        LlmModel::Claude35Sonnet,
        LlmModel::Claude35Haiku,
        LlmModel::Llama31,
        LlmModel::Gemini20,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmModel::Gpt41 => "GPT-4.1",
            LlmModel::Gpt41Mini => "GPT-4.1-mini",
            LlmModel::Claude35Sonnet => "Claude 3.5 Sonnet",
            LlmModel::Claude35Haiku => "Claude 3.5 Haiku",
            LlmModel::Llama31 => "Llama 3.1",
            LlmModel::Gemini20 => "Gemini 2.0",
        }
    }
}

/// Synthesized voices for voice-capable agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Voice {
    Nova,
    Alloy,
    Verse,
    Callisto,
    Female,
    Male,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Voice::Nova,
        Voice::Alloy,
        Voice::Verse,
        Voice::Callisto,
        Voice::Female,
        Voice::Male,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Nova => "Nova",
            Voice::Alloy => "Alloy",
            Voice::Verse => "Verse",
            Voice::Callisto => "Callisto",
            Voice::Female => "Female",
            Voice::Male => "Male",
        }
    }
}

/// Where the widget trigger sits on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum WidgetPosition {
    BottomLeft,
    BottomRight,
    Center,
}

impl WidgetPosition {
    pub const ALL: [WidgetPosition; 3] = [
        WidgetPosition::BottomLeft,
        WidgetPosition::BottomRight,
        WidgetPosition::Center,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetPosition::BottomLeft => "bottom-left",
            WidgetPosition::BottomRight => "bottom-right",
            WidgetPosition::Center => "center",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetPosition::BottomLeft => "Bottom Left",
            WidgetPosition::BottomRight => "Bottom Right",
            WidgetPosition::Center => "Center",
        }
    }
}

/// Corner treatment of the widget trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum WidgetShape {
    Rounded,
    Full,
    Square,
}

impl WidgetShape {
    pub const ALL: [WidgetShape; 3] = [WidgetShape::Rounded, WidgetShape::Full, WidgetShape::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetShape::Rounded => "rounded",
            WidgetShape::Full => "full",
            WidgetShape::Square => "square",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetShape::Rounded => "Rounded",
            WidgetShape::Full => "Full Circle",
            WidgetShape::Square => "Square",
        }
    }
}

/// What the widget trigger button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TriggerStyle {
    Icon,
    Text,
    Bubble,
}

impl TriggerStyle {
    pub const ALL: [TriggerStyle; 3] = [TriggerStyle::Icon, TriggerStyle::Text, TriggerStyle::Bubble];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerStyle::Icon => "icon",
            TriggerStyle::Text => "text",
            TriggerStyle::Bubble => "bubble",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TriggerStyle::Icon => "Icon",
            TriggerStyle::Text => "Text",
            TriggerStyle::Bubble => "Bubble",
        }
    }
}

/// Look up the variant whose wire string is `value`.
fn parse_wire<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    as_str: fn(&T) -> &'static str,
) -> Result<T, ValidationError> {
    all.iter()
        .copied()
        .find(|v| as_str(v) == value)
        .ok_or_else(|| ValidationError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

macro_rules! wire_string {
    ($ty:ident, $field:literal, $all:expr) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_wire($field, s.trim(), &$all, $ty::as_str)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_string!(Role, "role", Role::ALL);
wire_string!(
    ProfileStatus,
    "status",
    [ProfileStatus::Active, ProfileStatus::Inactive]
);
wire_string!(AgentType, "type", AgentType::ALL);
wire_string!(
    AgentStatus,
    "status",
    [AgentStatus::Draft, AgentStatus::Published]
);
wire_string!(LlmModel, "llm_model", LlmModel::ALL);
wire_string!(Voice, "voice", Voice::ALL);
wire_string!(WidgetPosition, "position", WidgetPosition::ALL);
wire_string!(WidgetShape, "shape", WidgetShape::ALL);
wire_string!(TriggerStyle, "trigger_style", TriggerStyle::ALL);
