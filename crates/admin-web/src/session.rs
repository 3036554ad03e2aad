//! Edit sessions: a persisted record (or its defaults) plus the changes a
//! request wants to apply, saved in one step.
//!
//! A session lives for a single request. It never touches the store until
//! `save` (or `publish`) is called, and a failed save leaves the draft as the
//! user submitted it so the form can be shown again.

use database::{
    agent, profile, prompt, widget_config, Agent, AgentType, AgentWidgetConfig, Database,
    NewAgent, NewProfile, Profile, Prompt, PromptFields, Role, TriggerStyle, ValidationError,
    WidgetPosition, WidgetShape,
};

use crate::error::Result;
use crate::state::Owner;

/// Local edit buffer for one entity.
pub trait Draft {
    /// A single field change.
    type Change;

    /// Merge one change into the draft.
    fn apply(&mut self, change: Self::Change);

    /// Presence checks run before anything is written.
    fn check_required(&self) -> std::result::Result<(), ValidationError> {
        Ok(())
    }
}

/// A draft plus whether it already exists in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession<D> {
    draft: D,
    persisted: bool,
}

impl<D: Draft> EditSession<D> {
    /// Session for a record that has not been saved yet.
    pub fn fresh(draft: D) -> Self {
        Self {
            draft,
            persisted: false,
        }
    }

    /// Session over a record loaded from the store.
    pub fn loaded(draft: D) -> Self {
        Self {
            draft,
            persisted: true,
        }
    }

    pub fn is_new(&self) -> bool {
        !self.persisted
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn into_draft(self) -> D {
        self.draft
    }

    pub fn update(&mut self, change: D::Change) -> &mut Self {
        self.draft.apply(change);
        self
    }

    pub fn update_all(&mut self, changes: impl IntoIterator<Item = D::Change>) -> &mut Self {
        for change in changes {
            self.draft.apply(change);
        }
        self
    }

    /// The draft, if it passes the required-field checks.
    pub fn checked(&self) -> std::result::Result<&D, ValidationError> {
        self.draft.check_required()?;
        Ok(&self.draft)
    }
}

/// A change to one widget configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetChange {
    Position(WidgetPosition),
    Color(String),
    Shape(WidgetShape),
    TriggerStyle(TriggerStyle),
    TitleText(String),
    WelcomeMessage(String),
}

impl Draft for AgentWidgetConfig {
    type Change = WidgetChange;

    fn apply(&mut self, change: WidgetChange) {
        match change {
            WidgetChange::Position(position) => self.position = position,
            WidgetChange::Color(color) => self.color = color,
            WidgetChange::Shape(shape) => self.shape = shape,
            WidgetChange::TriggerStyle(style) => self.trigger_style = style,
            WidgetChange::TitleText(title) => self.title_text = title,
            WidgetChange::WelcomeMessage(message) => self.welcome_message = message,
        }
    }
}

/// The agent being configured together with its widget configuration session.
#[derive(Debug, Clone)]
pub struct AgentSetup {
    pub agent: Agent,
    pub widget: EditSession<AgentWidgetConfig>,
}

impl AgentSetup {
    /// Load an agent and its stored configuration, falling back to defaults.
    ///
    /// Fails with `NotFound` when the agent does not exist.
    pub async fn load(db: &Database, agent_id: &str) -> Result<Self> {
        let agent = agent::get_agent(db.pool(), agent_id).await?;
        let widget = match widget_config::get_widget_config(db.pool(), agent_id).await? {
            Some(config) => EditSession::loaded(config),
            None => EditSession::fresh(AgentWidgetConfig::defaults(agent_id)),
        };
        Ok(Self { agent, widget })
    }
}

impl EditSession<AgentWidgetConfig> {
    /// Session over the defaults, for rendering without a store round trip.
    pub fn defaults_for(agent_id: &str) -> Self {
        Self::fresh(AgentWidgetConfig::defaults(agent_id))
    }

    /// Write the configuration (insert or replace).
    pub async fn save(&mut self, db: &Database) -> Result<()> {
        widget_config::put_widget_config(db.pool(), &self.draft).await?;
        self.persisted = true;
        Ok(())
    }

    /// Save the configuration and publish its agent.
    pub async fn publish(&mut self, db: &Database) -> Result<Agent> {
        let agent = agent::publish_agent(db.pool(), &self.draft).await?;
        self.persisted = true;
        Ok(agent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentChange {
    Name(String),
    Prompt(String),
    Type(AgentType),
}

impl Draft for NewAgent {
    type Change = AgentChange;

    fn apply(&mut self, change: AgentChange) {
        match change {
            AgentChange::Name(name) => self.name = name,
            AgentChange::Prompt(prompt_id) => self.prompt_id = prompt_id,
            AgentChange::Type(agent_type) => self.agent_type = agent_type,
        }
    }

    fn check_required(&self) -> std::result::Result<(), ValidationError> {
        database::validation::require_all(&[
            ("name", self.name.as_str()),
            ("prompt", self.prompt_id.as_str()),
        ])
    }
}

impl EditSession<NewAgent> {
    /// Empty create form for an agent of the given type.
    pub fn new_agent(agent_type: AgentType) -> Self {
        Self::fresh(NewAgent {
            name: String::new(),
            agent_type,
            prompt_id: String::new(),
        })
    }

    /// Create the agent. Missing fields are rejected without a store call.
    pub async fn save(&mut self, db: &Database, owner: &Owner) -> Result<Agent> {
        let new = self.checked()?;
        let created = agent::create_agent(db.pool(), new, &owner.id).await?;
        self.persisted = true;
        Ok(created)
    }
}

/// Prompt fields plus the id of the prompt being edited, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDraft {
    pub id: Option<String>,
    pub fields: PromptFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptChange {
    Name(String),
    Description(String),
    Body(String),
}

impl Draft for PromptDraft {
    type Change = PromptChange;

    fn apply(&mut self, change: PromptChange) {
        match change {
            PromptChange::Name(name) => self.fields.name = name,
            PromptChange::Description(description) => self.fields.description = description,
            PromptChange::Body(body) => self.fields.prompt_body = body,
        }
    }

    fn check_required(&self) -> std::result::Result<(), ValidationError> {
        database::validation::require("name", &self.fields.name)
    }
}

impl EditSession<PromptDraft> {
    pub fn new_prompt() -> Self {
        Self::fresh(PromptDraft::default())
    }

    /// Session over an existing prompt.
    pub async fn load_prompt(db: &Database, id: &str) -> Result<Self> {
        let existing = prompt::get_prompt(db.pool(), id).await?;
        Ok(Self::loaded(PromptDraft {
            id: Some(existing.id.clone()),
            fields: PromptFields::from(&existing),
        }))
    }

    /// Insert a new prompt or update the one being edited.
    pub async fn save(&mut self, db: &Database, owner: &Owner) -> Result<Prompt> {
        let draft = self.checked()?;
        let saved = match &draft.id {
            Some(id) => prompt::update_prompt(db.pool(), id, &draft.fields).await?,
            None => prompt::create_prompt(db.pool(), &draft.fields, &owner.id).await?,
        };
        self.draft.id = Some(saved.id.clone());
        self.persisted = true;
        Ok(saved)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChange {
    FullName(String),
    Role(Role),
}

impl Draft for NewProfile {
    type Change = ProfileChange;

    fn apply(&mut self, change: ProfileChange) {
        match change {
            ProfileChange::FullName(name) => self.full_name = name,
            ProfileChange::Role(role) => self.role = role,
        }
    }

    fn check_required(&self) -> std::result::Result<(), ValidationError> {
        database::validation::require("full name", &self.full_name)
    }
}

impl EditSession<NewProfile> {
    pub fn new_profile() -> Self {
        Self::fresh(NewProfile {
            full_name: String::new(),
            role: Role::User,
        })
    }

    pub async fn save(&mut self, db: &Database) -> Result<Profile> {
        let new = self.checked()?;
        let created = profile::create_profile(db.pool(), new).await?;
        self.persisted = true;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;
    use database::{AgentStatus, DatabaseError, PLACEHOLDER_OWNER_ID};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn owner() -> Owner {
        Owner::new(PLACEHOLDER_OWNER_ID)
    }

    #[test]
    fn test_update_merges_without_touching_other_fields() {
        let mut session = EditSession::defaults_for("agent-1");
        session
            .update(WidgetChange::Position(WidgetPosition::Center))
            .update(WidgetChange::Color("#10B981".to_string()));

        let draft = session.draft();
        assert_eq!(draft.position, WidgetPosition::Center);
        assert_eq!(draft.color, "#10B981");
        assert_eq!(draft.shape, WidgetShape::Rounded);
        assert_eq!(draft.title_text, "Chat with us");
        assert!(session.is_new());
    }

    #[tokio::test]
    async fn test_agent_create_gate_makes_no_store_call() {
        let db = test_db().await;

        let mut session = EditSession::new_agent(AgentType::WidgetVoice);
        session.update(AgentChange::Name("Bot1".to_string()));

        let err = session.save(&db, &owner()).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(ValidationError::Empty(_))));
        assert_eq!(err.to_string(), "prompt cannot be empty");
        assert!(session.is_new());
        assert_eq!(agent::count_agents(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_widget_session_insert_then_update() {
        let db = test_db().await;

        let mut create = EditSession::new_agent(AgentType::WidgetText);
        create.update_all([
            AgentChange::Name("Bot1".to_string()),
            AgentChange::Prompt("prompt-1".to_string()),
        ]);
        let bot = create.save(&db, &owner()).await.unwrap();

        let mut setup = AgentSetup::load(&db, &bot.id).await.unwrap();
        assert!(setup.widget.is_new());
        setup.widget.save(&db).await.unwrap();
        assert!(!setup.widget.is_new());

        let mut again = AgentSetup::load(&db, &bot.id).await.unwrap();
        assert!(!again.widget.is_new());
        again
            .widget
            .update(WidgetChange::TriggerStyle(TriggerStyle::Text));
        again.widget.save(&db).await.unwrap();

        assert_eq!(widget_config::count_for_agent(db.pool(), &bot.id).await.unwrap(), 1);

        let published = again.widget.publish(&db).await.unwrap();
        assert_eq!(published.status, AgentStatus::Published);
    }

    #[tokio::test]
    async fn test_load_missing_agent() {
        let db = test_db().await;

        let err = AgentSetup::load(&db, "missing").await.unwrap_err();
        assert!(matches!(
            err,
            AdminError::Database(DatabaseError::NotFound { entity: "Agent", .. })
        ));
    }

    #[tokio::test]
    async fn test_prompt_session_create_then_edit() {
        let db = test_db().await;

        let mut session = EditSession::new_prompt();
        session.update_all([
            PromptChange::Name("Support".to_string()),
            PromptChange::Body("Help the user".to_string()),
        ]);
        let created = session.save(&db, &owner()).await.unwrap();

        let mut edit = EditSession::load_prompt(&db, &created.id).await.unwrap();
        assert!(!edit.is_new());
        edit.update(PromptChange::Description("Front line".to_string()));
        let updated = edit.save(&db, &owner()).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "Front line");
        assert_eq!(updated.prompt_body, "Help the user");
        assert_eq!(prompt::count_prompts(db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_profile_session() {
        let db = test_db().await;

        let mut session = EditSession::new_profile();
        assert!(session.save(&db).await.is_err());

        session.update_all([
            ProfileChange::FullName("Jane Doe".to_string()),
            ProfileChange::Role(Role::Admin),
        ]);
        let created = session.save(&db).await.unwrap();
        assert_eq!(created.full_name, "Jane Doe");
        assert_eq!(created.role, Role::Admin);
    }
}
