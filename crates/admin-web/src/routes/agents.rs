//! Agent pages: list, two-step creation, and the setup screen with its live
//! widget preview.

use std::str::FromStr;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use database::{
    agent, prompt, Agent, AgentField, AgentType, AgentWidgetConfig, Database, LlmModel, NewAgent,
    PromptOrder, TriggerStyle, ValidationError, Voice, WidgetPosition, WidgetShape,
    WIDGET_COLORS,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AdminError, Result};
use crate::nav::{Notice, Route, Sidebar};
use crate::preview::WidgetPreview;
use crate::routes::{Listing, NoticeQuery, SelectOption};
use crate::session::{AgentChange, AgentSetup, EditSession, WidgetChange};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "agents.html")]
pub struct AgentsTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub agents: Listing<Agent>,
    /// One entry per agent type, linking to its create form.
    pub types: Vec<SelectOption>,
}

pub async fn agents_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> AgentsTemplate {
    render_list(&state.db, query.message()).await
}

async fn render_list(db: &Database, notice: Option<String>) -> AgentsTemplate {
    let agents = Listing::from_result("agents", agent::list_agents(db.pool()).await);
    let types = AgentType::ALL
        .iter()
        .map(|t| SelectOption::new(Route::AgentCreate(*t).path(), t.label(), false))
        .collect();

    AgentsTemplate {
        nav: Sidebar::for_path(&Route::Agents.path()),
        notice,
        agents,
        types,
    }
}

#[derive(Template)]
#[template(path = "agent_create.html")]
pub struct AgentCreateTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub draft: NewAgent,
    /// Prompt picker, ordered by name.
    pub prompts: Listing<SelectOption>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateQuery {
    #[serde(rename = "type")]
    pub agent_type: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAgentForm {
    #[serde(rename = "type", default)]
    pub agent_type: AgentType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prompt_id: String,
}

pub async fn create_page(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
) -> AgentCreateTemplate {
    let agent_type = match query.agent_type.as_deref() {
        None | Some("") => AgentType::default(),
        Some(raw) => AgentType::from_str(raw).unwrap_or_else(|e| {
            warn!(error = %e, "Unknown agent type requested, using default");
            AgentType::default()
        }),
    };
    let notice = NoticeQuery {
        notice: query.notice,
    }
    .message();

    let session = EditSession::new_agent(agent_type);
    render_create(&state.db, session.into_draft(), notice).await
}

pub async fn create_agent(
    State(state): State<AppState>,
    Form(form): Form<CreateAgentForm>,
) -> Response {
    let mut session = EditSession::new_agent(form.agent_type);
    session.update_all([
        AgentChange::Name(form.name),
        AgentChange::Prompt(form.prompt_id),
    ]);

    match session.save(&state.db, &state.owner).await {
        Ok(created) => Redirect::to(&Route::AgentSetup(created.id).path()).into_response(),
        Err(e) => {
            warn!(error = %e, "Agent create rejected");
            let status = e.status();
            let page = render_create(&state.db, session.into_draft(), Some(e.to_string())).await;
            (status, page).into_response()
        }
    }
}

async fn render_create(
    db: &Database,
    draft: NewAgent,
    notice: Option<String>,
) -> AgentCreateTemplate {
    let prompts = Listing::from_result(
        "prompts",
        prompt::list_prompts(db.pool(), PromptOrder::Name).await,
    )
    .map(|p| {
        let selected = p.id == draft.prompt_id;
        SelectOption::new(p.id, p.name, selected)
    });

    AgentCreateTemplate {
        nav: Sidebar::for_path("/dashboard/agents/create"),
        notice,
        draft,
        prompts,
    }
}

#[derive(Template)]
#[template(path = "agent_setup.html")]
pub struct AgentSetupTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub agent: Agent,
    pub config: AgentWidgetConfig,
    pub saved: bool,
    pub preview: WidgetPreview,
    pub models: Vec<SelectOption>,
    pub voices: Vec<SelectOption>,
    pub positions: Vec<SelectOption>,
    pub shapes: Vec<SelectOption>,
    pub trigger_styles: Vec<SelectOption>,
    pub colors: Vec<SelectOption>,
}

impl AgentSetupTemplate {
    fn new(setup: AgentSetup, notice: Option<String>) -> Self {
        let saved = !setup.widget.is_new();
        let config = setup.widget.into_draft();
        let agent = setup.agent;

        let models = LlmModel::ALL
            .iter()
            .map(|m| SelectOption::new(m.as_str(), m.as_str(), agent.llm_model == Some(*m)))
            .collect();
        let voices = Voice::ALL
            .iter()
            .map(|v| SelectOption::new(v.as_str(), v.as_str(), agent.voice == Some(*v)))
            .collect();
        let positions = WidgetPosition::ALL
            .iter()
            .map(|p| SelectOption::new(p.as_str(), p.label(), *p == config.position))
            .collect();
        let shapes = WidgetShape::ALL
            .iter()
            .map(|s| SelectOption::new(s.as_str(), s.label(), *s == config.shape))
            .collect();
        let trigger_styles = TriggerStyle::ALL
            .iter()
            .map(|t| SelectOption::new(t.as_str(), t.label(), *t == config.trigger_style))
            .collect();
        let colors = WIDGET_COLORS
            .iter()
            .map(|c| SelectOption::new(*c, *c, c.eq_ignore_ascii_case(&config.color)))
            .collect();

        Self {
            nav: Sidebar::for_path(&Route::AgentSetup(agent.id.clone()).path()),
            notice,
            preview: WidgetPreview::from_config(&config),
            agent,
            config,
            saved,
            models,
            voices,
            positions,
            shapes,
            trigger_styles,
            colors,
        }
    }

    /// Base path for the setup page's form actions.
    pub fn action(&self, suffix: &str) -> String {
        format!("{}/{}", Route::AgentSetup(self.agent.id.clone()).path(), suffix)
    }
}

/// Widget configuration fields as submitted by the setup form.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfigForm {
    pub position: WidgetPosition,
    pub color: String,
    pub shape: WidgetShape,
    pub trigger_style: TriggerStyle,
    #[serde(default)]
    pub title_text: String,
    #[serde(default)]
    pub welcome_message: String,
}

impl WidgetConfigForm {
    pub fn changes(self) -> [WidgetChange; 6] {
        [
            WidgetChange::Position(self.position),
            WidgetChange::Color(self.color),
            WidgetChange::Shape(self.shape),
            WidgetChange::TriggerStyle(self.trigger_style),
            WidgetChange::TitleText(self.title_text),
            WidgetChange::WelcomeMessage(self.welcome_message),
        ]
    }
}

/// Agent settings from the setup page. Blank selects are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct AgentSettingsForm {
    pub name: Option<String>,
    pub llm_model: Option<String>,
    pub voice: Option<String>,
}

impl AgentSettingsForm {
    fn fields(&self) -> std::result::Result<Vec<AgentField>, ValidationError> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(AgentField::Name(name.clone()));
        }
        if let Some(model) = self.llm_model.as_deref().filter(|m| !m.is_empty()) {
            fields.push(AgentField::LlmModel(model.parse()?));
        }
        if let Some(voice) = self.voice.as_deref().filter(|v| !v.is_empty()) {
            fields.push(AgentField::Voice(voice.parse()?));
        }
        Ok(fields)
    }
}

pub async fn setup_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    match AgentSetup::load(&state.db, &id).await {
        Ok(setup) => AgentSetupTemplate::new(setup, query.message()).into_response(),
        Err(e) => load_failed(&state.db, e).await,
    }
}

pub async fn update_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AgentSettingsForm>,
) -> Response {
    match apply_agent_settings(&state.db, &id, &form).await {
        Ok(()) => Redirect::to(&Route::AgentSetup(id).with_notice(Notice::AgentUpdated))
            .into_response(),
        Err(e) if e.is_not_found() => load_failed(&state.db, e).await,
        Err(e) => rerender_setup(&state.db, &id, None, e).await,
    }
}

async fn apply_agent_settings(db: &Database, id: &str, form: &AgentSettingsForm) -> Result<()> {
    for field in form.fields()? {
        agent::update_agent_field(db.pool(), id, &field).await?;
    }
    Ok(())
}

pub async fn save_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<WidgetConfigForm>,
) -> Response {
    let mut setup = match AgentSetup::load(&state.db, &id).await {
        Ok(setup) => setup,
        Err(e) => return load_failed(&state.db, e).await,
    };
    setup.widget.update_all(form.changes());

    match setup.widget.save(&state.db).await {
        Ok(()) => {
            Redirect::to(&Route::AgentSetup(id).with_notice(Notice::ConfigSaved)).into_response()
        }
        Err(e) => rerender_setup(&state.db, &id, Some(setup.widget.into_draft()), e).await,
    }
}

/// Save the submitted configuration and publish the agent in one step.
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<WidgetConfigForm>,
) -> Response {
    let mut setup = match AgentSetup::load(&state.db, &id).await {
        Ok(setup) => setup,
        Err(e) => return load_failed(&state.db, e).await,
    };
    setup.widget.update_all(form.changes());

    match setup.widget.publish(&state.db).await {
        Ok(_) => Redirect::to(&Route::Agents.with_notice(Notice::AgentPublished)).into_response(),
        Err(e) => rerender_setup(&state.db, &id, Some(setup.widget.into_draft()), e).await,
    }
}

/// HTMX partial: the preview for the submitted, unsaved configuration.
pub async fn preview(Path(id): Path<String>, Form(form): Form<WidgetConfigForm>) -> WidgetPreview {
    let mut session = EditSession::defaults_for(&id);
    session.update_all(form.changes());
    WidgetPreview::from_config(session.draft())
}

/// Missing agents go back to the list; other failures show the list with the error.
async fn load_failed(db: &Database, e: AdminError) -> Response {
    if e.is_not_found() {
        return Redirect::to(&Route::Agents.with_notice(Notice::AgentNotFound)).into_response();
    }
    warn!(error = %e, "Agent load failed");
    (e.status(), render_list(db, Some(e.to_string())).await).into_response()
}

/// Show the setup page again with the error, keeping the submitted draft.
async fn rerender_setup(
    db: &Database,
    id: &str,
    draft: Option<AgentWidgetConfig>,
    error: AdminError,
) -> Response {
    warn!(agent_id = %id, error = %error, "Agent setup change rejected");
    let status = error.status();
    match AgentSetup::load(db, id).await {
        Ok(mut setup) => {
            if let Some(draft) = draft {
                setup.widget = EditSession::fresh(draft);
            }
            (status, AgentSetupTemplate::new(setup, Some(error.to_string()))).into_response()
        }
        Err(e) => load_failed(db, e).await,
    }
}
