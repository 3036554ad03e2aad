//! JSON API over the same operations as the HTML pages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use database::{
    agent, profile, prompt, widget_config, Agent, AgentField, AgentWidgetConfig, LlmModel,
    NewAgent, NewProfile, Profile, Prompt, PromptFields, PromptOrder, Voice,
};
use serde::Deserialize;

use crate::error::Result;
use crate::routes::agents::WidgetConfigForm;
use crate::session::{AgentSetup, EditSession, PromptChange, PromptDraft};
use crate::state::AppState;

pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>> {
    let profiles = profile::list_profiles(state.db.pool()).await?;
    Ok(Json(profiles))
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(new): Json<NewProfile>,
) -> Result<(StatusCode, Json<Profile>)> {
    let created = EditSession::fresh(new).save(&state.db).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Default, Deserialize)]
pub struct PromptListQuery {
    /// `name` for alphabetical order; newest first otherwise.
    pub sort: Option<String>,
}

pub async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<PromptListQuery>,
) -> Result<Json<Vec<Prompt>>> {
    let order = match query.sort.as_deref() {
        Some("name") => PromptOrder::Name,
        _ => PromptOrder::Newest,
    };
    let prompts = prompt::list_prompts(state.db.pool(), order).await?;
    Ok(Json(prompts))
}

pub async fn create_prompt(
    State(state): State<AppState>,
    Json(fields): Json<PromptFields>,
) -> Result<(StatusCode, Json<Prompt>)> {
    let mut session = EditSession::fresh(PromptDraft { id: None, fields });
    let created = session.save(&state.db, &state.owner).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<PromptFields>,
) -> Result<Json<Prompt>> {
    let mut session = EditSession::load_prompt(&state.db, &id).await?;
    session.update_all([
        PromptChange::Name(fields.name),
        PromptChange::Description(fields.description),
        PromptChange::Body(fields.prompt_body),
    ]);
    let updated = session.save(&state.db, &state.owner).await?;
    Ok(Json(updated))
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    prompt::delete_prompt(state.db.pool(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_agents(State(state): State<AppState>) -> Result<Json<Vec<Agent>>> {
    let agents = agent::list_agents(state.db.pool()).await?;
    Ok(Json(agents))
}

pub async fn create_agent(
    State(state): State<AppState>,
    Json(new): Json<NewAgent>,
) -> Result<(StatusCode, Json<Agent>)> {
    let created = EditSession::fresh(new).save(&state.db, &state.owner).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_agent(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Agent>> {
    let agent = agent::get_agent(state.db.pool(), &id).await?;
    Ok(Json(agent))
}

/// Partial agent update; absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub llm_model: Option<LlmModel>,
    pub voice: Option<Voice>,
}

impl AgentPatch {
    fn fields(self) -> Vec<AgentField> {
        let mut fields = Vec::new();
        if let Some(name) = self.name {
            fields.push(AgentField::Name(name));
        }
        if let Some(model) = self.llm_model {
            fields.push(AgentField::LlmModel(model));
        }
        if let Some(voice) = self.voice {
            fields.push(AgentField::Voice(voice));
        }
        fields
    }
}

pub async fn patch_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AgentPatch>,
) -> Result<Json<Agent>> {
    for field in patch.fields() {
        agent::update_agent_field(state.db.pool(), &id, &field).await?;
    }
    let agent = agent::get_agent(state.db.pool(), &id).await?;
    Ok(Json(agent))
}

/// Stored configuration, or the defaults for an agent that has none yet.
pub async fn get_widget_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentWidgetConfig>> {
    agent::get_agent(state.db.pool(), &id).await?;
    let config = widget_config::get_or_default(state.db.pool(), &id).await?;
    Ok(Json(config))
}

pub async fn put_widget_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<WidgetConfigForm>,
) -> Result<Json<AgentWidgetConfig>> {
    let mut setup = AgentSetup::load(&state.db, &id).await?;
    setup.widget.update_all(form.changes());
    setup.widget.save(&state.db).await?;
    Ok(Json(setup.widget.into_draft()))
}

/// Publish with the stored configuration, saving the defaults first if needed.
pub async fn publish_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>> {
    let mut setup = AgentSetup::load(&state.db, &id).await?;
    let published = setup.widget.publish(&state.db).await?;
    Ok(Json(published))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get, send_json, test_state};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn parse(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_agent_lifecycle() {
        let state = test_state().await;

        let prompt = send_json(
            &state,
            "POST",
            "/api/prompts",
            json!({ "name": "Support", "prompt_body": "Help" }),
        )
        .await;
        assert_eq!(prompt.status, StatusCode::CREATED);
        let prompt_id = parse(&prompt.body)["id"].as_str().unwrap().to_string();

        let created = send_json(
            &state,
            "POST",
            "/api/agents",
            json!({ "name": "Bot1", "type": "widget_text", "prompt_id": prompt_id }),
        )
        .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let agent = parse(&created.body);
        assert_eq!(agent["status"], "draft");
        assert_eq!(agent["type"], "widget_text");
        let id = agent["id"].as_str().unwrap().to_string();

        let config = get(&state, &format!("/api/agents/{}/widget-config", id)).await;
        assert_eq!(parse(&config.body)["position"], "bottom-right");

        let patched = send_json(
            &state,
            "PATCH",
            &format!("/api/agents/{}", id),
            json!({ "llm_model": "Claude 3.5 Sonnet", "voice": "Verse" }),
        )
        .await;
        assert_eq!(patched.status, StatusCode::OK);
        assert_eq!(parse(&patched.body)["llm_model"], "Claude 3.5 Sonnet");

        let put = send_json(
            &state,
            "PUT",
            &format!("/api/agents/{}/widget-config", id),
            json!({
                "position": "center",
                "color": "#8B5CF6",
                "shape": "square",
                "trigger_style": "icon",
                "title_text": "Hi",
                "welcome_message": "Welcome"
            }),
        )
        .await;
        assert_eq!(put.status, StatusCode::OK);

        let published = send_json(
            &state,
            "POST",
            &format!("/api/agents/{}/publish", id),
            json!({}),
        )
        .await;
        assert_eq!(published.status, StatusCode::OK);
        assert_eq!(parse(&published.body)["status"], "published");

        let config = get(&state, &format!("/api/agents/{}/widget-config", id)).await;
        assert_eq!(parse(&config.body)["color"], "#8B5CF6");
    }

    #[tokio::test]
    async fn test_errors_are_json() {
        let state = test_state().await;

        let missing = get(&state, "/api/agents/missing").await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(parse(&missing.body)["error"], "Agent not found: missing");

        let invalid = send_json(
            &state,
            "POST",
            "/api/agents",
            json!({ "name": "Bot1", "prompt_id": "" }),
        )
        .await;
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(parse(&invalid.body)["error"], "prompt cannot be empty");

        let blank = send_json(&state, "POST", "/api/profiles", json!({ "full_name": " ", "role": "user" })).await;
        assert_eq!(blank.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_prompt_update_and_delete() {
        let state = test_state().await;

        let created = send_json(&state, "POST", "/api/prompts", json!({ "name": "Support" })).await;
        let id = parse(&created.body)["id"].as_str().unwrap().to_string();

        let updated = send_json(
            &state,
            "PUT",
            &format!("/api/prompts/{}", id),
            json!({ "name": "Sales", "description": "Outbound" }),
        )
        .await;
        assert_eq!(parse(&updated.body)["name"], "Sales");

        let deleted = send_json(&state, "DELETE", &format!("/api/prompts/{}", id), json!({})).await;
        assert_eq!(deleted.status, StatusCode::NO_CONTENT);

        let list = get(&state, "/api/prompts?sort=name").await;
        assert_eq!(parse(&list.body), json!([]));

        let again = send_json(&state, "DELETE", &format!("/api/prompts/{}", id), json!({})).await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
    }
}
