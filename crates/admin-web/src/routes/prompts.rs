//! Prompt pages: list, shared create/edit form, and delete confirmation.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use database::{prompt, Database, Prompt, PromptOrder};
use serde::Deserialize;
use tracing::warn;

use crate::error::AdminError;
use crate::nav::{Notice, Route, Sidebar};
use crate::routes::{Listing, NoticeQuery};
use crate::session::{EditSession, PromptChange, PromptDraft};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "prompts.html")]
pub struct PromptsTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub prompts: Listing<Prompt>,
}

#[derive(Template)]
#[template(path = "prompt_form.html")]
pub struct PromptFormTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub draft: PromptDraft,
}

impl PromptFormTemplate {
    fn new(draft: PromptDraft, notice: Option<String>) -> Self {
        Self {
            nav: Sidebar::for_path(&Route::Prompts.path()),
            notice,
            draft,
        }
    }

    /// Where the form posts: the prompt itself when editing, the list when creating.
    pub fn action(&self) -> String {
        match &self.draft.id {
            Some(id) => format!("{}/{}", Route::Prompts.path(), id),
            None => Route::Prompts.path(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.draft.id.is_some()
    }
}

#[derive(Template)]
#[template(path = "prompt_delete.html")]
pub struct PromptDeleteTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub prompt: Prompt,
}

#[derive(Debug, Default, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt_body: String,
}

impl PromptForm {
    fn changes(self) -> [PromptChange; 3] {
        [
            PromptChange::Name(self.name),
            PromptChange::Description(self.description),
            PromptChange::Body(self.prompt_body),
        ]
    }
}

/// Delete confirmation. Anything but an explicit `confirm=true` cancels.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn prompts_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> PromptsTemplate {
    render_list(&state.db, query.message()).await
}

async fn render_list(db: &Database, notice: Option<String>) -> PromptsTemplate {
    let prompts = Listing::from_result(
        "prompts",
        prompt::list_prompts(db.pool(), PromptOrder::Newest).await,
    );
    PromptsTemplate {
        nav: Sidebar::for_path(&Route::Prompts.path()),
        notice,
        prompts,
    }
}

pub async fn new_prompt_page() -> PromptFormTemplate {
    PromptFormTemplate::new(EditSession::new_prompt().into_draft(), None)
}

pub async fn edit_prompt_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match EditSession::load_prompt(&state.db, &id).await {
        Ok(session) => PromptFormTemplate::new(session.into_draft(), None).into_response(),
        Err(e) => load_failed(&state.db, e).await,
    }
}

pub async fn create_prompt(State(state): State<AppState>, Form(form): Form<PromptForm>) -> Response {
    let mut session = EditSession::new_prompt();
    session.update_all(form.changes());
    save(&state, session).await
}

pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PromptForm>,
) -> Response {
    let mut session = match EditSession::load_prompt(&state.db, &id).await {
        Ok(session) => session,
        Err(e) => return load_failed(&state.db, e).await,
    };
    session.update_all(form.changes());
    save(&state, session).await
}

async fn save(state: &AppState, mut session: EditSession<PromptDraft>) -> Response {
    match session.save(&state.db, &state.owner).await {
        Ok(_) => Redirect::to(&Route::Prompts.with_notice(Notice::PromptSaved)).into_response(),
        Err(e) => {
            warn!(error = %e, "Prompt save rejected");
            let page = PromptFormTemplate::new(session.into_draft(), Some(e.to_string()));
            (e.status(), page).into_response()
        }
    }
}

pub async fn delete_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match prompt::get_prompt(state.db.pool(), &id).await {
        Ok(prompt) => PromptDeleteTemplate {
            nav: Sidebar::for_path(&Route::Prompts.path()),
            notice: None,
            prompt,
        }
        .into_response(),
        Err(e) => load_failed(&state.db, e.into()).await,
    }
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    if !form.confirm {
        return Redirect::to(&Route::Prompts.path()).into_response();
    }

    match prompt::delete_prompt(state.db.pool(), &id).await {
        Ok(()) => Redirect::to(&Route::Prompts.with_notice(Notice::PromptDeleted)).into_response(),
        Err(e) => load_failed(&state.db, e.into()).await,
    }
}

/// Missing prompts go back to the list; other failures show the list with the error.
async fn load_failed(db: &Database, e: AdminError) -> Response {
    if e.is_not_found() {
        return Redirect::to(&Route::Prompts.with_notice(Notice::PromptNotFound)).into_response();
    }
    warn!(error = %e, "Prompt operation failed");
    (e.status(), render_list(db, Some(e.to_string())).await).into_response()
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get, post_form, test_state};
    use axum::http::StatusCode;
    use database::{prompt, PromptOrder};

    async fn create(state: &crate::state::AppState, name: &str) -> String {
        let created = post_form(
            state,
            "/dashboard/prompts",
            &format!("name={}&description=&prompt_body=Be+helpful", name),
        )
        .await;
        assert_eq!(created.status, StatusCode::SEE_OTHER);
        assert_eq!(
            created.location.as_deref(),
            Some("/dashboard/prompts?notice=prompt_saved")
        );
        prompt::list_prompts(state.db.pool(), PromptOrder::Newest)
            .await
            .unwrap()[0]
            .id
            .clone()
    }

    #[tokio::test]
    async fn test_empty_list_and_create() {
        let state = test_state().await;

        let empty = get(&state, "/dashboard/prompts").await;
        assert!(empty.body.contains("No prompts yet"));

        create(&state, "Support").await;
        let list = get(&state, "/dashboard/prompts").await;
        assert!(list.body.contains("Support"));
        assert!(list.body.contains(r#"<p class="excerpt">Be helpful</p>"#));
        assert!(!list.body.contains("No prompts yet"));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let state = test_state().await;
        create(&state, "First").await;
        create(&state, "Second").await;

        let list = get(&state, "/dashboard/prompts").await;
        let first = list.body.find("First").unwrap();
        let second = list.body.find("Second").unwrap();
        assert!(second < first);
    }

    #[tokio::test]
    async fn test_blank_name_rerenders_form() {
        let state = test_state().await;

        let page = post_form(&state, "/dashboard/prompts", "name=+&prompt_body=Keep+me").await;
        assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(page.body.contains("name cannot be empty"));
        assert!(page.body.contains("Keep me"));
        assert_eq!(prompt::count_prompts(state.db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_prompt() {
        let state = test_state().await;
        let id = create(&state, "Support").await;

        let form = get(&state, &format!("/dashboard/prompts/{}/edit", id)).await;
        assert_eq!(form.status, StatusCode::OK);
        assert!(form.body.contains(r#"value="Support""#));
        assert!(form.body.contains("Edit Prompt"));

        let saved = post_form(
            &state,
            &format!("/dashboard/prompts/{}", id),
            "name=Support+v2&description=Tier+one&prompt_body=Be+kind",
        )
        .await;
        assert_eq!(saved.status, StatusCode::SEE_OTHER);

        let stored = prompt::get_prompt(state.db.pool(), &id).await.unwrap();
        assert_eq!(stored.name, "Support v2");
        assert_eq!(stored.description, "Tier one");
        assert_eq!(prompt::count_prompts(state.db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let state = test_state().await;
        let id = create(&state, "Support").await;
        let uri = format!("/dashboard/prompts/{}/delete", id);

        let confirm_page = get(&state, &uri).await;
        assert_eq!(confirm_page.status, StatusCode::OK);
        assert!(confirm_page.body.contains("Support"));

        let declined = post_form(&state, &uri, "").await;
        assert_eq!(declined.location.as_deref(), Some("/dashboard/prompts"));
        assert_eq!(prompt::count_prompts(state.db.pool()).await.unwrap(), 1);

        let deleted = post_form(&state, &uri, "confirm=true").await;
        assert_eq!(
            deleted.location.as_deref(),
            Some("/dashboard/prompts?notice=prompt_deleted")
        );
        assert_eq!(prompt::count_prompts(state.db.pool()).await.unwrap(), 0);

        let list = get(&state, "/dashboard/prompts").await;
        assert!(!list.body.contains("Support"));
        assert!(!list.body.contains("Be helpful"));
        assert!(list.body.contains("No prompts yet"));
    }

    #[tokio::test]
    async fn test_store_failure_renders_list_with_alert() {
        let state = test_state().await;
        state.db.close().await;

        let page = post_form(&state, "/dashboard/prompts/abc/delete", "confirm=true").await;
        assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.body.contains("<html"));
        assert!(page.body.contains("closed pool"));
        assert!(!page.body.starts_with('{'));

        let edit = get(&state, "/dashboard/prompts/abc/edit").await;
        assert_eq!(edit.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(edit.body.contains("Could not load prompts"));
    }

    #[tokio::test]
    async fn test_missing_prompt_redirects() {
        let state = test_state().await;

        let edit = get(&state, "/dashboard/prompts/missing/edit").await;
        assert_eq!(
            edit.location.as_deref(),
            Some("/dashboard/prompts?notice=prompt_not_found")
        );

        let delete = post_form(&state, "/dashboard/prompts/missing/delete", "confirm=true").await;
        assert_eq!(
            delete.location.as_deref(),
            Some("/dashboard/prompts?notice=prompt_not_found")
        );
    }
}
