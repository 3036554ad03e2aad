//! Users page: profile list and the add-user form.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use database::{profile, Database, Profile, Role};
use serde::Deserialize;
use tracing::warn;

use crate::nav::{Notice, Route, Sidebar};
use crate::routes::{Listing, NoticeQuery, SelectOption};
use crate::session::{EditSession, ProfileChange};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
    pub users: Listing<Profile>,
    pub form: UserForm,
    pub roles: Vec<SelectOption>,
}

/// Add-user form.
///
/// Email and password are collected but not stored; there is no auth backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
}

impl UserForm {
    fn role(&self) -> Role {
        self.role.unwrap_or(Role::User)
    }
}

pub async fn users_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> UsersTemplate {
    render(&state.db, UserForm::default(), query.message()).await
}

pub async fn create_user(State(state): State<AppState>, Form(form): Form<UserForm>) -> Response {
    let mut session = EditSession::new_profile();
    session.update_all([
        ProfileChange::FullName(form.full_name.clone()),
        ProfileChange::Role(form.role()),
    ]);

    match session.save(&state.db).await {
        Ok(_) => Redirect::to(&Route::Users.with_notice(Notice::UserCreated)).into_response(),
        Err(e) => {
            warn!(error = %e, "User create rejected");
            let form = UserForm {
                password: String::new(),
                ..form
            };
            let page = render(&state.db, form, Some(e.to_string())).await;
            (e.status(), page).into_response()
        }
    }
}

async fn render(db: &Database, form: UserForm, notice: Option<String>) -> UsersTemplate {
    let users = Listing::from_result("users", profile::list_profiles(db.pool()).await);
    let current = form.role();
    let roles = Role::ALL
        .iter()
        .map(|role| SelectOption::new(role.as_str(), role.label(), *role == current))
        .collect();

    UsersTemplate {
        nav: Sidebar::for_path(&Route::Users.path()),
        notice,
        users,
        form,
        roles,
    }
}
