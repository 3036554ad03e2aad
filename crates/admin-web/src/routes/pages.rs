//! Placeholder pages and the session redirects.

use askama::Template;
use axum::extract::Query;
use axum::response::Redirect;

use crate::nav::{Notice, Route, Sidebar};
use crate::routes::NoticeQuery;

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub nav: Sidebar,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub notice: Option<String>,
}

pub async fn root() -> Redirect {
    Redirect::to(&Route::Dashboard.path())
}

pub async fn settings_page() -> SettingsTemplate {
    SettingsTemplate {
        nav: Sidebar::for_path(&Route::Settings.path()),
        notice: None,
    }
}

pub async fn login_page(Query(query): Query<NoticeQuery>) -> LoginTemplate {
    LoginTemplate {
        notice: query.message(),
    }
}

/// There is no session to end yet; logging out just returns to the login page.
pub async fn logout() -> Redirect {
    Redirect::to(&Route::Login.with_notice(Notice::LoggedOut))
}
