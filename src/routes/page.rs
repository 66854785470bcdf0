use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::AppResult;
use crate::page::{build_page, PageData, PageView, Section};
use crate::state::AppState;
use crate::storage::Visibility;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub page: PageView,
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// Active rows and the profile (or its defaults) for the public page.
pub fn load_page_data(state: &AppState) -> AppResult<PageData> {
    let storage = &state.storage;
    Ok(PageData {
        profile: storage.get_profile()?.unwrap_or_default(),
        social_links: storage.list_social_links(Visibility::ActiveOnly)?,
        sponsors: storage.list_sponsors(Visibility::ActiveOnly)?,
        discount_codes: storage.list_discount_codes(Visibility::ActiveOnly)?,
        games: storage.list_games(Visibility::ActiveOnly)?,
    })
}

pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let data = load_page_data(&state)?;
    let page = build_page(&data);
    tracing::debug!("Rendering {} sections", page.sections.len());
    Ok(Html(HomeTemplate { page }).into_response())
}
