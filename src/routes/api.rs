//! Public read-only JSON. Lists contain active rows only, in display order.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppResult;
use crate::models::{DiscountCode, Game, Profile, SocialLink, Sponsor};
use crate::state::AppState;
use crate::storage::Visibility;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(profile))
        .route("/api/social-links", get(social_links))
        .route("/api/sponsors", get(sponsors))
        .route("/api/discount-codes", get(discount_codes))
        .route("/api/games", get(games))
}

/// `null` until the profile has been saved once.
async fn profile(State(state): State<AppState>) -> AppResult<Json<Option<Profile>>> {
    Ok(Json(state.storage.get_profile()?))
}

async fn social_links(State(state): State<AppState>) -> AppResult<Json<Vec<SocialLink>>> {
    Ok(Json(state.storage.list_social_links(Visibility::ActiveOnly)?))
}

async fn sponsors(State(state): State<AppState>) -> AppResult<Json<Vec<Sponsor>>> {
    Ok(Json(state.storage.list_sponsors(Visibility::ActiveOnly)?))
}

async fn discount_codes(State(state): State<AppState>) -> AppResult<Json<Vec<DiscountCode>>> {
    Ok(Json(state.storage.list_discount_codes(Visibility::ActiveOnly)?))
}

async fn games(State(state): State<AppState>) -> AppResult<Json<Vec<Game>>> {
    Ok(Json(state.storage.list_games(Visibility::ActiveOnly)?))
}
