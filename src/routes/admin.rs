//! Admin JSON API. Every handler takes an [`AdminUser`], so a missing session
//! is a 401 and a non-admin session a 403 before any body is read.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::error::AppResult;
use crate::extractors::{AdminUser, ValidatedJson};
use crate::models::{
    DiscountCode, DiscountCodePatch, Game, GamePatch, NewDiscountCode, NewGame, NewSocialLink,
    NewSponsor, Profile, ProfileUpdate, ReorderRequest, SocialLink, SocialLinkPatch, Sponsor,
    SponsorPatch,
};
use crate::state::AppState;
use crate::storage::Visibility;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/profile", put(update_profile))
        .route(
            "/api/admin/social-links",
            get(list_social_links).post(create_social_link),
        )
        .route(
            "/api/admin/social-links/reorder",
            post(reorder_social_links),
        )
        .route(
            "/api/admin/social-links/{id}",
            put(update_social_link).delete(delete_social_link),
        )
        .route("/api/admin/sponsors", get(list_sponsors).post(create_sponsor))
        .route("/api/admin/sponsors/reorder", post(reorder_sponsors))
        .route(
            "/api/admin/sponsors/{id}",
            put(update_sponsor).delete(delete_sponsor),
        )
        .route(
            "/api/admin/discount-codes",
            get(list_discount_codes).post(create_discount_code),
        )
        .route(
            "/api/admin/discount-codes/reorder",
            post(reorder_discount_codes),
        )
        .route(
            "/api/admin/discount-codes/{id}",
            put(update_discount_code).delete(delete_discount_code),
        )
        .route("/api/admin/games", get(list_games).post(create_game))
        .route("/api/admin/games/reorder", post(reorder_games))
        .route("/api/admin/games/{id}", put(update_game).delete(delete_game))
}

// -- Profile --

async fn update_profile(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> AppResult<Json<Profile>> {
    Ok(Json(state.storage.update_profile(update)?))
}

// -- Social links --

async fn list_social_links(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<SocialLink>>> {
    Ok(Json(state.storage.list_social_links(Visibility::All)?))
}

async fn create_social_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(input): ValidatedJson<NewSocialLink>,
) -> AppResult<(StatusCode, Json<SocialLink>)> {
    let link = state.storage.create_social_link(input)?;
    tracing::info!("Created social link {} ({})", link.id, link.platform);
    Ok((StatusCode::CREATED, Json(link)))
}

async fn update_social_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<SocialLinkPatch>,
) -> AppResult<Json<SocialLink>> {
    Ok(Json(state.storage.update_social_link(&id, update)?))
}

async fn delete_social_link(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.storage.delete_social_link(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_social_links(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> AppResult<StatusCode> {
    state.storage.reorder_social_links(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Sponsors --

async fn list_sponsors(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Sponsor>>> {
    Ok(Json(state.storage.list_sponsors(Visibility::All)?))
}

async fn create_sponsor(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(input): ValidatedJson<NewSponsor>,
) -> AppResult<(StatusCode, Json<Sponsor>)> {
    let sponsor = state.storage.create_sponsor(input)?;
    tracing::info!("Created sponsor {} ({})", sponsor.id, sponsor.name);
    Ok((StatusCode::CREATED, Json(sponsor)))
}

async fn update_sponsor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<SponsorPatch>,
) -> AppResult<Json<Sponsor>> {
    Ok(Json(state.storage.update_sponsor(&id, update)?))
}

async fn delete_sponsor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.storage.delete_sponsor(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_sponsors(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> AppResult<StatusCode> {
    state.storage.reorder_sponsors(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Discount codes --

async fn list_discount_codes(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<DiscountCode>>> {
    Ok(Json(state.storage.list_discount_codes(Visibility::All)?))
}

async fn create_discount_code(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(input): ValidatedJson<NewDiscountCode>,
) -> AppResult<(StatusCode, Json<DiscountCode>)> {
    let code = state.storage.create_discount_code(input)?;
    tracing::info!("Created discount code {} ({})", code.id, code.code);
    Ok((StatusCode::CREATED, Json(code)))
}

async fn update_discount_code(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<DiscountCodePatch>,
) -> AppResult<Json<DiscountCode>> {
    Ok(Json(state.storage.update_discount_code(&id, update)?))
}

async fn delete_discount_code(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.storage.delete_discount_code(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_discount_codes(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> AppResult<StatusCode> {
    state.storage.reorder_discount_codes(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Games --

async fn list_games(State(state): State<AppState>, _admin: AdminUser) -> AppResult<Json<Vec<Game>>> {
    Ok(Json(state.storage.list_games(Visibility::All)?))
}

async fn create_game(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(input): ValidatedJson<NewGame>,
) -> AppResult<(StatusCode, Json<Game>)> {
    let game = state.storage.create_game(input)?;
    tracing::info!("Created game {} ({})", game.id, game.name);
    Ok((StatusCode::CREATED, Json(game)))
}

async fn update_game(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<GamePatch>,
) -> AppResult<Json<Game>> {
    Ok(Json(state.storage.update_game(&id, update)?))
}

async fn delete_game(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.storage.delete_game(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_games(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<ReorderRequest>,
) -> AppResult<StatusCode> {
    state.storage.reorder_games(&req.ids)?;
    Ok(StatusCode::NO_CONTENT)
}
