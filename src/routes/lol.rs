use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::lol::{self, RiotClient, SummonerProfile, SummonerQuery};
use crate::models::LolSettings;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/lol/summoner/{region}/{name}/{tag}", get(summoner))
}

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub count: Option<String>,
}

impl LookupParams {
    /// Requested match count, saturated into range. Unparseable values are ignored.
    fn match_count(&self) -> Option<u8> {
        let count = self.count.as_deref()?.trim().parse::<u64>().ok()?;
        Some(count.min(u64::from(LolSettings::MAX_MATCHES)) as u8)
    }
}

/// GET /api/lol/summoner/{region}/{name}/{tag}
///
/// Always 200: without an API key, or when Riot cannot be reached, the sample
/// profile is served with `isFallback: true`.
async fn summoner(
    State(state): State<AppState>,
    Path((region, name, tag)): Path<(String, String, String)>,
    Query(params): Query<LookupParams>,
) -> Json<SummonerProfile> {
    let profile = state.storage.get_profile().unwrap_or_else(|e| {
        tracing::warn!("Could not read profile for League lookup: {}", e);
        None
    });

    let settings = LolSettings {
        match_count: params.match_count().unwrap_or_else(|| {
            profile
                .as_ref()
                .map(|p| p.lol_settings.match_count)
                .unwrap_or(LolSettings::default().match_count)
        }),
        ..LolSettings::default()
    };
    let query = SummonerQuery {
        region,
        game_name: name,
        tag_line: tag.trim_start_matches('#').to_string(),
        match_count: settings.match_count(),
    };

    let api_key = profile
        .as_ref()
        .and_then(|p| p.riot_api_key())
        .map(str::to_string)
        .or_else(|| state.config.riot.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    let Some(api_key) = api_key else {
        tracing::warn!("No Riot API key configured, serving sample data for {}", query.riot_id());
        return Json(lol::fallback_profile(&query));
    };

    let client = RiotClient::new(state.http.clone(), api_key);
    Json(lol::lookup_summoner(&client, &query).await)
}
