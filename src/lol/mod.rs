//! League of Legends widget: summoner, rank, and recent matches for a Riot ID.
//!
//! Lookups never fail from the caller's point of view. If the account or
//! summoner cannot be fetched, a fixed sample profile is returned instead and
//! flagged with `is_fallback`. A failed ranked lookup only blanks the rank,
//! and a failed match lookup only drops that match.

pub mod client;
pub mod error;
pub mod region;

pub use client::{RiotApi, RiotClient};
pub use error::LolError;
pub use region::{Platform, RoutingRegion};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;

use client::{LeagueEntry, MatchDetail};

const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerProfile {
    pub summoner_name: String,
    pub summoner_level: i64,
    pub profile_icon_id: i64,
    pub region: String,
    pub rank: Option<RankInfo>,
    pub recent_matches: Vec<MatchSummary>,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankInfo {
    pub queue_type: String,
    /// Title-cased tier, e.g. `Diamond`.
    pub tier: String,
    pub division: String,
    pub league_points: i64,
    pub wins: i64,
    pub losses: i64,
    pub win_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: String,
    pub champion_name: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub win: bool,
    pub cs: i64,
    pub game_mode: String,
    /// Seconds.
    pub game_duration: i64,
    /// Game end time, when Riot reports it.
    pub played_at: Option<DateTime<Utc>>,
}

/// Riot ID to look up. `tag_line` is without the leading `#`.
#[derive(Debug, Clone)]
pub struct SummonerQuery {
    pub region: String,
    pub game_name: String,
    pub tag_line: String,
    pub match_count: usize,
}

impl SummonerQuery {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Fetch live data, substituting the sample profile on account or summoner failure.
pub async fn lookup_summoner(api: &dyn RiotApi, query: &SummonerQuery) -> SummonerProfile {
    match fetch_live(api, query).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(
                "League lookup for {} failed, serving sample data: {}",
                query.riot_id(),
                e
            );
            fallback_profile(query)
        }
    }
}

async fn fetch_live(api: &dyn RiotApi, query: &SummonerQuery) -> error::Result<SummonerProfile> {
    let platform = Platform::parse(&query.region)
        .ok_or_else(|| LolError::UnknownRegion(query.region.clone()))?;

    let account = api
        .account_by_riot_id(platform, &query.game_name, &query.tag_line)
        .await?;
    let summoner = api.summoner_by_puuid(platform, &account.puuid).await?;

    let rank = match api.league_entries(platform, &account.puuid).await {
        Ok(entries) => pick_rank(&entries),
        Err(e) => {
            tracing::warn!("Ranked lookup for {} failed: {}", query.riot_id(), e);
            None
        }
    };

    let recent_matches = match api
        .match_ids(platform, &account.puuid, query.match_count)
        .await
    {
        Ok(ids) => {
            let details = join_all(ids.iter().map(|id| api.match_detail(platform, id))).await;
            details
                .into_iter()
                .filter_map(|detail| {
                    detail
                        .and_then(|d| summarize_match(&d, &account.puuid))
                        .map_err(|e| tracing::debug!("Skipping match: {}", e))
                        .ok()
                })
                .collect()
        }
        Err(e) => {
            tracing::warn!("Match history for {} failed: {}", query.riot_id(), e);
            Vec::new()
        }
    };

    let game_name = account.game_name.unwrap_or_else(|| query.game_name.clone());
    let tag_line = account.tag_line.unwrap_or_else(|| query.tag_line.clone());

    Ok(SummonerProfile {
        summoner_name: format!("{}#{}", game_name, tag_line),
        summoner_level: summoner.summoner_level,
        profile_icon_id: summoner.profile_icon_id,
        region: platform.as_str().to_string(),
        rank,
        recent_matches,
        is_fallback: false,
    })
}

/// Solo queue when present, otherwise whatever queue Riot lists first.
fn pick_rank(entries: &[LeagueEntry]) -> Option<RankInfo> {
    let entry = entries
        .iter()
        .find(|e| e.queue_type == SOLO_QUEUE)
        .or_else(|| entries.first())?;

    Some(RankInfo {
        queue_type: entry.queue_type.clone(),
        tier: title_case(&entry.tier),
        division: entry.rank.clone(),
        league_points: entry.league_points,
        wins: entry.wins,
        losses: entry.losses,
        win_rate: win_rate(entry.wins, entry.losses),
    })
}

fn summarize_match(detail: &MatchDetail, puuid: &str) -> error::Result<MatchSummary> {
    let player = detail
        .info
        .participants
        .iter()
        .find(|p| p.puuid == puuid)
        .ok_or_else(|| LolError::ParticipantMissing {
            match_id: detail.metadata.match_id.clone(),
            puuid: puuid.to_string(),
        })?;

    Ok(MatchSummary {
        match_id: detail.metadata.match_id.clone(),
        champion_name: player.champion_name.clone(),
        kills: player.kills,
        deaths: player.deaths,
        assists: player.assists,
        win: player.win,
        cs: player.total_minions_killed + player.neutral_minions_killed,
        game_mode: detail.info.game_mode.clone(),
        game_duration: detail.info.game_duration,
        played_at: detail
            .info
            .game_end_timestamp
            .and_then(DateTime::from_timestamp_millis),
    })
}

fn title_case(tier: &str) -> String {
    let lower = tier.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn win_rate(wins: i64, losses: i64) -> u32 {
    let games = wins + losses;
    if games <= 0 {
        return 0;
    }
    ((wins as f64 / games as f64) * 100.0).round() as u32
}

/// Sample profile shown when live data is unavailable.
pub fn fallback_profile(query: &SummonerQuery) -> SummonerProfile {
    let matches: [(&str, i64, i64, i64, bool, i64, i64); 5] = [
        ("Ahri", 8, 3, 11, true, 212, 1764),
        ("Jinx", 12, 5, 7, true, 245, 2011),
        ("Lee Sin", 4, 6, 9, false, 158, 1893),
        ("Thresh", 1, 4, 19, true, 42, 1642),
        ("Yasuo", 6, 9, 3, false, 198, 2245),
    ];

    let recent_matches = matches
        .iter()
        .enumerate()
        .map(
            |(i, &(champion, kills, deaths, assists, win, cs, duration))| MatchSummary {
                match_id: format!("SAMPLE_{}", i + 1),
                champion_name: champion.to_string(),
                kills,
                deaths,
                assists,
                win,
                cs,
                game_mode: "CLASSIC".to_string(),
                game_duration: duration,
                played_at: None,
            },
        )
        .collect();

    SummonerProfile {
        summoner_name: query.riot_id(),
        summoner_level: 247,
        profile_icon_id: 4568,
        region: query.region.to_ascii_lowercase(),
        rank: Some(RankInfo {
            queue_type: SOLO_QUEUE.to_string(),
            tier: "Diamond".to_string(),
            division: "II".to_string(),
            league_points: 67,
            wins: 142,
            losses: 118,
            win_rate: win_rate(142, 118),
        }),
        recent_matches,
        is_fallback: true,
    }
}
