/// Failures talking to the Riot API.
#[derive(thiserror::Error, Debug)]
pub enum LolError {
    /// No API key configured, neither on the profile nor in the config.
    #[error("no Riot API key configured")]
    MissingApiKey,

    /// Region string is not a known Riot platform.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// Request URL could not be built.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Riot answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    /// The match did not list the looked-up player.
    #[error("player {puuid} missing from match {match_id}")]
    ParticipantMissing { match_id: String, puuid: String },
}

pub type Result<T> = std::result::Result<T, LolError>;
