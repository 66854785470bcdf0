//! Entity shapes and the validated payloads used to create and update them.
//!
//! Every entity has a row type (what the API returns), a `New*` payload with
//! server-side defaults, and a `*Patch` payload where every field is optional.
//! Optional text fields are cleared by sending an empty string.

pub mod discount_code;
pub mod game;
pub mod profile;
pub mod social_link;
pub mod sponsor;

pub use discount_code::{DiscountCode, DiscountCodePatch, NewDiscountCode};
pub use game::{Game, GamePatch, NewGame};
pub use profile::{LolSettings, Profile, ProfileUpdate};
pub use social_link::{DisplayStyle, NewSocialLink, SocialLink, SocialLinkPatch};
pub use sponsor::{NewSponsor, Sponsor, SponsorPatch};

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// Body of a reorder request: ids in their new display order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderRequest {
    #[validate(length(min = 1, max = 500))]
    pub ids: Vec<String>,
}

pub(crate) fn default_true() -> bool {
    true
}

/// Empty or whitespace-only text is stored as NULL.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Apply a patch value to a nullable text column.
pub(crate) fn patch_text(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *target = non_empty(Some(value));
    }
}

pub(crate) fn patch<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Hex colour, `#rgb` or `#rrggbb`. Empty strings pass so a colour can be cleared.
pub(crate) fn validate_color(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || crate::theme::parse_hex(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("color"))
    }
}

/// Absolute http(s) URL or a root-relative path such as an uploaded file.
/// Empty strings pass so the value can be cleared. Quotes, parens, backslashes
/// and whitespace are refused since links land inside CSS `url()`.
pub(crate) fn validate_link(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '(' | ')' | '\\'))
    {
        return Err(ValidationError::new("url"));
    }
    if value.is_empty() || value.starts_with('/') {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "mailto") => Ok(()),
        _ => Err(ValidationError::new("url")),
    }
}

pub(crate) fn validate_percent(value: &Option<Option<i64>>) -> Result<(), ValidationError> {
    match value {
        Some(Some(p)) if !(0..=100).contains(p) => Err(ValidationError::new("percent")),
        _ => Ok(()),
    }
}
