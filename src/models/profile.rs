use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{patch, patch_text, validate_color, validate_link};
use crate::layout::{validate_layout, LayoutEntry};
use crate::theme::DEFAULT_THEME_COLOR;

/// Primary key of the single profile row.
pub const PROFILE_ID: &str = "main";

/// Display options for the League of Legends widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LolSettings {
    pub show_rank: bool,
    pub show_level: bool,
    pub show_matches: bool,
    pub match_count: u8,
}

impl Default for LolSettings {
    fn default() -> Self {
        Self {
            show_rank: true,
            show_level: true,
            show_matches: true,
            match_count: 5,
        }
    }
}

impl LolSettings {
    pub const MAX_MATCHES: u8 = 10;

    pub fn match_count(&self) -> usize {
        self.match_count.clamp(1, Self::MAX_MATCHES) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme_color: String,
    pub background_image: Option<String>,
    pub background_blur: i64,
    pub card_opacity: i64,

    pub bio_card_title: Option<String>,
    pub bio_card_body: Option<String>,
    pub bio_card_footer: Option<String>,
    pub bio_card_title_color: Option<String>,
    pub bio_card_text_color: Option<String>,
    pub bio_card_footer_color: Option<String>,
    pub bio_card_bg_color: Option<String>,
    pub bio_card_border_color: Option<String>,

    pub site_title: Option<String>,
    pub favicon_url: Option<String>,
    pub font_family: String,
    pub border_radius: i64,

    pub floating_emojis_enabled: bool,
    pub kick_username: Option<String>,
    pub kick_autoplay: bool,
    pub announcement_text: Option<String>,
    pub announcement_color: Option<String>,
    pub announcement_enabled: bool,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_enabled: bool,
    pub stats_enabled: bool,
    pub stats_followers: Option<String>,
    pub stats_views: Option<String>,
    pub contact_email: Option<String>,

    /// Empty means the default layout.
    pub layout_config: Vec<LayoutEntry>,

    pub lol_summoner_name: Option<String>,
    pub lol_region: String,
    pub lol_tag: Option<String>,
    pub lol_enabled: bool,
    pub lol_settings: LolSettings,
    /// Write-only; overrides the configured Riot API key.
    #[serde(skip_serializing)]
    pub lol_api_key: Option<String>,

    pub updated_at: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: None,
            bio: None,
            avatar_url: None,
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            background_image: None,
            background_blur: 0,
            card_opacity: 80,
            bio_card_title: None,
            bio_card_body: None,
            bio_card_footer: None,
            bio_card_title_color: None,
            bio_card_text_color: None,
            bio_card_footer_color: None,
            bio_card_bg_color: None,
            bio_card_border_color: None,
            site_title: None,
            favicon_url: None,
            font_family: "Inter".to_string(),
            border_radius: 16,
            floating_emojis_enabled: false,
            kick_username: None,
            kick_autoplay: false,
            announcement_text: None,
            announcement_color: None,
            announcement_enabled: false,
            cta_text: None,
            cta_url: None,
            cta_enabled: false,
            stats_enabled: false,
            stats_followers: None,
            stats_views: None,
            contact_email: None,
            layout_config: Vec::new(),
            lol_summoner_name: None,
            lol_region: "tr1".to_string(),
            lol_tag: None,
            lol_enabled: false,
            lol_settings: LolSettings::default(),
            lol_api_key: None,
            updated_at: None,
        }
    }
}

impl Profile {
    /// Profile-level Riot API key, when one is set.
    pub fn riot_api_key(&self) -> Option<&str> {
        self.lol_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 128))]
    pub title: Option<String>,
    #[validate(length(max = 4000))]
    pub bio: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub avatar_url: Option<String>,
    #[validate(length(min = 1), custom(function = "validate_color"))]
    pub theme_color: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub background_image: Option<String>,
    #[validate(range(min = 0, max = 50))]
    pub background_blur: Option<i64>,
    #[validate(range(min = 0, max = 100))]
    pub card_opacity: Option<i64>,

    #[validate(length(max = 256))]
    pub bio_card_title: Option<String>,
    #[validate(length(max = 4000))]
    pub bio_card_body: Option<String>,
    #[validate(length(max = 256))]
    pub bio_card_footer: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub bio_card_title_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub bio_card_text_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub bio_card_footer_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub bio_card_bg_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub bio_card_border_color: Option<String>,

    #[validate(length(max = 128))]
    pub site_title: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub favicon_url: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub font_family: Option<String>,
    #[validate(range(min = 0, max = 64))]
    pub border_radius: Option<i64>,

    pub floating_emojis_enabled: Option<bool>,
    #[validate(length(max = 64), custom(function = "validate_kick_username"))]
    pub kick_username: Option<String>,
    pub kick_autoplay: Option<bool>,
    #[validate(length(max = 500))]
    pub announcement_text: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub announcement_color: Option<String>,
    pub announcement_enabled: Option<bool>,
    #[validate(length(max = 64))]
    pub cta_text: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub cta_url: Option<String>,
    pub cta_enabled: Option<bool>,
    pub stats_enabled: Option<bool>,
    #[validate(length(max = 32))]
    pub stats_followers: Option<String>,
    #[validate(length(max = 32))]
    pub stats_views: Option<String>,
    #[validate(length(max = 254), custom(function = "validate_contact_email"))]
    pub contact_email: Option<String>,

    #[validate(length(max = 32), custom(function = "validate_layout"))]
    pub layout_config: Option<Vec<LayoutEntry>>,

    #[validate(length(max = 64))]
    pub lol_summoner_name: Option<String>,
    #[validate(custom(function = "validate_lol_region"))]
    pub lol_region: Option<String>,
    #[validate(length(max = 16))]
    pub lol_tag: Option<String>,
    pub lol_enabled: Option<bool>,
    pub lol_settings: Option<LolSettings>,
    #[validate(length(max = 128))]
    pub lol_api_key: Option<String>,
}

fn validate_kick_username(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("kick_username"))
    }
}

fn validate_contact_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::new("email")),
    }
}

fn validate_lol_region(value: &str) -> Result<(), ValidationError> {
    crate::lol::Platform::parse(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("region"))
}

impl Profile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        patch(&mut self.name, update.name.map(|n| n.trim().to_string()));
        patch_text(&mut self.title, update.title);
        patch_text(&mut self.bio, update.bio);
        patch_text(&mut self.avatar_url, update.avatar_url);
        patch(&mut self.theme_color, update.theme_color);
        patch_text(&mut self.background_image, update.background_image);
        patch(&mut self.background_blur, update.background_blur);
        patch(&mut self.card_opacity, update.card_opacity);

        patch_text(&mut self.bio_card_title, update.bio_card_title);
        patch_text(&mut self.bio_card_body, update.bio_card_body);
        patch_text(&mut self.bio_card_footer, update.bio_card_footer);
        patch_text(&mut self.bio_card_title_color, update.bio_card_title_color);
        patch_text(&mut self.bio_card_text_color, update.bio_card_text_color);
        patch_text(&mut self.bio_card_footer_color, update.bio_card_footer_color);
        patch_text(&mut self.bio_card_bg_color, update.bio_card_bg_color);
        patch_text(&mut self.bio_card_border_color, update.bio_card_border_color);

        patch_text(&mut self.site_title, update.site_title);
        patch_text(&mut self.favicon_url, update.favicon_url);
        patch(&mut self.font_family, update.font_family);
        patch(&mut self.border_radius, update.border_radius);

        patch(&mut self.floating_emojis_enabled, update.floating_emojis_enabled);
        patch_text(&mut self.kick_username, update.kick_username);
        patch(&mut self.kick_autoplay, update.kick_autoplay);
        patch_text(&mut self.announcement_text, update.announcement_text);
        patch_text(&mut self.announcement_color, update.announcement_color);
        patch(&mut self.announcement_enabled, update.announcement_enabled);
        patch_text(&mut self.cta_text, update.cta_text);
        patch_text(&mut self.cta_url, update.cta_url);
        patch(&mut self.cta_enabled, update.cta_enabled);
        patch(&mut self.stats_enabled, update.stats_enabled);
        patch_text(&mut self.stats_followers, update.stats_followers);
        patch_text(&mut self.stats_views, update.stats_views);
        patch_text(&mut self.contact_email, update.contact_email);

        patch(&mut self.layout_config, update.layout_config);

        patch_text(&mut self.lol_summoner_name, update.lol_summoner_name);
        patch(&mut self.lol_region, update.lol_region);
        patch_text(&mut self.lol_tag, update.lol_tag.map(|t| t.trim_start_matches('#').to_string()));
        patch(&mut self.lol_enabled, update.lol_enabled);
        patch(&mut self.lol_settings, update.lol_settings);
        patch_text(&mut self.lol_api_key, update.lol_api_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(json: serde_json::Value) -> ProfileUpdate {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn api_key_is_never_serialized() {
        let profile = Profile {
            lol_api_key: Some("RGAPI-secret".into()),
            ..Profile::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("RGAPI-secret"));
        assert!(!json.contains("lolApiKey"));
        assert_eq!(profile.riot_api_key(), Some("RGAPI-secret"));
    }

    #[test]
    fn apply_merges_partial_update() {
        let mut profile = Profile {
            name: "Old".into(),
            bio: Some("hello".into()),
            ..Profile::default()
        };
        profile.apply(update(serde_json::json!({
            "name": " New Name ",
            "cardOpacity": 60,
            "lolTag": "#EUW",
            "layoutConfig": [{"id": "bio", "visible": true, "width": "half"}]
        })));
        assert_eq!(profile.name, "New Name");
        assert_eq!(profile.bio.as_deref(), Some("hello"));
        assert_eq!(profile.card_opacity, 60);
        assert_eq!(profile.lol_tag.as_deref(), Some("EUW"));
        assert_eq!(profile.layout_config.len(), 1);
        assert_eq!(profile.layout_config[0].width, "half");
    }

    #[test]
    fn update_validation_catches_bad_fields() {
        let bad = update(serde_json::json!({
            "themeColor": "blue",
            "cardOpacity": 120,
            "kickUsername": "has spaces",
            "lolRegion": "mars1",
            "contactEmail": "nope",
            "layoutConfig": [
                {"id": "bio", "visible": true},
                {"id": "bio", "visible": false}
            ]
        }));
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in [
            "theme_color",
            "card_opacity",
            "kick_username",
            "lol_region",
            "contact_email",
            "layout_config",
        ] {
            assert!(fields.contains_key(field), "expected error on {field}");
        }
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(update(serde_json::json!({})).validate().is_ok());
    }

    #[test]
    fn lol_match_count_is_clamped() {
        let settings = LolSettings {
            match_count: 40,
            ..LolSettings::default()
        };
        assert_eq!(settings.match_count(), 10);
        let settings = LolSettings {
            match_count: 0,
            ..LolSettings::default()
        };
        assert_eq!(settings.match_count(), 1);
    }
}
