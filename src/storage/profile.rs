use rusqlite::{params, OptionalExtension, Row};

use super::{Storage, StorageError, StorageResult};
use crate::layout;
use crate::models::profile::PROFILE_ID;
use crate::models::{LolSettings, Profile, ProfileUpdate};

const COLUMNS: &str = "name, title, bio, avatar_url, theme_color, background_image, \
     background_blur, card_opacity, bio_card_title, bio_card_body, bio_card_footer, \
     bio_card_title_color, bio_card_text_color, bio_card_footer_color, bio_card_bg_color, \
     bio_card_border_color, site_title, favicon_url, font_family, border_radius, \
     floating_emojis_enabled, kick_username, kick_autoplay, announcement_text, \
     announcement_color, announcement_enabled, cta_text, cta_url, cta_enabled, stats_enabled, \
     stats_followers, stats_views, contact_email, layout_config, lol_summoner_name, lol_region, \
     lol_tag, lol_enabled, lol_settings, lol_api_key, updated_at";

fn parse_lol_settings(raw: Option<String>) -> LolSettings {
    match raw.as_deref() {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable lol_settings: {}", e);
            LolSettings::default()
        }),
        _ => LolSettings::default(),
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        name: row.get(0)?,
        title: row.get(1)?,
        bio: row.get(2)?,
        avatar_url: row.get(3)?,
        theme_color: row.get(4)?,
        background_image: row.get(5)?,
        background_blur: row.get(6)?,
        card_opacity: row.get(7)?,
        bio_card_title: row.get(8)?,
        bio_card_body: row.get(9)?,
        bio_card_footer: row.get(10)?,
        bio_card_title_color: row.get(11)?,
        bio_card_text_color: row.get(12)?,
        bio_card_footer_color: row.get(13)?,
        bio_card_bg_color: row.get(14)?,
        bio_card_border_color: row.get(15)?,
        site_title: row.get(16)?,
        favicon_url: row.get(17)?,
        font_family: row.get(18)?,
        border_radius: row.get(19)?,
        floating_emojis_enabled: row.get(20)?,
        kick_username: row.get(21)?,
        kick_autoplay: row.get(22)?,
        announcement_text: row.get(23)?,
        announcement_color: row.get(24)?,
        announcement_enabled: row.get(25)?,
        cta_text: row.get(26)?,
        cta_url: row.get(27)?,
        cta_enabled: row.get(28)?,
        stats_enabled: row.get(29)?,
        stats_followers: row.get(30)?,
        stats_views: row.get(31)?,
        contact_email: row.get(32)?,
        layout_config: layout::parse_stored(row.get::<_, Option<String>>(33)?.as_deref()),
        lol_summoner_name: row.get(34)?,
        lol_region: row.get(35)?,
        lol_tag: row.get(36)?,
        lol_enabled: row.get(37)?,
        lol_settings: parse_lol_settings(row.get(38)?),
        lol_api_key: row.get(39)?,
        updated_at: row.get(40)?,
    })
}

impl Storage {
    /// The singleton profile, or `None` before it has been saved once.
    pub fn get_profile(&self) -> StorageResult<Option<Profile>> {
        let conn = self.conn()?;
        let profile = conn
            .query_row(
                &format!("SELECT {} FROM profile WHERE id = ?1", COLUMNS),
                params![PROFILE_ID],
                from_row,
            )
            .optional()?;
        Ok(profile)
    }

    /// Merge `update` into the stored profile (or the defaults) and write it back.
    pub fn update_profile(&self, update: ProfileUpdate) -> StorageResult<Profile> {
        let mut profile = self.get_profile()?.unwrap_or_default();
        profile.apply(update);

        let layout_json = if profile.layout_config.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&profile.layout_config)?)
        };
        let settings_json = serde_json::to_string(&profile.lol_settings)?;

        self.conn()?.execute(
            "INSERT INTO profile (id, name, title, bio, avatar_url, theme_color, background_image, \
             background_blur, card_opacity, bio_card_title, bio_card_body, bio_card_footer, \
             bio_card_title_color, bio_card_text_color, bio_card_footer_color, bio_card_bg_color, \
             bio_card_border_color, site_title, favicon_url, font_family, border_radius, \
             floating_emojis_enabled, kick_username, kick_autoplay, announcement_text, \
             announcement_color, announcement_enabled, cta_text, cta_url, cta_enabled, \
             stats_enabled, stats_followers, stats_views, contact_email, layout_config, \
             lol_summoner_name, lol_region, lol_tag, lol_enabled, lol_settings, lol_api_key, \
             updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, \
             ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, ?33, ?34, \
             ?35, ?36, ?37, ?38, ?39, ?40, ?41, datetime('now')) \
             ON CONFLICT(id) DO UPDATE SET \
             name = excluded.name, title = excluded.title, bio = excluded.bio, \
             avatar_url = excluded.avatar_url, theme_color = excluded.theme_color, \
             background_image = excluded.background_image, \
             background_blur = excluded.background_blur, card_opacity = excluded.card_opacity, \
             bio_card_title = excluded.bio_card_title, bio_card_body = excluded.bio_card_body, \
             bio_card_footer = excluded.bio_card_footer, \
             bio_card_title_color = excluded.bio_card_title_color, \
             bio_card_text_color = excluded.bio_card_text_color, \
             bio_card_footer_color = excluded.bio_card_footer_color, \
             bio_card_bg_color = excluded.bio_card_bg_color, \
             bio_card_border_color = excluded.bio_card_border_color, \
             site_title = excluded.site_title, favicon_url = excluded.favicon_url, \
             font_family = excluded.font_family, border_radius = excluded.border_radius, \
             floating_emojis_enabled = excluded.floating_emojis_enabled, \
             kick_username = excluded.kick_username, kick_autoplay = excluded.kick_autoplay, \
             announcement_text = excluded.announcement_text, \
             announcement_color = excluded.announcement_color, \
             announcement_enabled = excluded.announcement_enabled, \
             cta_text = excluded.cta_text, cta_url = excluded.cta_url, \
             cta_enabled = excluded.cta_enabled, stats_enabled = excluded.stats_enabled, \
             stats_followers = excluded.stats_followers, stats_views = excluded.stats_views, \
             contact_email = excluded.contact_email, layout_config = excluded.layout_config, \
             lol_summoner_name = excluded.lol_summoner_name, lol_region = excluded.lol_region, \
             lol_tag = excluded.lol_tag, lol_enabled = excluded.lol_enabled, \
             lol_settings = excluded.lol_settings, lol_api_key = excluded.lol_api_key, \
             updated_at = excluded.updated_at",
            params![
                PROFILE_ID,
                profile.name,
                profile.title,
                profile.bio,
                profile.avatar_url,
                profile.theme_color,
                profile.background_image,
                profile.background_blur,
                profile.card_opacity,
                profile.bio_card_title,
                profile.bio_card_body,
                profile.bio_card_footer,
                profile.bio_card_title_color,
                profile.bio_card_text_color,
                profile.bio_card_footer_color,
                profile.bio_card_bg_color,
                profile.bio_card_border_color,
                profile.site_title,
                profile.favicon_url,
                profile.font_family,
                profile.border_radius,
                profile.floating_emojis_enabled,
                profile.kick_username,
                profile.kick_autoplay,
                profile.announcement_text,
                profile.announcement_color,
                profile.announcement_enabled,
                profile.cta_text,
                profile.cta_url,
                profile.cta_enabled,
                profile.stats_enabled,
                profile.stats_followers,
                profile.stats_views,
                profile.contact_email,
                layout_json,
                profile.lol_summoner_name,
                profile.lol_region,
                profile.lol_tag,
                profile.lol_enabled,
                settings_json,
                profile.lol_api_key,
            ],
        )?;

        tracing::info!("Profile updated");
        self.get_profile()?
            .ok_or_else(|| StorageError::NotFound("profile".to_string()))
    }
}
