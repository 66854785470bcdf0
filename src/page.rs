//! View-models for the public page.
//!
//! `build_page` turns stored rows into the sections the template renders. Each
//! section kind is a `Section` variant carrying only the data it shows; a
//! section whose data is empty is left out instead of rendering an empty box.

use crate::layout::{self, SectionKind, SectionWidth};
use crate::lol::Platform;
use crate::models::{DiscountCode, DisplayStyle, Game, LolSettings, Profile, SocialLink, Sponsor};
use crate::theme;

/// Everything the page is built from. Lists hold active rows in display order.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    pub profile: Profile,
    pub social_links: Vec<SocialLink>,
    pub sponsors: Vec<Sponsor>,
    pub discount_codes: Vec<DiscountCode>,
    pub games: Vec<Game>,
}

/// Social links split by display style, display order kept within each bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialPartition {
    pub standard: Vec<SocialLink>,
    pub grid: Vec<SocialLink>,
    pub icon: Vec<SocialLink>,
}

impl SocialPartition {
    pub fn len(&self) -> usize {
        self.standard.len() + self.grid.len() + self.icon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition_social_links(links: &[SocialLink]) -> SocialPartition {
    let mut partition = SocialPartition::default();
    for link in links {
        let bucket = match link.display_style {
            DisplayStyle::Standard => &mut partition.standard,
            DisplayStyle::Grid => &mut partition.grid,
            DisplayStyle::Icon => &mut partition.icon,
        };
        bucket.push(link.clone());
    }
    partition
}

#[derive(Debug, Clone, PartialEq)]
pub struct BioView {
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub card_title: Option<String>,
    pub card_body: Option<String>,
    pub card_footer: Option<String>,
    pub card_style: String,
    pub title_style: String,
    pub text_style: String,
    pub footer_style: String,
    pub stats: Option<StatsView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub followers: String,
    pub views: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KickView {
    pub username: String,
    pub autoplay: bool,
}

impl KickView {
    pub fn embed_url(&self) -> String {
        format!(
            "https://player.kick.com/{}?autoplay={}",
            self.username, self.autoplay
        )
    }

    pub fn channel_url(&self) -> String {
        format!("https://kick.com/{}", self.username)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SponsorCard {
    pub sponsor: Sponsor,
    pub codes: Vec<DiscountCode>,
}

impl SponsorCard {
    pub fn style(&self) -> String {
        inline_colors(
            self.sponsor.custom_bg_color.as_deref(),
            self.sponsor.custom_text_color.as_deref(),
        )
    }
}

/// Configuration handed to the browser; the summoner data itself is fetched
/// client-side from the lookup endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct LolView {
    pub region: String,
    pub summoner_name: String,
    pub tag: String,
    pub settings: LolSettings,
}

impl LolView {
    pub fn lookup_path(&self) -> String {
        let mut url = match url::Url::parse("http://localhost/") {
            Ok(url) => url,
            Err(_) => return String::new(),
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend([
                "api",
                "lol",
                "summoner",
                self.region.as_str(),
                self.summoner_name.as_str(),
                self.tag.as_str(),
            ]);
        }
        format!("{}?count={}", url.path(), self.settings.match_count())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GamesView {
    pub games: Vec<Game>,
    /// Codes not tied to any sponsor.
    pub general_codes: Vec<DiscountCode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactView {
    pub email: Option<String>,
    pub cta_text: String,
    pub cta_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Bio(BioView),
    Socials(SocialPartition),
    Kick(KickView),
    Sponsors(Vec<SponsorCard>),
    Lol(LolView),
    Games(GamesView),
    Contact(ContactView),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Bio(_) => SectionKind::Bio,
            Section::Socials(_) => SectionKind::Socials,
            Section::Kick(_) => SectionKind::Kick,
            Section::Sponsors(_) => SectionKind::Sponsors,
            Section::Lol(_) => SectionKind::Lol,
            Section::Games(_) => SectionKind::Games,
            Section::Contact(_) => SectionKind::Contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub width: SectionWidth,
    pub section: Section,
}

impl RenderedSection {
    pub fn id(&self) -> &'static str {
        self.section.kind().id()
    }

    pub fn css_class(&self) -> &'static str {
        self.width.css_class()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub text: String,
    pub style: String,
}

/// The whole public page: page-level styling plus the ordered sections.
#[derive(Debug, Clone)]
pub struct PageView {
    pub site_title: String,
    pub favicon_url: Option<String>,
    pub theme_color: String,
    pub theme_rgb: String,
    pub card_background: String,
    pub background_image: Option<String>,
    pub background_blur: i64,
    pub font_family: String,
    pub border_radius: i64,
    pub floating_emojis: bool,
    pub announcement: Option<Announcement>,
    pub sections: Vec<RenderedSection>,
}

impl PageView {
    pub fn root_style(&self) -> String {
        format!(
            "--theme: {}; --theme-rgb: {}; --card-bg: {}; --radius: {}px; font-family: '{}', sans-serif;",
            self.theme_color,
            self.theme_rgb,
            self.card_background,
            self.border_radius,
            self.font_family.replace(['\'', ';'], "")
        )
    }
}

pub fn build_page(data: &PageData) -> PageView {
    let profile = &data.profile;
    let theme_color = if theme::parse_hex(&profile.theme_color).is_some() {
        profile.theme_color.clone()
    } else {
        theme::DEFAULT_THEME_COLOR.to_string()
    };
    let theme_rgb = theme::hex_to_rgb(&theme_color).unwrap_or_default();

    let site_title = profile
        .site_title
        .clone()
        .or_else(|| (!profile.name.is_empty()).then(|| profile.name.clone()))
        .unwrap_or_else(|| "Links".to_string());

    let announcement = match (&profile.announcement_text, profile.announcement_enabled) {
        (Some(text), true) => Some(Announcement {
            text: text.clone(),
            style: inline_colors(profile.announcement_color.as_deref(), None),
        }),
        _ => None,
    };

    PageView {
        site_title,
        favicon_url: profile.favicon_url.clone(),
        card_background: theme::card_background(&theme_color, profile.card_opacity),
        theme_color,
        theme_rgb,
        background_image: profile.background_image.clone(),
        background_blur: profile.background_blur,
        font_family: profile.font_family.clone(),
        border_radius: profile.border_radius,
        floating_emojis: profile.floating_emojis_enabled,
        announcement,
        sections: build_sections(data),
    }
}

/// Sections in layout order, skipping hidden, unknown and empty ones.
pub fn build_sections(data: &PageData) -> Vec<RenderedSection> {
    layout::resolve(&data.profile.layout_config)
        .into_iter()
        .filter_map(|resolved| {
            build_section(resolved.kind, data).map(|section| RenderedSection {
                width: resolved.width,
                section,
            })
        })
        .collect()
}

fn build_section(kind: SectionKind, data: &PageData) -> Option<Section> {
    match kind {
        SectionKind::Bio => Some(Section::Bio(bio_view(&data.profile))),
        SectionKind::Socials => {
            let partition = partition_social_links(&data.social_links);
            (!partition.is_empty()).then_some(Section::Socials(partition))
        }
        SectionKind::Kick => data.profile.kick_username.as_ref().map(|username| {
            Section::Kick(KickView {
                username: username.clone(),
                autoplay: data.profile.kick_autoplay,
            })
        }),
        SectionKind::Sponsors => {
            if data.sponsors.is_empty() {
                return None;
            }
            let cards = data
                .sponsors
                .iter()
                .map(|sponsor| SponsorCard {
                    sponsor: sponsor.clone(),
                    codes: data
                        .discount_codes
                        .iter()
                        .filter(|c| c.sponsor_id.as_deref() == Some(sponsor.id.as_str()))
                        .cloned()
                        .collect(),
                })
                .collect();
            Some(Section::Sponsors(cards))
        }
        SectionKind::Lol => lol_view(&data.profile).map(Section::Lol),
        SectionKind::Games => {
            let general_codes: Vec<DiscountCode> = data
                .discount_codes
                .iter()
                .filter(|c| c.sponsor_id.is_none())
                .cloned()
                .collect();
            if data.games.is_empty() && general_codes.is_empty() {
                return None;
            }
            Some(Section::Games(GamesView {
                games: data.games.clone(),
                general_codes,
            }))
        }
        SectionKind::Contact => contact_view(&data.profile).map(Section::Contact),
    }
}

fn bio_view(profile: &Profile) -> BioView {
    let mut card_style = inline_colors(
        profile.bio_card_bg_color.as_deref(),
        profile.bio_card_text_color.as_deref(),
    );
    if let Some(border) = profile.bio_card_border_color.as_deref() {
        card_style.push_str(&format!("border-color: {};", border));
    }

    BioView {
        name: profile.name.clone(),
        title: profile.title.clone(),
        bio: profile.bio.clone(),
        avatar_url: profile.avatar_url.clone(),
        card_title: profile.bio_card_title.clone(),
        card_body: profile.bio_card_body.clone(),
        card_footer: profile.bio_card_footer.clone(),
        card_style,
        title_style: inline_colors(None, profile.bio_card_title_color.as_deref()),
        text_style: inline_colors(None, profile.bio_card_text_color.as_deref()),
        footer_style: inline_colors(None, profile.bio_card_footer_color.as_deref()),
        stats: profile.stats_enabled.then(|| StatsView {
            followers: profile.stats_followers.clone().unwrap_or_else(|| "0".into()),
            views: profile.stats_views.clone().unwrap_or_else(|| "0".into()),
        }),
    }
}

fn lol_view(profile: &Profile) -> Option<LolView> {
    if !profile.lol_enabled {
        return None;
    }
    let summoner_name = profile.lol_summoner_name.clone()?;
    let platform = Platform::parse(&profile.lol_region).unwrap_or(Platform::Tr1);
    let tag = profile
        .lol_tag
        .clone()
        .unwrap_or_else(|| platform.as_str().to_uppercase());

    Some(LolView {
        region: platform.as_str().to_string(),
        summoner_name,
        tag,
        settings: profile.lol_settings.clone(),
    })
}

fn contact_view(profile: &Profile) -> Option<ContactView> {
    let cta_url = profile.cta_url.clone().filter(|_| profile.cta_enabled);
    if profile.contact_email.is_none() && cta_url.is_none() {
        return None;
    }
    Some(ContactView {
        email: profile.contact_email.clone(),
        cta_text: profile
            .cta_text
            .clone()
            .unwrap_or_else(|| "Get in touch".to_string()),
        cta_url,
    })
}

/// Inline `background`/`color` declarations for optional custom colours.
pub fn inline_colors(background: Option<&str>, text: Option<&str>) -> String {
    let mut style = String::new();
    if let Some(bg) = background {
        style.push_str(&format!("background: {};", bg));
    }
    if let Some(color) = text {
        style.push_str(&format!("color: {};", color));
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEntry;

    fn link(id: &str, style: DisplayStyle) -> SocialLink {
        SocialLink {
            id: id.into(),
            platform: id.into(),
            url: "https://example.com".into(),
            follower_count: None,
            badge: None,
            description: None,
            display_order: 0,
            is_active: true,
            column_span: 1,
            custom_bg_color: None,
            custom_text_color: None,
            display_style: style,
            created_at: String::new(),
        }
    }

    fn sponsor(id: &str) -> Sponsor {
        Sponsor {
            id: id.into(),
            name: id.into(),
            description: None,
            logo_url: None,
            website_url: "https://example.com".into(),
            discount_code: None,
            discount_percent: None,
            display_order: 0,
            is_active: true,
            custom_bg_color: None,
            custom_text_color: None,
            created_at: String::new(),
        }
    }

    fn code(id: &str, sponsor_id: Option<&str>) -> DiscountCode {
        DiscountCode {
            id: id.into(),
            sponsor_id: sponsor_id.map(String::from),
            code: id.to_uppercase(),
            description: None,
            discount_percent: None,
            url: None,
            logo_url: None,
            display_order: 0,
            is_active: true,
            created_at: String::new(),
        }
    }

    fn ids(sections: &[RenderedSection]) -> Vec<&'static str> {
        sections.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn partition_keeps_every_link_once_in_order() {
        let links = vec![
            link("a", DisplayStyle::Grid),
            link("b", DisplayStyle::Standard),
            link("c", DisplayStyle::Icon),
            link("d", DisplayStyle::Grid),
            link("e", DisplayStyle::Standard),
        ];
        let partition = partition_social_links(&links);
        let names = |bucket: &[SocialLink]| bucket.iter().map(|l| l.id.clone()).collect::<Vec<_>>();
        assert_eq!(names(&partition.standard), vec!["b", "e"]);
        assert_eq!(names(&partition.grid), vec!["a", "d"]);
        assert_eq!(names(&partition.icon), vec!["c"]);
        assert_eq!(partition.len(), links.len());
    }

    #[test]
    fn empty_data_renders_only_bio() {
        let sections = build_sections(&PageData::default());
        assert_eq!(ids(&sections), vec!["bio"]);
    }

    #[test]
    fn populated_default_layout_skips_lol() {
        let data = PageData {
            profile: Profile {
                kick_username: Some("streamer".into()),
                contact_email: Some("hi@example.com".into()),
                lol_enabled: true,
                lol_summoner_name: Some("Faker".into()),
                ..Profile::default()
            },
            social_links: vec![link("x", DisplayStyle::Standard)],
            sponsors: vec![sponsor("s1")],
            discount_codes: vec![],
            games: vec![],
        };
        let sections = build_sections(&data);
        assert_eq!(ids(&sections), vec!["bio", "socials", "kick", "sponsors", "contact"]);
    }

    #[test]
    fn configured_order_and_width_are_kept() {
        let data = PageData {
            profile: Profile {
                layout_config: vec![
                    LayoutEntry::new("contact", true, "half"),
                    LayoutEntry::new("bogus", true, "full"),
                    LayoutEntry::new("socials", false, "full"),
                    LayoutEntry::new("bio", true, "weird"),
                ],
                contact_email: Some("hi@example.com".into()),
                ..Profile::default()
            },
            social_links: vec![link("x", DisplayStyle::Standard)],
            ..PageData::default()
        };
        let sections = build_sections(&data);
        assert_eq!(ids(&sections), vec!["contact", "bio"]);
        assert_eq!(sections[0].css_class(), "section-half");
        assert_eq!(sections[1].css_class(), "section-full");
    }

    #[test]
    fn codes_split_between_sponsors_and_games() {
        let data = PageData {
            sponsors: vec![sponsor("s1")],
            discount_codes: vec![code("linked", Some("s1")), code("general", None)],
            ..PageData::default()
        };
        let sections = build_sections(&data);
        assert_eq!(ids(&sections), vec!["bio", "sponsors", "games"]);

        match &sections[1].section {
            Section::Sponsors(cards) => {
                assert_eq!(cards[0].codes.len(), 1);
                assert_eq!(cards[0].codes[0].id, "linked");
            }
            other => panic!("unexpected section {:?}", other),
        }
        match &sections[2].section {
            Section::Games(view) => {
                assert!(view.games.is_empty());
                assert_eq!(view.general_codes[0].id, "general");
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn contact_needs_email_or_enabled_cta() {
        let mut profile = Profile {
            cta_url: Some("https://example.com/book".into()),
            ..Profile::default()
        };
        assert!(contact_view(&profile).is_none());
        profile.cta_enabled = true;
        let view = contact_view(&profile).unwrap();
        assert_eq!(view.cta_text, "Get in touch");
        assert_eq!(view.email, None);
    }

    #[test]
    fn lol_view_defaults_tag_and_encodes_lookup_path() {
        let profile = Profile {
            lol_enabled: true,
            lol_summoner_name: Some("Hide on bush".into()),
            lol_region: "KR".into(),
            ..Profile::default()
        };
        let view = lol_view(&profile).unwrap();
        assert_eq!(view.region, "kr");
        assert_eq!(view.tag, "KR");
        assert_eq!(
            view.lookup_path(),
            "/api/lol/summoner/kr/Hide%20on%20bush/KR?count=5"
        );
    }

    #[test]
    fn page_uses_theme_and_opacity() {
        let data = PageData {
            profile: Profile {
                theme_color: "#ff0000".into(),
                card_opacity: 80,
                ..Profile::default()
            },
            ..PageData::default()
        };
        let page = build_page(&data);
        assert_eq!(page.theme_rgb, "255 0 0");
        assert_eq!(page.card_background, "rgba(255, 0, 0, 0.8)");
        assert_eq!(page.site_title, "Links");
    }

    #[test]
    fn invalid_theme_color_falls_back() {
        let data = PageData {
            profile: Profile {
                theme_color: "purple".into(),
                ..Profile::default()
            },
            ..PageData::default()
        };
        assert_eq!(build_page(&data).theme_color, theme::DEFAULT_THEME_COLOR);
    }
}
