//! Ordering and visibility of the sections on the public page.
//!
//! The stored `layoutConfig` is a list of `{id, visible, width}` entries. Only
//! visible entries with a known id render, in stored order. Entries are read
//! leniently: anything but `visible: true` means hidden, a missing `width`
//! means full, and an entry without a string id never renders.

use serde::{Deserialize, Serialize};
use validator::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default = "default_width")]
    pub width: String,
}

fn default_width() -> String {
    "full".to_string()
}

impl LayoutEntry {
    pub fn new(id: &str, visible: bool, width: &str) -> Self {
        Self {
            id: id.to_string(),
            visible,
            width: width.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Bio,
    Socials,
    Kick,
    Sponsors,
    Lol,
    Games,
    Contact,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Bio,
        SectionKind::Socials,
        SectionKind::Kick,
        SectionKind::Sponsors,
        SectionKind::Lol,
        SectionKind::Games,
        SectionKind::Contact,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Bio => "bio",
            SectionKind::Socials => "socials",
            SectionKind::Kick => "kick",
            SectionKind::Sponsors => "sponsors",
            SectionKind::Lol => "lol",
            SectionKind::Games => "games",
            SectionKind::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionWidth {
    Full,
    Half,
}

impl SectionWidth {
    /// Anything other than `"half"` renders full width.
    pub fn from_config(width: &str) -> Self {
        if width == "half" {
            SectionWidth::Half
        } else {
            SectionWidth::Full
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SectionWidth::Full => "section-full",
            SectionWidth::Half => "section-half",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSection {
    pub kind: SectionKind,
    pub width: SectionWidth,
}

/// Layout used when the profile has none stored.
pub fn default_layout() -> Vec<LayoutEntry> {
    vec![
        LayoutEntry::new("bio", true, "full"),
        LayoutEntry::new("socials", true, "full"),
        LayoutEntry::new("kick", true, "full"),
        LayoutEntry::new("sponsors", true, "full"),
        LayoutEntry::new("lol", false, "full"),
        LayoutEntry::new("games", true, "full"),
        LayoutEntry::new("contact", true, "full"),
    ]
}

/// Visible, known sections in configured order.
pub fn resolve(config: &[LayoutEntry]) -> Vec<ResolvedSection> {
    let defaults;
    let entries: &[LayoutEntry] = if config.is_empty() {
        defaults = default_layout();
        &defaults
    } else {
        config
    };

    entries
        .iter()
        .filter(|entry| entry.visible)
        .filter_map(|entry| match SectionKind::from_id(&entry.id) {
            Some(kind) => Some(ResolvedSection {
                kind,
                width: SectionWidth::from_config(&entry.width),
            }),
            None => {
                tracing::debug!("Skipping unknown layout section '{}'", entry.id);
                None
            }
        })
        .collect()
}

/// Read a stored layout column. Unreadable JSON counts as no layout.
///
/// Malformed entries are kept as hidden ones; only an absent or empty column
/// yields an empty layout.
pub fn parse_stored(raw: Option<&str>) -> Vec<LayoutEntry> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values.iter().map(lenient_entry).collect(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable layout config: {}", e);
            Vec::new()
        }
    }
}

fn lenient_entry(value: &serde_json::Value) -> LayoutEntry {
    let id = value.get("id").and_then(|v| v.as_str()).unwrap_or_default();
    let visible = value.get("visible").and_then(|v| v.as_bool()).unwrap_or(false);
    let width = value.get("width").and_then(|v| v.as_str()).unwrap_or("full");
    LayoutEntry::new(id, visible, width)
}

/// Rejects layouts naming the same section twice.
pub fn validate_layout(entries: &[LayoutEntry]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for entry in entries {
        if !entry.id.is_empty() && !seen.insert(entry.id.as_str()) {
            return Err(ValidationError::new("duplicate_section"));
        }
    }
    Ok(())
}
