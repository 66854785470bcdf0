use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_true, non_empty, patch, patch_text, validate_color, validate_link};

/// How a link is laid out on the public page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    Standard,
    Grid,
    Icon,
}

impl DisplayStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStyle::Standard => "standard",
            DisplayStyle::Grid => "grid",
            DisplayStyle::Icon => "icon",
        }
    }

    /// Stored values outside the known set read as `Standard`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "grid" => DisplayStyle::Grid,
            "icon" => DisplayStyle::Icon,
            _ => DisplayStyle::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub follower_count: Option<String>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub column_span: i64,
    pub custom_bg_color: Option<String>,
    pub custom_text_color: Option<String>,
    pub display_style: DisplayStyle,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSocialLink {
    #[validate(length(min = 1, max = 64))]
    pub platform: String,
    #[validate(length(min = 1, max = 2048), custom(function = "validate_link"))]
    pub url: String,
    #[validate(length(max = 32))]
    pub follower_count: Option<String>,
    #[validate(length(max = 32))]
    pub badge: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_column_span")]
    #[validate(range(min = 1, max = 2))]
    pub column_span: i64,
    #[validate(custom(function = "validate_color"))]
    pub custom_bg_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub custom_text_color: Option<String>,
    #[serde(default)]
    pub display_style: DisplayStyle,
}

fn default_column_span() -> i64 {
    1
}

impl NewSocialLink {
    /// Drop blank optional text so it is stored as NULL.
    pub fn normalized(mut self) -> Self {
        self.follower_count = non_empty(self.follower_count);
        self.badge = non_empty(self.badge);
        self.description = non_empty(self.description);
        self.custom_bg_color = non_empty(self.custom_bg_color);
        self.custom_text_color = non_empty(self.custom_text_color);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkPatch {
    #[validate(length(min = 1, max = 64))]
    pub platform: Option<String>,
    #[validate(length(min = 1, max = 2048), custom(function = "validate_link"))]
    pub url: Option<String>,
    #[validate(length(max = 32))]
    pub follower_count: Option<String>,
    #[validate(length(max = 32))]
    pub badge: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1, max = 2))]
    pub column_span: Option<i64>,
    #[validate(custom(function = "validate_color"))]
    pub custom_bg_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub custom_text_color: Option<String>,
    pub display_style: Option<DisplayStyle>,
}

impl SocialLink {
    pub fn apply(&mut self, update: SocialLinkPatch) {
        patch(&mut self.platform, update.platform);
        patch(&mut self.url, update.url);
        patch_text(&mut self.follower_count, update.follower_count);
        patch_text(&mut self.badge, update.badge);
        patch_text(&mut self.description, update.description);
        patch(&mut self.display_order, update.display_order);
        patch(&mut self.is_active, update.is_active);
        patch(&mut self.column_span, update.column_span);
        patch_text(&mut self.custom_bg_color, update.custom_bg_color);
        patch_text(&mut self.custom_text_color, update.custom_text_color);
        patch(&mut self.display_style, update.display_style);
    }
}
