use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_true, non_empty, patch, patch_text, validate_link};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    pub platform: Option<String>,
    pub url: Option<String>,
    pub logo_url: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 64))]
    pub platform: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub url: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewGame {
    pub fn normalized(mut self) -> Self {
        self.platform = non_empty(self.platform);
        self.url = non_empty(self.url);
        self.logo_url = non_empty(self.logo_url);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GamePatch {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub platform: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub url: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub logo_url: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl Game {
    pub fn apply(&mut self, update: GamePatch) {
        patch(&mut self.name, update.name);
        patch_text(&mut self.platform, update.platform);
        patch_text(&mut self.url, update.url);
        patch_text(&mut self.logo_url, update.logo_url);
        patch(&mut self.display_order, update.display_order);
        patch(&mut self.is_active, update.is_active);
    }
}
