use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{
    default_true, explicit_null, non_empty, patch, patch_text, validate_color, validate_link,
    validate_percent,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: String,
    /// Single code carried on the sponsor itself, predating `DiscountCode` rows.
    pub discount_code: Option<String>,
    pub discount_percent: Option<i64>,
    pub display_order: i64,
    pub is_active: bool,
    pub custom_bg_color: Option<String>,
    pub custom_text_color: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSponsor {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub logo_url: Option<String>,
    #[validate(length(min = 1, max = 2048), custom(function = "validate_link"))]
    pub website_url: String,
    #[validate(length(max = 64))]
    pub discount_code: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i64>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[validate(custom(function = "validate_color"))]
    pub custom_bg_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub custom_text_color: Option<String>,
}

impl NewSponsor {
    pub fn normalized(mut self) -> Self {
        self.description = non_empty(self.description);
        self.logo_url = non_empty(self.logo_url);
        self.discount_code = non_empty(self.discount_code);
        self.custom_bg_color = non_empty(self.custom_bg_color);
        self.custom_text_color = non_empty(self.custom_text_color);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_sponsor_patch"))]
pub struct SponsorPatch {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub logo_url: Option<String>,
    #[validate(length(min = 1, max = 2048), custom(function = "validate_link"))]
    pub website_url: Option<String>,
    #[validate(length(max = 64))]
    pub discount_code: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub discount_percent: Option<Option<i64>>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
    #[validate(custom(function = "validate_color"))]
    pub custom_bg_color: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub custom_text_color: Option<String>,
}

fn validate_sponsor_patch(update: &SponsorPatch) -> Result<(), ValidationError> {
    validate_percent(&update.discount_percent)
}

impl Sponsor {
    pub fn apply(&mut self, update: SponsorPatch) {
        patch(&mut self.name, update.name);
        patch_text(&mut self.description, update.description);
        patch_text(&mut self.logo_url, update.logo_url);
        patch(&mut self.website_url, update.website_url);
        patch_text(&mut self.discount_code, update.discount_code);
        patch(&mut self.discount_percent, update.discount_percent);
        patch(&mut self.display_order, update.display_order);
        patch(&mut self.is_active, update.is_active);
        patch_text(&mut self.custom_bg_color, update.custom_bg_color);
        patch_text(&mut self.custom_text_color, update.custom_text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_url_is_required() {
        let result = serde_json::from_value::<NewSponsor>(serde_json::json!({
            "name": "Acme"
        }));
        assert!(result.is_err());

        let sponsor: NewSponsor = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "websiteUrl": ""
        }))
        .unwrap();
        assert!(sponsor.validate().is_err());
    }

    #[test]
    fn patch_distinguishes_null_from_absent_percent() {
        let absent: SponsorPatch = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(absent.discount_percent, None);

        let cleared: SponsorPatch =
            serde_json::from_value(serde_json::json!({ "discountPercent": null })).unwrap();
        assert_eq!(cleared.discount_percent, Some(None));

        let too_big: SponsorPatch =
            serde_json::from_value(serde_json::json!({ "discountPercent": 150 })).unwrap();
        assert!(too_big.validate().is_err());
    }
}
