use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{
    default_true, explicit_null, non_empty, patch, patch_text, validate_link, validate_percent,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub id: String,
    /// `None` for general codes not tied to a sponsor.
    pub sponsor_id: Option<String>,
    pub code: String,
    pub description: Option<String>,
    pub discount_percent: Option<i64>,
    pub url: Option<String>,
    pub logo_url: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscountCode {
    pub sponsor_id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i64>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub url: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewDiscountCode {
    pub fn normalized(mut self) -> Self {
        self.sponsor_id = non_empty(self.sponsor_id);
        self.description = non_empty(self.description);
        self.url = non_empty(self.url);
        self.logo_url = non_empty(self.logo_url);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_code_patch"))]
pub struct DiscountCodePatch {
    /// `null` or `""` unlinks the code from its sponsor.
    #[serde(default, deserialize_with = "explicit_null")]
    pub sponsor_id: Option<Option<String>>,
    #[validate(length(min = 1, max = 64))]
    pub code: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub discount_percent: Option<Option<i64>>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub url: Option<String>,
    #[validate(length(max = 2048), custom(function = "validate_link"))]
    pub logo_url: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}

fn validate_code_patch(update: &DiscountCodePatch) -> Result<(), ValidationError> {
    validate_percent(&update.discount_percent)
}

impl DiscountCodePatch {
    /// The sponsor id this patch sets, if it sets one.
    pub fn linked_sponsor(&self) -> Option<&str> {
        self.sponsor_id
            .as_ref()
            .and_then(|id| id.as_deref())
            .filter(|id| !id.trim().is_empty())
    }
}

impl DiscountCode {
    pub fn apply(&mut self, update: DiscountCodePatch) {
        if let Some(sponsor_id) = update.sponsor_id {
            self.sponsor_id = non_empty(sponsor_id);
        }
        patch(&mut self.code, update.code);
        patch_text(&mut self.description, update.description);
        patch(&mut self.discount_percent, update.discount_percent);
        patch_text(&mut self.url, update.url);
        patch_text(&mut self.logo_url, update.logo_url);
        patch(&mut self.display_order, update.display_order);
        patch(&mut self.is_active, update.is_active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> DiscountCode {
        DiscountCode {
            id: "c1".into(),
            sponsor_id: Some("s1".into()),
            code: "SAVE10".into(),
            description: None,
            discount_percent: Some(10),
            url: None,
            logo_url: None,
            display_order: 0,
            is_active: true,
            created_at: "2024-01-01 00:00:00".into(),
        }
    }

    #[test]
    fn null_sponsor_unlinks_code() {
        let mut c = code();
        let update: DiscountCodePatch =
            serde_json::from_value(serde_json::json!({ "sponsorId": null })).unwrap();
        assert_eq!(update.linked_sponsor(), None);
        c.apply(update);
        assert_eq!(c.sponsor_id, None);
    }

    #[test]
    fn absent_sponsor_keeps_link() {
        let mut c = code();
        let update: DiscountCodePatch =
            serde_json::from_value(serde_json::json!({ "code": "SAVE20" })).unwrap();
        c.apply(update);
        assert_eq!(c.sponsor_id.as_deref(), Some("s1"));
        assert_eq!(c.code, "SAVE20");
    }

    #[test]
    fn linked_sponsor_reports_new_link() {
        let update: DiscountCodePatch =
            serde_json::from_value(serde_json::json!({ "sponsorId": "s2" })).unwrap();
        assert_eq!(update.linked_sponsor(), Some("s2"));
    }
}
