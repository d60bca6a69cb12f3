//! Portfolio images on a professional's profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    max_chars, optional_text, required_text, PortfolioItemId, ProfileId, Timestamp,
    ValidationError,
};

const MAX_CAPTION_CHARS: usize = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioInput {
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioDraft {
    pub image_url: String,
    pub caption: Option<String>,
    pub service_category: Option<String>,
    pub display_order: i32,
}

impl PortfolioDraft {
    pub fn new(input: PortfolioInput) -> Result<Self, ValidationError> {
        let image_url = required_text("image_url", &input.image_url)?;
        if !image_url.starts_with("http://") && !image_url.starts_with("https://") && !image_url.starts_with('/') {
            return Err(ValidationError::invalid_format("image_url", "expected a URL"));
        }
        let caption = optional_text(input.caption);
        if let Some(caption) = &caption {
            max_chars("caption", caption, MAX_CAPTION_CHARS)?;
        }
        Ok(Self {
            image_url,
            caption,
            service_category: optional_text(input.service_category),
            display_order: input.display_order.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioItem {
    pub id: PortfolioItemId,
    pub profile_id: ProfileId,
    pub image_url: String,
    pub caption: Option<String>,
    pub service_category: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PortfolioItem {
    pub fn create(profile_id: ProfileId, draft: PortfolioDraft, now: Timestamp) -> Self {
        Self {
            id: PortfolioItemId::new(),
            profile_id,
            image_url: draft.image_url,
            caption: draft.caption,
            service_category: draft.service_category,
            display_order: draft.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: PortfolioDraft, now: Timestamp) {
        self.image_url = draft.image_url;
        self.caption = draft.caption;
        self.service_category = draft.service_category;
        self.display_order = draft.display_order;
        self.updated_at = now;
    }
}

/// Orders items for display: explicit order first, then newest.
pub fn sort_for_display(items: &mut [PortfolioItem]) {
    items.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PortfolioInput {
        PortfolioInput {
            image_url: "https://cdn.example.com/a.jpg".into(),
            caption: Some("Taper".into()),
            service_category: None,
            display_order: None,
        }
    }

    #[test]
    fn requires_image_url() {
        let raw = PortfolioInput {
            image_url: "".into(),
            ..input()
        };
        assert_eq!(PortfolioDraft::new(raw).unwrap_err().field(), "image_url");
    }

    #[test]
    fn rejects_non_url() {
        let raw = PortfolioInput {
            image_url: "javascript:alert(1)".into(),
            ..input()
        };
        assert!(PortfolioDraft::new(raw).is_err());
    }

    #[test]
    fn caps_caption_length() {
        let raw = PortfolioInput {
            caption: Some("x".repeat(501)),
            ..input()
        };
        assert_eq!(PortfolioDraft::new(raw).unwrap_err().field(), "caption");
    }

    #[test]
    fn sorts_by_order_then_newest() {
        let profile = ProfileId::new();
        let t0 = Timestamp::now();
        let mut a = PortfolioItem::create(profile, PortfolioDraft::new(input()).unwrap(), t0);
        a.display_order = 1;
        let b = PortfolioItem::create(profile, PortfolioDraft::new(input()).unwrap(), t0);
        let c = PortfolioItem::create(profile, PortfolioDraft::new(input()).unwrap(), t0.plus_secs(1));

        let mut items = vec![a.clone(), b.clone(), c.clone()];
        sort_for_display(&mut items);
        assert_eq!(items[0].id, c.id);
        assert_eq!(items[1].id, b.id);
        assert_eq!(items[2].id, a.id);
    }
}
