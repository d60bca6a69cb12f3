//! Review entity and its validated draft.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    max_chars, optional_text, required_text, OwnedByUser, ReviewId, StarRating, Timestamp,
    UserId, ValidationError,
};

use super::professional_rating::RatedProfessional;

const MAX_TITLE_CHARS: usize = 120;
const MAX_BODY_CHARS: usize = 5000;

/// Raw review fields as submitted by a client form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewInput {
    pub professional_name: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub service_type: String,
    pub rating: i64,
    #[serde(default)]
    pub cost: Option<f64>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Validated review content, ready to be attached to a new or existing review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub professional_name: String,
    pub venue: String,
    pub location: Option<String>,
    pub service_type: String,
    pub rating: StarRating,
    pub cost: Option<f64>,
    pub title: String,
    pub body: String,
    pub is_public: bool,
}

impl ReviewDraft {
    /// Validates raw input: required text fields, 1..=5 rating, non-negative cost.
    pub fn new(input: ReviewInput) -> Result<Self, ValidationError> {
        let rating = StarRating::new(input.rating)?;
        let professional_name = required_text("professional_name", &input.professional_name)?;
        let service_type = required_text("service_type", &input.service_type)?;
        let title = required_text("title", &input.title)?;
        let body = required_text("body", &input.body)?;
        max_chars("title", &title, MAX_TITLE_CHARS)?;
        max_chars("body", &body, MAX_BODY_CHARS)?;

        if let Some(cost) = input.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ValidationError::invalid_format(
                    "cost",
                    "must be a non-negative amount",
                ));
            }
        }

        Ok(Self {
            professional_name,
            venue: optional_text(input.venue).unwrap_or_default(),
            location: optional_text(input.location),
            service_type,
            rating,
            cost: input.cost,
            title,
            body,
            is_public: input.is_public,
        })
    }
}

/// A client's review of a visit to a professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub author: UserId,
    pub professional_name: String,
    pub venue: String,
    pub location: Option<String>,
    pub service_type: String,
    pub rating: StarRating,
    pub cost: Option<f64>,
    pub title: String,
    pub body: String,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Review {
    /// Creates a new review authored by `author`.
    pub fn create(author: UserId, draft: ReviewDraft, now: Timestamp) -> Self {
        Self {
            id: ReviewId::new(),
            author,
            professional_name: draft.professional_name,
            venue: draft.venue,
            location: draft.location,
            service_type: draft.service_type,
            rating: draft.rating,
            cost: draft.cost,
            title: draft.title,
            body: draft.body,
            is_public: draft.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy of this review with its content replaced by `draft`.
    pub fn revised(&self, draft: ReviewDraft, now: Timestamp) -> Self {
        Self {
            id: self.id,
            author: self.author.clone(),
            professional_name: draft.professional_name,
            venue: draft.venue,
            location: draft.location,
            service_type: draft.service_type,
            rating: draft.rating,
            cost: draft.cost,
            title: draft.title,
            body: draft.body,
            is_public: draft.is_public,
            created_at: self.created_at,
            updated_at: now,
        }
    }

    /// The professional this review counts towards.
    pub fn professional(&self) -> RatedProfessional {
        RatedProfessional::new(&self.professional_name, &self.venue, self.location.clone())
    }
}

impl OwnedByUser for Review {
    fn owner_id(&self) -> &UserId {
        &self.author
    }

    fn resource_name(&self) -> &'static str {
        "Review"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: i64) -> ReviewInput {
        ReviewInput {
            professional_name: "Jane".to_string(),
            venue: Some("ShopX".to_string()),
            location: Some("Austin, TX".to_string()),
            service_type: "Fade".to_string(),
            rating,
            cost: Some(35.0),
            title: "Great cut".to_string(),
            body: "Clean fade, on time.".to_string(),
            is_public: true,
        }
    }

    #[test]
    fn draft_accepts_valid_input() {
        let draft = ReviewDraft::new(input(5)).unwrap();
        assert_eq!(draft.rating.value(), 5);
        assert_eq!(draft.venue, "ShopX");
    }

    #[test]
    fn draft_rejects_rating_out_of_range() {
        for bad in [0, 6, -3, 100] {
            let err = ReviewDraft::new(input(bad)).unwrap_err();
            assert_eq!(err.field(), "rating");
        }
    }

    #[test]
    fn draft_rejects_blank_required_fields() {
        let mut raw = input(4);
        raw.title = "   ".to_string();
        assert_eq!(ReviewDraft::new(raw).unwrap_err().field(), "title");

        let mut raw = input(4);
        raw.professional_name = String::new();
        assert_eq!(
            ReviewDraft::new(raw).unwrap_err().field(),
            "professional_name"
        );
    }

    #[test]
    fn draft_rejects_negative_cost() {
        let mut raw = input(4);
        raw.cost = Some(-1.0);
        assert_eq!(ReviewDraft::new(raw).unwrap_err().field(), "cost");
    }

    #[test]
    fn draft_blank_venue_becomes_empty() {
        let mut raw = input(4);
        raw.venue = Some("  ".to_string());
        assert_eq!(ReviewDraft::new(raw).unwrap().venue, "");
    }

    #[test]
    fn revised_keeps_identity_and_creation_time() {
        let author = UserId::new("a@example.com").unwrap();
        let created = Timestamp::now();
        let review = Review::create(author.clone(), ReviewDraft::new(input(5)).unwrap(), created);

        let later = created.plus_secs(60);
        let revised = review.revised(ReviewDraft::new(input(2)).unwrap(), later);

        assert_eq!(revised.id, review.id);
        assert_eq!(revised.author, author);
        assert_eq!(revised.created_at, created);
        assert_eq!(revised.updated_at, later);
        assert_eq!(revised.rating.value(), 2);
    }

    #[test]
    fn foreign_author_cannot_touch_review() {
        let review = Review::create(
            UserId::new("a@example.com").unwrap(),
            ReviewDraft::new(input(5)).unwrap(),
            Timestamp::now(),
        );
        let other = UserId::new("b@example.com").unwrap();
        assert!(review.check_ownership(&other).is_err());
    }
}
