//! Denormalized aggregate rating per professional.
//!
//! Every review write turns into one or more `RatingAdjustment`s which are
//! folded into the professional's running average. Adapters apply each
//! adjustment while holding the aggregate row (transaction row lock or
//! mutex), so concurrent writers cannot lose updates.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::{StarRating, Timestamp};

/// Case- and whitespace-insensitive identity of a reviewed professional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProfessionalKey {
    name: String,
    venue: String,
}

impl ProfessionalKey {
    pub fn new(name: &str, venue: &str) -> Self {
        Self {
            name: normalize(name),
            venue: normalize(venue),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }
}

impl fmt::Display for ProfessionalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.venue.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.name, self.venue)
        }
    }
}

fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Display details of the professional a review is about.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedProfessional {
    pub name: String,
    pub venue: String,
    pub location: Option<String>,
}

impl RatedProfessional {
    pub fn new(name: &str, venue: &str, location: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            venue: venue.trim().to_string(),
            location,
        }
    }

    pub fn key(&self) -> ProfessionalKey {
        ProfessionalKey::new(&self.name, &self.venue)
    }
}

/// Aggregate record: running average of one professional's review ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalRating {
    pub key: ProfessionalKey,
    pub professional_name: String,
    pub venue: String,
    pub location: Option<String>,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub updated_at: Timestamp,
}

impl ProfessionalRating {
    /// Aggregate for a professional's first review.
    pub fn first(professional: &RatedProfessional, rating: StarRating, now: Timestamp) -> Self {
        Self {
            key: professional.key(),
            professional_name: professional.name.clone(),
            venue: professional.venue.clone(),
            location: professional.location.clone(),
            average_rating: rating.as_f64(),
            total_reviews: 1,
            updated_at: now,
        }
    }

    /// `(avg * n + r) / (n + 1)`
    pub fn with_added(&self, rating: StarRating, now: Timestamp) -> Self {
        let count = self.total_reviews as f64;
        let average = (self.average_rating * count + rating.as_f64()) / (count + 1.0);
        Self {
            average_rating: clamp_average(average),
            total_reviews: self.total_reviews + 1,
            updated_at: now,
            ..self.clone()
        }
    }

    /// `(avg * n - r) / (n - 1)`, or `None` once no reviews remain.
    pub fn with_removed(&self, rating: StarRating, now: Timestamp) -> Option<Self> {
        if self.total_reviews <= 1 {
            return None;
        }
        let count = self.total_reviews as f64;
        let average = (self.average_rating * count - rating.as_f64()) / (count - 1.0);
        Some(Self {
            average_rating: clamp_average(average),
            total_reviews: self.total_reviews - 1,
            updated_at: now,
            ..self.clone()
        })
    }

    /// `(avg * n - old + new) / n`
    pub fn with_replaced(&self, old: StarRating, new: StarRating, now: Timestamp) -> Self {
        if self.total_reviews == 0 {
            return Self {
                average_rating: new.as_f64(),
                total_reviews: 1,
                updated_at: now,
                ..self.clone()
            };
        }
        let count = self.total_reviews as f64;
        let average = (self.average_rating * count - old.as_f64() + new.as_f64()) / count;
        Self {
            average_rating: clamp_average(average),
            updated_at: now,
            ..self.clone()
        }
    }

    /// Average rounded to two decimals for display.
    pub fn rounded_average(&self) -> f64 {
        (self.average_rating * 100.0).round() / 100.0
    }
}

fn clamp_average(value: f64) -> f64 {
    value.clamp(StarRating::MIN as f64, StarRating::MAX as f64)
}

/// One change to a professional's aggregate caused by a review write.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingAdjustment {
    Added {
        professional: RatedProfessional,
        rating: StarRating,
    },
    Removed {
        key: ProfessionalKey,
        rating: StarRating,
    },
    Replaced {
        professional: RatedProfessional,
        old: StarRating,
        new: StarRating,
    },
}

impl RatingAdjustment {
    /// The aggregate row this adjustment touches.
    pub fn key(&self) -> ProfessionalKey {
        match self {
            RatingAdjustment::Added { professional, .. }
            | RatingAdjustment::Replaced { professional, .. } => professional.key(),
            RatingAdjustment::Removed { key, .. } => key.clone(),
        }
    }

    /// Folds the adjustment into the current aggregate.
    ///
    /// `None` in means no record exists yet; `None` out means the record
    /// must be deleted (or stay absent).
    pub fn apply(
        &self,
        current: Option<&ProfessionalRating>,
        now: Timestamp,
    ) -> Option<ProfessionalRating> {
        match (self, current) {
            (RatingAdjustment::Added { professional, rating }, None) => {
                Some(ProfessionalRating::first(professional, *rating, now))
            }
            (RatingAdjustment::Added { rating, .. }, Some(existing)) => {
                Some(existing.with_added(*rating, now))
            }
            (RatingAdjustment::Removed { .. }, None) => None,
            (RatingAdjustment::Removed { rating, .. }, Some(existing)) => {
                existing.with_removed(*rating, now)
            }
            (RatingAdjustment::Replaced { professional, new, .. }, None) => {
                Some(ProfessionalRating::first(professional, *new, now))
            }
            (RatingAdjustment::Replaced { old, new, .. }, Some(existing)) => {
                Some(existing.with_replaced(*old, *new, now))
            }
        }
    }
}

/// Adjustments needed when a review is edited from `previous` to `updated`.
///
/// A rating change for the same professional is a single replace; moving the
/// review to a different professional removes it from one aggregate and adds
/// it to the other.
pub fn adjustments_for_update(
    previous: (&RatedProfessional, StarRating),
    updated: (&RatedProfessional, StarRating),
) -> Vec<RatingAdjustment> {
    let (old_pro, old_rating) = previous;
    let (new_pro, new_rating) = updated;

    if old_pro.key() == new_pro.key() {
        if old_rating == new_rating {
            return Vec::new();
        }
        return vec![RatingAdjustment::Replaced {
            professional: new_pro.clone(),
            old: old_rating,
            new: new_rating,
        }];
    }

    vec![
        RatingAdjustment::Removed {
            key: old_pro.key(),
            rating: old_rating,
        },
        RatingAdjustment::Added {
            professional: new_pro.clone(),
            rating: new_rating,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars(v: i64) -> StarRating {
        StarRating::new(v).unwrap()
    }

    fn jane() -> RatedProfessional {
        RatedProfessional::new("Jane", "ShopX", None)
    }

    #[test]
    fn key_ignores_case_and_spacing() {
        assert_eq!(
            ProfessionalKey::new(" Jane  Doe ", "Shop X"),
            ProfessionalKey::new("jane doe", "SHOP   x")
        );
        assert_eq!(ProfessionalKey::new("Jane", "ShopX").to_string(), "jane/shopx");
        assert_eq!(ProfessionalKey::new("Jane", "").to_string(), "jane");
    }

    #[test]
    fn create_create_delete_scenario() {
        let now = Timestamp::now();
        let five = RatingAdjustment::Added {
            professional: jane(),
            rating: stars(5),
        };
        let agg = five.apply(None, now).unwrap();
        assert_eq!(agg.average_rating, 5.0);
        assert_eq!(agg.total_reviews, 1);

        let three = RatingAdjustment::Added {
            professional: jane(),
            rating: stars(3),
        };
        let agg = three.apply(Some(&agg), now).unwrap();
        assert_eq!(agg.average_rating, 4.0);
        assert_eq!(agg.total_reviews, 2);

        let remove_five = RatingAdjustment::Removed {
            key: jane().key(),
            rating: stars(5),
        };
        let agg = remove_five.apply(Some(&agg), now).unwrap();
        assert_eq!(agg.average_rating, 3.0);
        assert_eq!(agg.total_reviews, 1);
    }

    #[test]
    fn removing_last_review_deletes_aggregate() {
        let now = Timestamp::now();
        let agg = ProfessionalRating::first(&jane(), stars(4), now);
        assert!(agg.with_removed(stars(4), now).is_none());
    }

    #[test]
    fn removing_from_missing_aggregate_is_noop() {
        let adj = RatingAdjustment::Removed {
            key: jane().key(),
            rating: stars(2),
        };
        assert!(adj.apply(None, Timestamp::now()).is_none());
    }

    #[test]
    fn replace_keeps_count() {
        let now = Timestamp::now();
        let agg = ProfessionalRating::first(&jane(), stars(5), now).with_added(stars(3), now);
        let agg = agg.with_replaced(stars(3), stars(1), now);
        assert_eq!(agg.total_reviews, 2);
        assert_eq!(agg.average_rating, 3.0);
    }

    #[test]
    fn update_same_professional_same_rating_needs_nothing() {
        assert!(adjustments_for_update((&jane(), stars(4)), (&jane(), stars(4))).is_empty());
    }

    #[test]
    fn update_same_professional_replaces_rating() {
        let adj = adjustments_for_update((&jane(), stars(4)), (&jane(), stars(2)));
        assert_eq!(adj.len(), 1);
        assert!(matches!(adj[0], RatingAdjustment::Replaced { .. }));
    }

    #[test]
    fn update_moving_professional_removes_then_adds() {
        let other = RatedProfessional::new("Mo", "Fresh Cuts", None);
        let adj = adjustments_for_update((&jane(), stars(4)), (&other, stars(4)));
        assert_eq!(adj.len(), 2);
        assert_eq!(adj[0].key(), jane().key());
        assert_eq!(adj[1].key(), other.key());
    }

    #[test]
    fn rounded_average_uses_two_decimals() {
        let now = Timestamp::now();
        let agg = ProfessionalRating::first(&jane(), stars(5), now)
            .with_added(stars(4), now)
            .with_added(stars(4), now);
        assert_eq!(agg.rounded_average(), 4.33);
    }
}
