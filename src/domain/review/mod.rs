//! Review module - client reviews and per-professional aggregate ratings.

mod professional_rating;
mod review;

pub use professional_rating::{
    adjustments_for_update, ProfessionalKey, ProfessionalRating, RatedProfessional,
    RatingAdjustment,
};
pub use review::{Review, ReviewDraft, ReviewInput};
