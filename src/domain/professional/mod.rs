//! Professional module - profiles, offered services and portfolio images.

mod portfolio;
mod profile;
mod service;

pub use portfolio::{sort_for_display, PortfolioDraft, PortfolioInput, PortfolioItem};
pub use profile::{PriceRange, ProfessionalProfile, ProfileDraft, ProfileInput};
pub use service::{Service, ServiceDraft, ServiceInput};

use std::cmp::Ordering;

/// Directory query parameters.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    pub city: Option<String>,
    pub specialty: Option<String>,
}

impl DirectoryFilter {
    pub fn matches(&self, profile: &ProfessionalProfile) -> bool {
        let city_ok = self
            .city
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map_or(true, |c| profile.in_city(c));
        let specialty_ok = self
            .specialty
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map_or(true, |s| profile.has_specialty(s));
        city_ok && specialty_ok
    }
}

/// Directory order: verified first, then higher rating, then more reviews.
pub fn rank_directory(profiles: &mut [ProfessionalProfile]) {
    profiles.sort_by(|a, b| {
        b.is_verified
            .cmp(&a.is_verified)
            .then_with(|| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.total_reviews.cmp(&a.total_reviews))
            .then_with(|| a.business_name.cmp(&b.business_name))
    });
}

/// A public profile page: the profile plus what it offers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PublicProfile {
    pub profile: ProfessionalProfile,
    pub services: Vec<Service>,
    pub portfolio: Vec<PortfolioItem>,
}
