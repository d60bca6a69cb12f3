//! Professional profile: the public business card of a stylist or barber.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    max_chars, optional_text, required_text, OwnedByUser, ProfileId, Timestamp, UserId,
    ValidationError,
};
use crate::domain::review::{ProfessionalKey, ProfessionalRating};

const MAX_SPECIALTIES: usize = 10;
const MAX_BIO_CHARS: usize = 2000;
const MAX_YEARS_EXPERIENCE: i64 = 80;

/// Price band shown in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriceRange {
    Budget,
    Moderate,
    Premium,
    Luxury,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Budget => "$",
            PriceRange::Moderate => "$$",
            PriceRange::Premium => "$$$",
            PriceRange::Luxury => "$$$$",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(PriceRange::Budget),
            "$$" => Ok(PriceRange::Moderate),
            "$$$" => Ok(PriceRange::Premium),
            "$$$$" => Ok(PriceRange::Luxury),
            _ => Err(ValidationError::invalid_format(
                "price_range",
                "expected one of $, $$, $$$, $$$$",
            )),
        }
    }
}

impl TryFrom<String> for PriceRange {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceRange> for String {
    fn from(range: PriceRange) -> Self {
        range.as_str().to_string()
    }
}

/// Raw profile form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    pub business_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub years_experience: Option<i64>,
}

/// Validated profile content.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub business_name: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub specialties: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub years_experience: Option<u32>,
}

impl ProfileDraft {
    pub fn new(input: ProfileInput) -> Result<Self, ValidationError> {
        let business_name = required_text("business_name", &input.business_name)?;
        let bio = optional_text(input.bio);
        if let Some(bio) = &bio {
            max_chars("bio", bio, MAX_BIO_CHARS)?;
        }

        let email = optional_text(input.email);
        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(ValidationError::invalid_format("email", "expected an email address"));
            }
        }

        let price_range = optional_text(input.price_range)
            .map(|p| p.parse::<PriceRange>())
            .transpose()?;

        let years_experience = match input.years_experience {
            Some(years) if !(0..=MAX_YEARS_EXPERIENCE).contains(&years) => {
                return Err(ValidationError::out_of_range(
                    "years_experience",
                    0,
                    MAX_YEARS_EXPERIENCE,
                    years,
                ));
            }
            Some(years) => Some(years as u32),
            None => None,
        };

        Ok(Self {
            business_name,
            display_name: optional_text(input.display_name),
            bio,
            phone: optional_text(input.phone),
            email,
            website: optional_text(input.website),
            instagram: optional_text(input.instagram).map(|h| h.trim_start_matches('@').to_string()),
            address: optional_text(input.address),
            city: optional_text(input.city),
            state: optional_text(input.state),
            specialties: normalize_specialties(input.specialties)?,
            price_range,
            years_experience,
        })
    }
}

/// Trims, drops blanks and case-insensitive duplicates, caps the list.
fn normalize_specialties(raw: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut out: Vec<String> = Vec::new();
    for item in raw {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if out.iter().any(|s| s.eq_ignore_ascii_case(item)) {
            continue;
        }
        out.push(item.to_string());
    }
    if out.len() > MAX_SPECIALTIES {
        return Err(ValidationError::out_of_range(
            "specialties",
            0,
            MAX_SPECIALTIES as i64,
            out.len() as i64,
        ));
    }
    Ok(out)
}

/// A professional's directory profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalProfile {
    pub id: ProfileId,
    pub owner: UserId,
    pub business_name: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub specialties: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub years_experience: Option<u32>,
    pub is_verified: bool,
    /// Read from the professional's review aggregate, 0 when unrated.
    pub average_rating: f64,
    pub total_reviews: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProfessionalProfile {
    pub fn create(owner: UserId, draft: ProfileDraft, now: Timestamp) -> Self {
        let mut profile = Self {
            id: ProfileId::new(),
            owner,
            business_name: String::new(),
            display_name: None,
            bio: None,
            phone: None,
            email: None,
            website: None,
            instagram: None,
            address: None,
            city: None,
            state: None,
            specialties: Vec::new(),
            price_range: None,
            years_experience: None,
            is_verified: false,
            average_rating: 0.0,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        };
        profile.apply(draft, now);
        profile
    }

    /// Replaces editable content. Verification and ratings are untouched.
    pub fn apply(&mut self, draft: ProfileDraft, now: Timestamp) {
        self.business_name = draft.business_name;
        self.display_name = draft.display_name;
        self.bio = draft.bio;
        self.phone = draft.phone;
        self.email = draft.email;
        self.website = draft.website;
        self.instagram = draft.instagram;
        self.address = draft.address;
        self.city = draft.city;
        self.state = draft.state;
        self.specialties = draft.specialties;
        self.price_range = draft.price_range;
        self.years_experience = draft.years_experience;
        self.updated_at = now;
    }

    /// Name shown in listings.
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.business_name)
    }

    /// Aggregate key reviews of this professional are filed under.
    ///
    /// With a display name the person is the professional and the business
    /// is the venue; otherwise the business name stands alone.
    pub fn rating_key(&self) -> ProfessionalKey {
        match &self.display_name {
            Some(person) => ProfessionalKey::new(person, &self.business_name),
            None => ProfessionalKey::new(&self.business_name, ""),
        }
    }

    /// Copies the aggregate rating onto the profile (zero when unrated).
    pub fn with_rating(mut self, rating: Option<&ProfessionalRating>) -> Self {
        match rating {
            Some(r) => {
                self.average_rating = r.rounded_average();
                self.total_reviews = r.total_reviews;
            }
            None => {
                self.average_rating = 0.0;
                self.total_reviews = 0;
            }
        }
        self
    }

    pub fn has_specialty(&self, wanted: &str) -> bool {
        let wanted = wanted.trim();
        self.specialties
            .iter()
            .any(|s| s.to_lowercase().contains(&wanted.to_lowercase()))
    }

    pub fn in_city(&self, wanted: &str) -> bool {
        self.city
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted.trim()))
    }
}

impl OwnedByUser for ProfessionalProfile {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }

    fn resource_name(&self) -> &'static str {
        "Professional profile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProfileInput {
        ProfileInput {
            business_name: "  Fresh Cuts ".to_string(),
            city: Some("Austin".to_string()),
            specialties: vec!["Fades".into(), " fades ".into(), "".into(), "Beards".into()],
            price_range: Some("$$".to_string()),
            instagram: Some("@freshcuts".to_string()),
            years_experience: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn draft_normalizes_fields() {
        let draft = ProfileDraft::new(input()).unwrap();
        assert_eq!(draft.business_name, "Fresh Cuts");
        assert_eq!(draft.specialties, vec!["Fades".to_string(), "Beards".to_string()]);
        assert_eq!(draft.price_range, Some(PriceRange::Moderate));
        assert_eq!(draft.instagram.as_deref(), Some("freshcuts"));
        assert_eq!(draft.years_experience, Some(7));
    }

    #[test]
    fn draft_requires_business_name() {
        let raw = ProfileInput {
            business_name: " ".into(),
            ..input()
        };
        assert_eq!(ProfileDraft::new(raw).unwrap_err().field(), "business_name");
    }

    #[test]
    fn draft_rejects_unknown_price_range() {
        let raw = ProfileInput {
            price_range: Some("cheap".into()),
            ..input()
        };
        assert_eq!(ProfileDraft::new(raw).unwrap_err().field(), "price_range");
    }

    #[test]
    fn draft_caps_specialties() {
        let raw = ProfileInput {
            specialties: (0..11).map(|i| format!("style {}", i)).collect(),
            ..input()
        };
        assert_eq!(ProfileDraft::new(raw).unwrap_err().field(), "specialties");
    }

    #[test]
    fn draft_rejects_negative_experience() {
        let raw = ProfileInput {
            years_experience: Some(-2),
            ..input()
        };
        assert!(ProfileDraft::new(raw).is_err());
    }

    #[test]
    fn apply_keeps_verification_and_identity() {
        let owner = UserId::new("pro@example.com").unwrap();
        let now = Timestamp::now();
        let mut profile = ProfessionalProfile::create(owner, ProfileDraft::new(input()).unwrap(), now);
        profile.is_verified = true;
        let id = profile.id;

        let later = now.plus_secs(10);
        let draft = ProfileDraft::new(ProfileInput {
            business_name: "Fresh Cuts Studio".into(),
            ..Default::default()
        })
        .unwrap();
        profile.apply(draft, later);

        assert_eq!(profile.id, id);
        assert!(profile.is_verified);
        assert_eq!(profile.business_name, "Fresh Cuts Studio");
        assert_eq!(profile.created_at, now);
        assert_eq!(profile.updated_at, later);
    }

    #[test]
    fn filters_match_loosely() {
        let owner = UserId::new("pro@example.com").unwrap();
        let profile = ProfessionalProfile::create(owner, ProfileDraft::new(input()).unwrap(), Timestamp::now());
        assert!(profile.in_city("austin "));
        assert!(profile.has_specialty("fade"));
        assert!(!profile.has_specialty("braids"));
    }

    #[test]
    fn rating_key_pairs_person_with_business() {
        let owner = UserId::new("pro@example.com").unwrap();
        let mut profile = ProfessionalProfile::create(owner, ProfileDraft::new(input()).unwrap(), Timestamp::now());
        assert_eq!(profile.rating_key(), ProfessionalKey::new("fresh cuts", ""));
        profile.display_name = Some("Jane".into());
        assert_eq!(profile.rating_key(), ProfessionalKey::new("Jane", "Fresh Cuts"));
    }

    #[test]
    fn price_range_round_trips_as_symbols() {
        let json = serde_json::to_string(&PriceRange::Luxury).unwrap();
        assert_eq!(json, "\"$$$$\"");
        let parsed: PriceRange = serde_json::from_str("\"$\"").unwrap();
        assert_eq!(parsed, PriceRange::Budget);
    }
}
