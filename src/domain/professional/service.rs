//! Services a professional offers, with price band and duration.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    optional_text, required_text, ProfileId, ServiceId, Timestamp, ValidationError,
};

const MAX_DURATION_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub duration_minutes: Option<u32>,
}

impl ServiceDraft {
    pub fn new(input: ServiceInput) -> Result<Self, ValidationError> {
        let name = required_text("name", &input.name)?;
        check_price("price_min", input.price_min)?;
        check_price("price_max", input.price_max)?;
        if let (Some(min), Some(max)) = (input.price_min, input.price_max) {
            if min > max {
                return Err(ValidationError::invalid_format(
                    "price_min",
                    "must not exceed price_max",
                ));
            }
        }

        let duration_minutes = match input.duration_minutes {
            Some(d) if d <= 0 || d > MAX_DURATION_MINUTES => {
                return Err(ValidationError::out_of_range(
                    "duration_minutes",
                    1,
                    MAX_DURATION_MINUTES,
                    d,
                ));
            }
            Some(d) => Some(d as u32),
            None => None,
        };

        Ok(Self {
            name,
            description: optional_text(input.description),
            price_min: input.price_min,
            price_max: input.price_max,
            duration_minutes,
        })
    }
}

fn check_price(field: &str, price: Option<f64>) -> Result<(), ValidationError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(ValidationError::invalid_format(
            field,
            "must be a non-negative amount",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub profile_id: ProfileId,
    pub name: String,
    pub description: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub duration_minutes: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Service {
    pub fn create(profile_id: ProfileId, draft: ServiceDraft, now: Timestamp) -> Self {
        Self {
            id: ServiceId::new(),
            profile_id,
            name: draft.name,
            description: draft.description,
            price_min: draft.price_min,
            price_max: draft.price_max,
            duration_minutes: draft.duration_minutes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: ServiceDraft, now: Timestamp) {
        self.name = draft.name;
        self.description = draft.description;
        self.price_min = draft.price_min;
        self.price_max = draft.price_max;
        self.duration_minutes = draft.duration_minutes;
        self.updated_at = now;
    }
}
