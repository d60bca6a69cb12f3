//! Star rating value object (1 to 5 stars).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Client rating of a visit: 1 (poor) to 5 (excellent) stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting anything outside 1..=5.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a float for averaging.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl TryFrom<i64> for StarRating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StarRating> for i64 {
    fn from(rating: StarRating) -> Self {
        rating.0 as i64
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_value_in_range() {
        for v in 1..=5 {
            assert_eq!(StarRating::new(v).unwrap().value() as i64, v);
        }
    }

    #[test]
    fn rejects_values_outside_range() {
        assert!(StarRating::new(0).is_err());
        assert!(StarRating::new(6).is_err());
        assert!(StarRating::new(-1).is_err());
    }

    #[test]
    fn deserializes_from_number() {
        let rating: StarRating = serde_json::from_str("4").unwrap();
        assert_eq!(rating.value(), 4);
    }

    #[test]
    fn deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<StarRating>("9").is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&StarRating::new(3).unwrap()).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn displays_out_of_five() {
        assert_eq!(StarRating::new(5).unwrap().to_string(), "5/5");
    }
}
