//! Product and testimonial rating (0-5 stars, half-steps allowed).
//!
//! Stored internally as a count of half-steps (0..=10) so equality and
//! ordering are exact; serialized as a plain JSON number to match the
//! document shapes (`4.5`, `5`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error constructing a [`Rating`].
#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    /// Value is outside the 0-5 range.
    #[error("rating {0} is out of range (0-5)")]
    OutOfRange(f64),

    /// Value is not a multiple of 0.5.
    #[error("rating {0} is not a half-step value")]
    NotHalfStep(f64),
}

/// A star rating from 0 to 5 in half-step increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rating(u8);

impl Rating {
    /// Zero stars, the default for unrated records.
    pub const ZERO: Self = Self(0);

    /// Five stars.
    pub const MAX: Self = Self(10);

    /// Build a rating from a floating-point star value.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if the value is outside 0-5 or not a multiple
    /// of 0.5.
    pub fn from_stars(stars: f64) -> Result<Self, RatingError> {
        if !(0.0..=5.0).contains(&stars) || !stars.is_finite() {
            return Err(RatingError::OutOfRange(stars));
        }

        let half_steps = stars * 2.0;
        if half_steps.fract() != 0.0 {
            return Err(RatingError::NotHalfStep(stars));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(half_steps as u8))
    }

    /// The rating as a star value (`0.0..=5.0`).
    #[must_use]
    pub fn stars(&self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole-star ratings serialize as integers (matches stored documents)
        if self.0 % 2 == 0 {
            serializer.serialize_u8(self.0 / 2)
        } else {
            serializer.serialize_f64(self.stars())
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stars = f64::deserialize(deserializer)?;
        Self::from_stars(stars).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_half_steps() {
        assert_eq!(Rating::from_stars(0.0).expect("valid"), Rating::ZERO);
        assert_eq!(Rating::from_stars(5.0).expect("valid"), Rating::MAX);
        assert!((Rating::from_stars(4.5).expect("valid").stars() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            Rating::from_stars(5.5),
            Err(RatingError::OutOfRange(5.5))
        );
        assert_eq!(
            Rating::from_stars(-0.5),
            Err(RatingError::OutOfRange(-0.5))
        );
    }

    #[test]
    fn test_quarter_step_rejected() {
        assert_eq!(
            Rating::from_stars(4.25),
            Err(RatingError::NotHalfStep(4.25))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let whole = Rating::from_stars(5.0).expect("valid");
        assert_eq!(serde_json::to_string(&whole).expect("serialize"), "5");

        let half = Rating::from_stars(4.5).expect("valid");
        assert_eq!(serde_json::to_string(&half).expect("serialize"), "4.5");

        let back: Rating = serde_json::from_str("4.5").expect("deserialize");
        assert_eq!(back, half);
    }

    #[test]
    fn test_deserialize_invalid() {
        assert!(serde_json::from_str::<Rating>("7").is_err());
        assert!(serde_json::from_str::<Rating>("3.3").is_err());
    }
}
