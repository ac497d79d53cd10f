//! Integer price representation.
//!
//! Listings are priced in Ugandan shillings, which have no subunit in
//! practice, so prices are whole integer currency units. Totals are computed
//! in `i64` to leave headroom for quantity multiplication.

use serde::{Deserialize, Serialize};

/// A price in whole currency units (UGX).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero price, used as the default for records missing a price.
    pub const ZERO: Self = Self(0);

    /// Create a price from whole currency units.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole currency units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Line total for a quantity of items at this price.
    ///
    /// Saturates on overflow rather than wrapping.
    #[must_use]
    pub const fn line_total(&self, quantity: u32) -> i64 {
        self.0.saturating_mul(quantity as i64)
    }
}

impl std::fmt::Display for Price {
    /// Formats as `UGX 50,000` with thousands grouping.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UGX {}", group_thousands(self.0))
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

/// Insert comma separators into an integer's decimal representation.
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
