//! Type-safe price representation.

use core::fmt;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A book's unit price in whole currency units.
///
/// The catalog stores integer prices, and cart amounts are always derived
/// as `price * quantity` on the server - never trusted from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Compute the line amount for a quantity, saturating on overflow.
    ///
    /// Quantities are small (a cart line counts copies of one book), so
    /// saturation is a guard, not an expected path.
    #[must_use]
    pub const fn amount_for(self, quantity: u32) -> i64 {
        self.0.saturating_mul(quantity as i64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_for() {
        assert_eq!(Price::new(10).amount_for(1), 10);
        assert_eq!(Price::new(10).amount_for(2), 20);
        assert_eq!(Price::new(0).amount_for(5), 0);
    }

    #[test]
    fn test_amount_for_saturates() {
        assert_eq!(Price::new(i64::MAX).amount_for(2), i64::MAX);
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(499);
        assert_eq!(serde_json::to_string(&price).unwrap(), "499");

        let parsed: Price = serde_json::from_str("499").unwrap();
        assert_eq!(parsed, price);
    }
}
