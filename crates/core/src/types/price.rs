//! Monetary amounts in integer minor currency units.
//!
//! All money arithmetic in Orderdesk is integer-only. Prices are stored as
//! cents (`i32`, matching the `INTEGER` column) and derived amounts such as
//! line subtotals are widened to `i64` so a large quantity times a large
//! price cannot overflow.

use serde::{Deserialize, Serialize};

/// A product price in minor currency units (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i32);

impl Cents {
    /// Create a price from a raw cent amount.
    #[must_use]
    pub const fn new(cents: i32) -> Self {
        Self(cents)
    }

    /// Get the underlying cent amount.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Whether the amount is strictly positive.
    ///
    /// Product prices must be positive; this backs DTO validation at the
    /// HTTP boundary and the `CHECK` constraint backs it at the store.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Multiply this price by a quantity, widening to `i64`.
    ///
    /// This is the line-item subtotal calculation: quantity times the
    /// product's current price.
    #[must_use]
    pub fn times(self, quantity: i32) -> i64 {
        i64::from(self.0) * i64::from(quantity)
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Cents {
    fn from(cents: i32) -> Self {
        Self(cents)
    }
}

impl From<Cents> for i32 {
    fn from(cents: Cents) -> Self {
        cents.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cents {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cents {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let cents = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(cents))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cents {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        assert_eq!(Cents::new(250_000).times(2), 500_000);
        assert_eq!(Cents::new(999).times(0), 0);
    }

    #[test]
    fn test_times_does_not_overflow_i32() {
        // i32::MAX cents at quantity 3 exceeds i32 but fits in i64
        let total = Cents::new(i32::MAX).times(3);
        assert_eq!(total, i64::from(i32::MAX) * 3);
    }

    #[test]
    fn test_is_positive() {
        assert!(Cents::new(1).is_positive());
        assert!(!Cents::new(0).is_positive());
        assert!(!Cents::new(-5).is_positive());
    }

    #[test]
    fn test_serde_transparent() {
        let price = Cents::new(5000);
        assert_eq!(serde_json::to_string(&price).unwrap(), "5000");
        let parsed: Cents = serde_json::from_str("5000").unwrap();
        assert_eq!(parsed, price);
    }
}
