//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog service is loose about price encoding: most products carry a
//! JSON number, some carry a numeric string, and a malformed feed can omit
//! the field entirely. Cart totals must keep working in all three cases, so
//! deserialization is lenient: anything that does not parse as a decimal
//! becomes zero instead of failing the whole payload.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A product price in the currency's standard unit (e.g., dollars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Formats with exactly two decimal places, as rendered in the UI.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    /// Serializes as a decimal string (rust_decimal convention), so that a
    /// serialize/deserialize round trip is the identity.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a numeric string")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Price, E> {
        Ok(Decimal::from_str(v).map_or(Price::ZERO, Price::new))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Decimal::try_from(v).map_or(Price::ZERO, Price::new))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price::new(Decimal::from(v)))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price::new(Decimal::from(v)))
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Price, E> {
        Ok(Price::ZERO)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Price, E> {
        Ok(Price::ZERO)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}
