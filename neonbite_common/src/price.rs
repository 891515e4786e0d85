use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------       Price       -----------------------------------------------------------
/// A monetary amount, stored as an integer number of cents.
///
/// Totals are exact sums in cents. Conversion to two-decimal dollars happens only at the display and JSON
/// boundaries, never at rest.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd)]
#[sqlx(transparent)]
pub struct Price(i64);

op!(binary Price, Add, add);
op!(binary Price, Sub, sub);
op!(inplace Price, SubAssign, sub_assign);
op!(unary Price, Neg, neg);

impl Mul<i64> for Price {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct PriceConversionError(String);

impl From<i64> for Price {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Price {}

impl TryFrom<f64> for Price {
    type Error = PriceConversionError;

    fn try_from(dollars: f64) -> Result<Self, Self::Error> {
        if !dollars.is_finite() {
            return Err(PriceConversionError(format!("{dollars} is not a finite amount")));
        }
        let cents = (dollars * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            Err(PriceConversionError(format!("{dollars} is too large to convert to cents")))
        } else {
            #[allow(clippy::cast_possible_truncation)]
            Ok(Self(cents as i64))
        }
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dollars = self.0 as f64 / 100.0;
        write!(f, "${dollars:0.2}")
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Price::try_from(dollars).map_err(de::Error::custom)
    }
}

impl Price {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Lenient conversion from a decimal dollar amount. Amounts that cannot be represented become zero.
    pub fn from_dollars(dollars: f64) -> Self {
        Self::try_from(dollars).unwrap_or_default()
    }
}
