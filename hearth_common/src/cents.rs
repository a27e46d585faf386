use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------       Cents        ----------------------------------------------------------
/// A monetary amount in US cents.
///
/// All store arithmetic is carried out in integer cents, so sums and differences are exact. Fractional results (e.g.
/// applying a percentage discount) must be rounded explicitly via [`Cents::percent`].
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Cents(i64);

op!(binary Cents, Add, add);
op!(binary Cents, Sub, sub);
op!(inplace Cents, AddAssign, add_assign);
op!(inplace Cents, SubAssign, sub_assign);
op!(unary Cents, Neg, neg);

impl Mul<i64> for Cents {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct CentsConversionError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Cents {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Cents {}

impl TryFrom<u64> for Cents {
    type Error = CentsConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(CentsConversionError(format!("Value {} is too large to convert to Cents", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl Cents {
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Applies a whole-number percentage, rounding half-up at the cent.
    pub fn percent(self, pct: i64) -> Self {
        Self((self.0 * pct + 50).div_euclid(100))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Clamps negative amounts to zero.
    pub fn or_zero(self) -> Self {
        if self.0 < 0 {
            Self(0)
        } else {
            self
        }
    }
}
