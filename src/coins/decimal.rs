use super::Amount;
use crate::{Error, Result};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal as NumDecimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A fixed-precision decimal number.
///
/// All fractional arithmetic in the allocators goes through this type
/// rather than binary floating point, so that rounding is identical on
/// every node.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Decimal(pub(crate) NumDecimal);

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal(NumDecimal::ZERO)
    }

    pub fn one() -> Self {
        Decimal(NumDecimal::ONE)
    }

    /// Truncates to an integer [Amount]. Awards always round down, so the
    /// fractional part is dropped, never rounded up.
    pub fn amount(&self) -> Result<Amount> {
        if self.0.is_sign_negative() {
            Err(Error::Coins("Amounts may not be negative".into()))
        } else {
            match self.0.floor().to_u128() {
                Some(value) => Ok(value.into()),
                None => Err(Error::Overflow),
            }
        }
    }

    pub fn floor(&self) -> Self {
        Decimal(self.0.floor())
    }

    pub fn ceil(&self) -> Self {
        Decimal(self.0.ceil())
    }

    /// Rounds to `dp` decimal places, midpoints away from zero. The
    /// reference implementation rounds proportions the same way before
    /// multiplying them back into the award pool.
    pub fn round_dp(&self, dp: u32) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Base-2 logarithm, defined for positive values only.
    pub fn log2(&self) -> Result<Self> {
        let ln = self
            .0
            .checked_ln()
            .ok_or_else(|| Error::Coins("Logarithm of a non-positive number".into()))?;
        let ln2 = NumDecimal::TWO.checked_ln().ok_or(Error::Unknown)?;
        ln.checked_div(ln2)
            .map(Decimal)
            .ok_or(Error::DivideByZero)
    }

    pub fn powu(&self, exp: u64) -> Result<Self> {
        self.0.checked_powu(exp).map(Decimal).ok_or(Error::Overflow)
    }

    pub fn to_u64(&self) -> Result<u64> {
        self.0.to_u64().ok_or(Error::Overflow)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(value.into())
    }
}

impl From<NumDecimal> for Decimal {
    fn from(value: NumDecimal) -> Self {
        Decimal(value)
    }
}

impl TryFrom<Amount> for Decimal {
    type Error = Error;

    fn try_from(amount: Amount) -> Result<Self> {
        NumDecimal::from_u128(amount.0)
            .map(Decimal)
            .ok_or(Error::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format() {
        let formatted: Decimal = rust_decimal_macros::dec!(1.23).into();
        assert_eq!(format!("{}", formatted), "1.23");
    }

    #[test]
    fn log2_of_two_is_one() -> Result<()> {
        let two: Decimal = 2.into();
        assert_eq!(two.log2()?.round_dp(12), Decimal::one());
        Ok(())
    }

    #[test]
    fn amount_truncates() -> Result<()> {
        let value: Decimal = rust_decimal_macros::dec!(12.9).into();
        assert_eq!(value.amount()?, 12u128);
        Ok(())
    }

    #[test]
    fn amount_rejects_negative() {
        let value: Decimal = rust_decimal_macros::dec!(-1.5).into();
        assert!(value.amount().is_err());
    }
}
