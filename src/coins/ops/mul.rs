use super::super::{Amount, Decimal};
use crate::{Error, Result};
use std::convert::TryInto;
use std::ops::Mul;

// Amount * decimal

impl Mul<Decimal> for Amount {
    type Output = Result<Decimal>;

    fn mul(self, other: Decimal) -> Self::Output {
        let self_decimal: Decimal = self.try_into()?;

        self_decimal
            .0
            .checked_mul(other.0)
            .map(Decimal)
            .ok_or(Error::Overflow)
    }
}

// Decimal * decimal

impl Mul<Decimal> for Decimal {
    type Output = Result<Decimal>;

    fn mul(self, other: Decimal) -> Self::Output {
        self.0
            .checked_mul(other.0)
            .map(Decimal)
            .ok_or(Error::Overflow)
    }
}

// Decimal * amount

impl Mul<Amount> for Decimal {
    type Output = Result<Decimal>;

    fn mul(self, other: Amount) -> Self::Output {
        other * self
    }
}
