use super::super::{Amount, Decimal};
use crate::{Error, Result};
use std::ops::Sub;

// Amount - amount

impl Sub<Amount> for Amount {
    type Output = Result<Amount>;

    fn sub(self, other: Amount) -> Self::Output {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(Error::Overflow)
    }
}

// Decimal - decimal

impl Sub<Decimal> for Decimal {
    type Output = Result<Decimal>;

    fn sub(self, other: Decimal) -> Self::Output {
        self.0
            .checked_sub(other.0)
            .map(Decimal)
            .ok_or(Error::Overflow)
    }
}
