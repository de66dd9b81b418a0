use super::super::{Amount, Decimal};
use crate::{Error, Result};
use std::ops::Add;

// Amount + amount

impl Add<Amount> for Amount {
    type Output = Result<Amount>;

    fn add(self, other: Amount) -> Self::Output {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(Error::Overflow)
    }
}

// Decimal + decimal

impl Add<Decimal> for Decimal {
    type Output = Result<Decimal>;

    fn add(self, other: Decimal) -> Self::Output {
        self.0
            .checked_add(other.0)
            .map(Decimal)
            .ok_or(Error::Overflow)
    }
}
