use super::super::{Amount, Decimal};
use crate::{Error, Result};
use std::convert::TryInto;
use std::ops::Div;

// Amount / amount

impl Div<Amount> for Amount {
    type Output = Result<Decimal>;

    fn div(self, other: Amount) -> Self::Output {
        let self_decimal: Decimal = self.try_into()?;
        let other_decimal: Decimal = other.try_into()?;

        self_decimal / other_decimal
    }
}

// Decimal / decimal

impl Div<Decimal> for Decimal {
    type Output = Result<Decimal>;

    fn div(self, other: Decimal) -> Self::Output {
        self.0
            .checked_div(other.0)
            .map(Decimal)
            .ok_or(Error::DivideByZero)
    }
}
