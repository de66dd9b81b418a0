use serde::{Deserialize, Serialize};

/// An integer quantity of coins, denominated in the smallest token unit.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub(crate) u128);

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Eq for Amount {}

impl Amount {
    pub fn new(value: u128) -> Self {
        Amount(value)
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount::new(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::new(value.into())
    }
}

impl<I: Into<Amount> + Copy> PartialEq<I> for Amount {
    fn eq(&self, other: &I) -> bool {
        self.0 == (*other).into().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};

    #[test]
    fn ops() -> Result<()> {
        let v = Amount::new(2);
        let w = Amount::new(3);

        assert_eq!((v + w)?, 5u128);
        assert_eq!((w - v)?, 1u128);

        let quotient = (v / Amount::new(8))?;
        assert_eq!(format!("{}", quotient), "0.25");

        Ok(())
    }

    #[test]
    fn checked() {
        let max = Amount::new(u128::MAX);
        assert!(matches!((max + Amount::new(1)).unwrap_err(), Error::Overflow));
        assert!(matches!(
            (Amount::new(1) - Amount::new(2)).unwrap_err(),
            Error::Overflow
        ));
        assert!(matches!(
            (Amount::new(1) / Amount::new(0)).unwrap_err(),
            Error::DivideByZero
        ));
    }
}
