use crate::coins::{Amount, Decimal};
use crate::{Error, Result};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Derives the per-block inflation award from the chain's emission
/// schedule. The mintable base compounds yearly at the inflation rate,
/// and each block mints its share of one year's inflation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAwardCalculator {
    /// First-year mintable base, in the smallest token unit.
    pub basic_mintable: Amount,
    pub inflation_rate: Decimal,
    pub yearly_block_count: u64,
}

impl Default for BlockAwardCalculator {
    fn default() -> Self {
        BlockAwardCalculator {
            basic_mintable: Amount::new(1_000_000_000_000_000_000_000_000_000),
            inflation_rate: dec!(0.08).into(),
            yearly_block_count: 365 * 24 * 3600 / 10,
        }
    }
}

impl BlockAwardCalculator {
    pub fn mintable_amount(&self, height: u64) -> Result<Amount> {
        if self.yearly_block_count == 0 {
            return Err(Error::DivideByZero);
        }

        let year = height / self.yearly_block_count;
        let growth = (Decimal::one() + self.inflation_rate)?
            .powu(year)?
            .round_dp(2);

        (growth * self.basic_mintable)?.amount()
    }

    pub fn block_award(&self, height: u64) -> Result<Amount> {
        let yearly_inflation = (self.mintable_amount(height)? * self.inflation_rate)?;

        (yearly_inflation / Decimal::from(self.yearly_block_count))?.amount()
    }

    /// Block award plus the block's accumulated transaction fees: the
    /// full pool handed to the distributor.
    pub fn block_award_with_fees(&self, height: u64, fees: Amount) -> Result<Amount> {
        self.block_award(height)? + fees
    }
}
