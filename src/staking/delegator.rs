use crate::coins::{Address, Amount, Decimal};
use crate::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// A delegator's position with one validator. Block awards accrue to
/// `award_amount`; the remaining fields are mutated by the surrounding
/// system's delegate, withdraw, and slash handlers.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: Address,
    pub validator: Address,
    pub delegate_amount: Amount,
    pub award_amount: Amount,
    pub withdraw_amount: Amount,
    pub pending_withdraw_amount: Amount,
    pub slash_amount: Amount,
}

impl Delegation {
    pub fn new(delegator: Address, validator: Address, delegate_amount: Amount) -> Self {
        Delegation {
            delegator,
            validator,
            delegate_amount,
            ..Default::default()
        }
    }

    /// Effective shares: delegated plus awarded, minus everything
    /// withdrawn or slashed. Negative shares mean the record is
    /// inconsistent.
    pub fn shares(&self) -> Result<Amount> {
        let credit = (self.delegate_amount + self.award_amount)?;
        let debit =
            ((self.withdraw_amount + self.pending_withdraw_amount)? + self.slash_amount)?;
        if debit > credit {
            return Err(Error::Coins(
                "Delegation shares may not be negative".into(),
            ));
        }

        credit - debit
    }

    pub fn add_award(&mut self, amount: Amount) -> Result<()> {
        self.award_amount = (self.award_amount + amount)?;

        Ok(())
    }
}

/// Splits one validator's block award into its commission and its
/// delegators' pro-rata gains.
///
/// The validator's own self-delegation takes part in the proportional
/// split like any other delegator, then additionally receives the full
/// commission. Gains are truncated, so their sum may fall short of the
/// award by up to one smallest unit per delegator; the caller accounts
/// that residue as dust.
pub fn allocate(
    validator_award: Amount,
    comp_rate: Decimal,
    delegator_shares: &[Amount],
    self_index: usize,
) -> Result<Vec<Amount>> {
    if comp_rate < Decimal::zero() || comp_rate > Decimal::one() {
        return Err(Error::Coins(
            "Commission rate must be within [0, 1]".into(),
        ));
    }
    if delegator_shares.is_empty() {
        return Err(Error::Coins("Delegator set may not be empty".into()));
    }
    if self_index >= delegator_shares.len() {
        return Err(Error::Coins(
            "Self-delegation index out of bounds".into(),
        ));
    }

    let commission = (validator_award * comp_rate)?.amount()?;
    let pool = (validator_award - commission)?;
    debug!(
        "delegator allocation: award={} commission={} pool={}",
        validator_award, commission, pool
    );

    let mut total = Amount::new(0);
    for share in delegator_shares {
        total = (total + *share)?;
    }

    let mut gains = vec![Amount::new(0); delegator_shares.len()];
    if total > Amount::new(0) {
        for (i, share) in delegator_shares.iter().enumerate() {
            let percentage = (*share / total)?.round_dp(12);
            gains[i] = (pool * percentage)?.amount()?;
        }
    }
    gains[self_index] = (gains[self_index] + commission)?;

    Ok(gains)
}
