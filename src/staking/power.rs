use super::Params;
use crate::coins::{Amount, Decimal};
use crate::{Error, Result};
use log::debug;

/// Dampening multiplier applied to a member's raw stake when its share
/// of total network stake exceeds the configured threshold.
pub fn size_factor(params: &Params, stake: Amount, total_stake: Amount) -> Result<Decimal> {
    if total_stake == Amount::new(0) {
        return Ok(Decimal::one());
    }

    let share = (stake / total_stake)?;
    if share > params.size_threshold {
        params.size_threshold / share
    } else {
        Ok(Decimal::one())
    }
}

/// Computes the integer voting power of a single delegation.
///
/// `delegator_count` is the number of distinct delegators on the
/// delegation's validator, `stake` is the delegation's shares in the
/// smallest token unit, and `size_factor` comes from [size_factor].
/// Stakes below the minimum staking amount earn no power at all, which
/// keeps dust delegations out of consensus weight.
pub fn voting_power(
    params: &Params,
    delegator_count: u64,
    stake: Amount,
    size_factor: Decimal,
) -> Result<u64> {
    let tokens = (stake / params.unit_per_token)?;
    if tokens.floor() < Decimal::from(params.min_staking_tokens) {
        return Ok(0);
    }

    let one = Decimal::one();

    // Squared ratio of the reference small stake to the reference large
    // stake; equal references make this 1.
    let ratio = (params.ref_small_stake / params.ref_large_stake)?;
    let concentration = (ratio * ratio)?;

    // (t/180 + 1), rounded to two places before taking the logarithm.
    let elapsed = Decimal::from(params.timing_units);
    let timing = ((elapsed / Decimal::from(180u64))? + one)?.round_dp(2);

    // (1 - 1/(4n + 1))^2, saturating toward 1 as the delegator base
    // broadens.
    let spread = delegator_count
        .checked_mul(4)
        .and_then(|n| n.checked_add(1))
        .ok_or(Error::Overflow)?;
    let diversification = (one - (one / Decimal::from(spread))?)?;
    let diversification = (diversification * diversification)?;

    let raw_stake = (tokens * size_factor)?.floor();

    let scaled = ((concentration * diversification)? * raw_stake)?;
    let power = (timing.log2()? * scaled)?.ceil().to_u64()?;
    debug!(
        "voting power: delegators={} stake={} factor={} power={}",
        delegator_count, stake, size_factor, power
    );

    Ok(power)
}
