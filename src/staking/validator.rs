use super::StakeEntry;
use crate::coins::{Amount, Decimal};
use crate::Result;
use log::debug;

/// Two-round capped proportional distribution of a tier's award pool.
///
/// Round one pays each member its stake share, capped at `cap`, so no
/// single member can absorb the whole pool at once. The undistributed
/// remainder is paid in a second round by uncapped share, so nothing is
/// lost to capping. Members' shares are credited in place; the returned
/// vector holds each member's total increment.
pub fn allocate(
    award_pool: Amount,
    members: &mut [StakeEntry],
    cap: Decimal,
) -> Result<Vec<Amount>> {
    let shares: Vec<Amount> = members.iter().map(|member| member.shares).collect();
    let increments = share_increments(award_pool, &shares, cap)?;

    for (member, increment) in members.iter_mut().zip(increments.iter()) {
        member.shares = (member.shares + *increment)?;
    }

    Ok(increments)
}

pub(crate) fn share_increments(
    award_pool: Amount,
    shares: &[Amount],
    cap: Decimal,
) -> Result<Vec<Amount>> {
    let mut increments = vec![Amount::new(0); shares.len()];

    let mut total = Amount::new(0);
    for share in shares {
        total = (total + *share)?;
    }
    if total == Amount::new(0) {
        return Ok(increments);
    }

    let mut raw = Vec::with_capacity(shares.len());
    let mut capped = Vec::with_capacity(shares.len());
    for share in shares {
        let percentage = (*share / total)?.round_dp(12);
        capped.push(if percentage > cap { cap } else { percentage });
        raw.push(percentage);
    }

    let mut round1 = Vec::with_capacity(shares.len());
    let mut distributed = Amount::new(0);
    for percentage in &capped {
        let amount = (award_pool * *percentage)?.amount()?;
        distributed = (distributed + amount)?;
        round1.push(amount);
    }

    // Rounded percentages can sum to a hair over 1, in which case round
    // one already exhausted the pool.
    let leftover = if distributed > award_pool {
        Amount::new(0)
    } else {
        (award_pool - distributed)?
    };
    for (i, percentage) in raw.iter().enumerate() {
        let amount = (leftover * *percentage)?.amount()?;
        increments[i] = (round1[i] + amount)?;
    }
    debug!(
        "tier allocation: pool={} round1={:?} leftover={}",
        award_pool, round1, leftover
    );

    Ok(increments)
}
