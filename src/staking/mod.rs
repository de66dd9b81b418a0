use crate::coins::{Address, Amount, Decimal};
use crate::{Error, Result};
use log::{debug, info};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub mod delegator;
pub mod inflation;
pub mod power;
pub mod validator;

pub use delegator::Delegation;
pub use inflation::BlockAwardCalculator;


/// Global staking parameters. Defaults mirror the chain's genesis values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Maximum size of the validator tier; members ranked beyond it are
    /// backup validators.
    pub max_validator_count: u64,
    /// Share of the block award paid to the validator tier when a funded
    /// backup tier exists. Backups receive the remainder.
    pub validator_award_ratio: Decimal,
    /// Largest share of total network stake a member may hold before its
    /// voting power is dampened. Also the per-member cap in the first
    /// allocation round.
    pub size_threshold: Decimal,
    /// Stakes below this many whole tokens earn no voting power.
    pub min_staking_tokens: u64,
    /// Smallest-unit denomination of one whole token.
    pub unit_per_token: Amount,
    /// Elapsed time units since declaration. The node has only ever been
    /// observed with a constant 1 here; kept configurable until the live
    /// system confirms how it varies.
    pub timing_units: u64,
    /// Reference small and large stake amounts for the voting-power
    /// concentration term. Equal references neutralize the term.
    pub ref_small_stake: Amount,
    pub ref_large_stake: Amount,
    /// Whether backup validators' delegators share in block awards.
    pub backup_delegators_participate: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            max_validator_count: 4,
            validator_award_ratio: dec!(0.9).into(),
            size_threshold: dec!(0.12).into(),
            min_staking_tokens: 1000,
            unit_per_token: Amount::new(1_000_000_000_000_000_000),
            timing_units: 1,
            ref_small_stake: Amount::new(1),
            ref_large_stake: Amount::new(1),
            backup_delegators_participate: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    Validator,
    BackupValidator,
    Candidate,
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryState::Validator => write!(f, "Validator"),
            EntryState::BackupValidator => write!(f, "Backup Validator"),
            EntryState::Candidate => write!(f, "Candidate"),
        }
    }
}

/// A stake-holding member of the candidate set, created when an account
/// declares candidacy. `shares` is the sum of all delegations to the
/// member, in the smallest token unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeEntry {
    pub owner: Address,
    pub shares: Amount,
    pub state: EntryState,
    pub comp_rate: Decimal,
    pub num_delegators: u64,
}

/// Derived consensus weight for one member, recomputed every block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingPowerResult {
    pub subject: Address,
    pub power: u64,
}

/// One tier member's take of the block award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardRecord {
    pub owner: Address,
    pub state: EntryState,
    pub amount: Amount,
}

/// The outcome of distributing one block's award.
///
/// `dust` is the part of the award pool that no ledger record received
/// because of floor rounding: the tier rounds' residue plus, for every
/// validator fanned out to its delegators, the gap between its tier
/// increment and the sum of its delegators' gains. The credited amounts
/// plus `dust` always equal the award pool exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub voting_powers: Vec<VotingPowerResult>,
    pub awards: Vec<AwardRecord>,
    pub dust: Amount,
}

/// Distributes one block's award over a validator-set snapshot.
///
/// Stateless apart from its parameters; the same pre-state and award
/// pool always produce the same post-state.
#[derive(Debug, Clone)]
pub struct AwardDistributor {
    params: Params,
}

impl AwardDistributor {
    pub fn new(params: Params) -> Result<Self> {
        if params.validator_award_ratio < Decimal::zero()
            || params.validator_award_ratio > Decimal::one()
        {
            return Err(Error::Coins(
                "Validator award ratio must be within [0, 1]".into(),
            ));
        }
        if params.size_threshold <= Decimal::zero() || params.size_threshold > Decimal::one() {
            return Err(Error::Coins("Size threshold must be within (0, 1]".into()));
        }
        if params.unit_per_token == Amount::new(0) {
            return Err(Error::Coins("Token unit must be nonzero".into()));
        }
        if params.ref_large_stake == Amount::new(0) {
            return Err(Error::Coins("Reference large stake must be nonzero".into()));
        }

        Ok(AwardDistributor { params })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Distributes `award_pool` over `entries` and their `delegations`
    /// for one committed block.
    ///
    /// Entries must already be classified into tiers; candidates belong
    /// to neither tier and receive nothing. Validator shares and
    /// delegation award amounts are mutated in place.
    pub fn distribute(
        &self,
        award_pool: Amount,
        entries: &mut [StakeEntry],
        delegations: &mut [Delegation],
    ) -> Result<Distribution> {
        self.check_preconditions(entries, delegations)?;

        let mut total_stake = Amount::new(0);
        for entry in entries.iter() {
            total_stake = (total_stake + entry.shares)?;
        }

        let voting_powers = self.voting_powers(entries, delegations, total_stake)?;

        let validator_idx: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.state == EntryState::Validator)
            .map(|(i, _)| i)
            .collect();
        let backup_idx: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.state == EntryState::BackupValidator)
            .map(|(i, _)| i)
            .collect();

        let mut backup_stake = Amount::new(0);
        for i in &backup_idx {
            backup_stake = (backup_stake + entries[*i].shares)?;
        }

        // The award is only split when the member count exceeds the
        // validator tier size and the backup tier actually holds stake.
        let split = entries.len() as u64 > self.params.max_validator_count
            && backup_stake > Amount::new(0);
        let (validator_pool, backup_pool) = if split {
            let validator_pool = (award_pool * self.params.validator_award_ratio)?.amount()?;
            let backup_pool = (award_pool - validator_pool)?;
            (validator_pool, backup_pool)
        } else {
            (award_pool, Amount::new(0))
        };
        info!(
            "distributing block award: pool={} validator_pool={} backup_pool={}",
            award_pool, validator_pool, backup_pool
        );

        let mut awards = Vec::new();
        let mut dust = self.allocate_tier(
            validator_pool,
            &validator_idx,
            true,
            entries,
            delegations,
            &mut awards,
        )?;
        if !backup_idx.is_empty() && backup_pool > Amount::new(0) {
            let backup_dust = self.allocate_tier(
                backup_pool,
                &backup_idx,
                self.params.backup_delegators_participate,
                entries,
                delegations,
                &mut awards,
            )?;
            dust = (dust + backup_dust)?;
        }

        Ok(Distribution {
            voting_powers,
            awards,
            dust,
        })
    }

    /// Validates everything the allocators assume, before any state is
    /// mutated.
    fn check_preconditions(
        &self,
        entries: &[StakeEntry],
        delegations: &[Delegation],
    ) -> Result<()> {
        for entry in entries {
            if entry.comp_rate < Decimal::zero() || entry.comp_rate > Decimal::one() {
                return Err(Error::Coins(format!(
                    "Commission rate out of range for {}",
                    hex::encode(entry.owner)
                )));
            }

            let fans_out = match entry.state {
                EntryState::Validator => true,
                EntryState::BackupValidator => self.params.backup_delegators_participate,
                EntryState::Candidate => false,
            };
            if !fans_out {
                continue;
            }

            let mut found_any = false;
            let mut found_self = false;
            for delegation in delegations.iter().filter(|d| d.validator == entry.owner) {
                found_any = true;
                delegation.shares()?;
                if delegation.delegator == entry.owner {
                    found_self = true;
                }
            }
            if found_any && !found_self {
                return Err(Error::Coins(format!(
                    "Validator {} has no self-delegation",
                    hex::encode(entry.owner)
                )));
            }
        }

        Ok(())
    }

    fn voting_powers(
        &self,
        entries: &[StakeEntry],
        delegations: &[Delegation],
        total_stake: Amount,
    ) -> Result<Vec<VotingPowerResult>> {
        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let factor = power::size_factor(&self.params, entry.shares, total_stake)?;

            // A member's power is the sum of its delegations' powers;
            // members with no delegation records on hand are treated as
            // a single stake.
            let mut sum: u64 = 0;
            let mut found = false;
            for delegation in delegations.iter().filter(|d| d.validator == entry.owner) {
                found = true;
                let power = power::voting_power(
                    &self.params,
                    entry.num_delegators,
                    delegation.shares()?,
                    factor,
                )?;
                sum = sum.checked_add(power).ok_or(Error::Overflow)?;
            }
            let power = if found {
                sum
            } else {
                power::voting_power(&self.params, entry.num_delegators, entry.shares, factor)?
            };

            results.push(VotingPowerResult {
                subject: entry.owner,
                power,
            });
        }

        Ok(results)
    }

    /// Runs the two-round allocation over one tier, credits each member's
    /// increment to its entry, and fans validators' increments out to
    /// their delegators. Returns the dust produced by this tier.
    fn allocate_tier(
        &self,
        pool: Amount,
        member_idx: &[usize],
        fan_out: bool,
        entries: &mut [StakeEntry],
        delegations: &mut [Delegation],
        awards: &mut Vec<AwardRecord>,
    ) -> Result<Amount> {
        let shares: Vec<Amount> = member_idx.iter().map(|i| entries[*i].shares).collect();
        let increments = validator::share_increments(pool, &shares, self.params.size_threshold)?;

        let mut credited = Amount::new(0);
        for (pos, i) in member_idx.iter().enumerate() {
            let entry = &mut entries[*i];
            entry.shares = (entry.shares + increments[pos])?;
            credited = (credited + increments[pos])?;
            debug!(
                "awarded {} ({}): {}",
                hex::encode(entry.owner),
                entry.state,
                increments[pos]
            );
            awards.push(AwardRecord {
                owner: entry.owner,
                state: entry.state,
                amount: increments[pos],
            });
        }
        // Rounded-up percentages can make the tier overshoot the pool by
        // a few smallest units; dust never goes negative.
        let mut dust = if credited > pool {
            Amount::new(0)
        } else {
            (pool - credited)?
        };

        if !fan_out {
            return Ok(dust);
        }

        for (pos, i) in member_idx.iter().enumerate() {
            let entry = &entries[*i];
            let award = increments[pos];
            if award == Amount::new(0) {
                continue;
            }

            let del_idx: Vec<usize> = delegations
                .iter()
                .enumerate()
                .filter(|(_, d)| d.validator == entry.owner)
                .map(|(j, _)| j)
                .collect();
            if del_idx.is_empty() {
                continue;
            }

            let mut del_shares = Vec::with_capacity(del_idx.len());
            for j in &del_idx {
                del_shares.push(delegations[*j].shares()?);
            }
            let self_pos = del_idx
                .iter()
                .position(|j| delegations[*j].delegator == entry.owner)
                .ok_or_else(|| Error::Coins("Validator has no self-delegation".into()))?;

            let gains = delegator::allocate(award, entry.comp_rate, &del_shares, self_pos)?;

            let mut fanned = Amount::new(0);
            for (k, j) in del_idx.iter().enumerate() {
                delegations[*j].add_award(gains[k])?;
                fanned = (fanned + gains[k])?;
            }
            if fanned < award {
                dust = (dust + (award - fanned)?)?;
            }
        }

        Ok(dust)
    }
}
