// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;

/// Position of a stake record within the list kept for its owner.
pub type StakeIndex = u64;

/// Length of the unbonding period started by `unstake`: 14 days.
pub const UNBONDING_PERIOD_SECS: u64 = 14 * 24 * 60 * 60;

#[cw_serde]
pub struct Staking {
    pub nft_addr: String,
    pub token_id: String,
    pub sender: String,
    pub start_timestamp: Timestamp,

    /// Zero while the token is staked, otherwise the time at which unbonding finishes.
    pub end_timestamp: Timestamp,
    pub is_burned_by_admin: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StakingStatus {
    Staked,
    Unbonding { finishes_at: Timestamp },
    BurnedByAdmin,
}

impl Staking {
    pub fn status(&self) -> StakingStatus {
        if self.is_burned_by_admin {
            StakingStatus::BurnedByAdmin
        } else if self.end_timestamp == Timestamp::from_nanos(0) {
            StakingStatus::Staked
        } else {
            StakingStatus::Unbonding {
                finishes_at: self.end_timestamp,
            }
        }
    }

    pub fn is_claimable_at(&self, now: Timestamp) -> bool {
        match self.status() {
            StakingStatus::Unbonding { finishes_at } => finishes_at <= now,
            _ => false,
        }
    }
}
