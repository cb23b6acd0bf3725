// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::types::{StakeIndex, Staking};
use cosmwasm_schema::cw_serde;

#[cw_serde]
pub struct WhitelistedNftAddressesResponse {
    pub nft_addrs: Vec<String>,
}

impl WhitelistedNftAddressesResponse {
    pub fn contains(&self, nft_addr: &str) -> bool {
        self.nft_addrs.iter().any(|addr| addr == nft_addr)
    }
}

#[cw_serde]
pub struct AdminAddressResponse {
    pub admin: String,
}

#[cw_serde]
pub struct StakingsResponse {
    pub stakings: Vec<Staking>,
}

impl StakingsResponse {
    /// Returns the stake index assigned to the (most recent) record of the given token.
    pub fn index_of(&self, token_id: &str) -> Option<StakeIndex> {
        self.stakings
            .iter()
            .rposition(|staking| staking.token_id == token_id)
            .map(|position| position as StakeIndex)
    }

    pub fn get(&self, index: StakeIndex) -> Option<&Staking> {
        self.stakings.get(usize::try_from(index).ok()?)
    }
}
