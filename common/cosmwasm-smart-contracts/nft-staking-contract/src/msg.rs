// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::types::StakeIndex;
use cosmwasm_schema::cw_serde;
use cw721_contract_common::Cw721ReceiveMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address if not provided or invalid.
    pub admin: Option<String>,

    /// The initial (and only, until extended) whitelisted NFT collection.
    pub nft_addr: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Hook invoked by a whitelisted NFT contract as a result of `send_nft`. Starts staking.
    ReceiveNft(Cw721ReceiveMsg),

    /// Begin unbonding of the stake record at the given index
    Unstake { index: StakeIndex },

    /// Return the token of a fully unbonded stake record to its owner
    Claim { index: StakeIndex },

    /// Burn the staked token. Admin only.
    AdminBurn { index: StakeIndex },

    /// Whitelist another NFT collection. Admin only.
    AddCollection { nft_addr: String },

    /// Remove an NFT collection from the whitelist. Admin only.
    RemoveCollection { nft_addr: String },
}

impl ExecuteMsg {
    pub fn name(&self) -> &'static str {
        match self {
            ExecuteMsg::ReceiveNft(_) => "receive_nft",
            ExecuteMsg::Unstake { .. } => "unstake",
            ExecuteMsg::Claim { .. } => "claim",
            ExecuteMsg::AdminBurn { .. } => "admin_burn",
            ExecuteMsg::AddCollection { .. } => "add_collection",
            ExecuteMsg::RemoveCollection { .. } => "remove_collection",
        }
    }
}

#[cw_serde]
pub enum QueryMsg {
    WhitelistedNftAddresses {},
    AdminAddress {},
    StakingsByAddress { address: String },
}
