// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::types::{Metadata, TokenId};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

#[cw_serde]
pub struct InstantiateMsg {
    pub minter: String,
    pub name: String,
    pub symbol: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint a new token owned by `owner`. Only the minter may call it.
    Mint {
        token_id: TokenId,
        extension: Metadata,
        owner: String,
    },

    /// Transfer the token to a contract and trigger its `receive_nft` hook with `msg`.
    SendNft {
        contract: String,
        msg: Binary,
        token_id: TokenId,
    },

    /// Plain ownership transfer, without any receiver hook.
    TransferNft { recipient: String, token_id: TokenId },

    Burn { token_id: TokenId },
}

#[cw_serde]
pub enum QueryMsg {
    /// Returns all tokens owned by the given address
    Tokens {
        owner: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_after: Option<TokenId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
}

impl QueryMsg {
    pub fn tokens<S: Into<String>>(owner: S) -> Self {
        QueryMsg::Tokens {
            owner: owner.into(),
            start_after: None,
            limit: None,
        }
    }
}
