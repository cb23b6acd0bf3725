// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

pub type TokenId = String;

/// Extension payload attached to every minted token.
#[cw_serde]
pub struct Metadata {
    pub name: String,
    pub description: String,
}

impl Metadata {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, description: S2) -> Self {
        Metadata {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Payload delivered to the receiving contract of a `send_nft` call.
#[cw_serde]
pub struct Cw721ReceiveMsg {
    pub sender: String,
    pub token_id: TokenId,
    pub msg: Binary,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<TokenId>,
}

impl TokensResponse {
    pub fn contains(&self, token_id: &str) -> bool {
        self.tokens.iter().any(|token| token == token_id)
    }
}
