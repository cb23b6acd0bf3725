// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

// custom contract events get the `wasm-` prefix attached by the wasm module
pub const STAKED_EVENT_TYPE: &str = "wasm-staked";
pub const UNSTAKED_EVENT_TYPE: &str = "wasm-unstaked";
pub const CLAIMED_EVENT_TYPE: &str = "wasm-Claimed";
pub const BURNED_BY_ADMIN_EVENT_TYPE: &str = "wasm-Burned By Admin";
pub const COLLECTION_ADDED_EVENT_TYPE: &str = "wasm-Collection added";
pub const COLLECTION_REMOVED_EVENT_TYPE: &str = "wasm-Collection removed";

pub const NFT_ADDRESS_KEY: &str = "nft_addr";
// the staking event is the only one spelling it out
pub const STAKED_NFT_ADDRESS_KEY: &str = "nft_address";
pub const TOKEN_ID_KEY: &str = "token_id";
pub const SENDER_KEY: &str = "sender";
pub const INDEX_KEY: &str = "index";
