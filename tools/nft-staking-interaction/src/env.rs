// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod vars {
    pub const RPC_ENDPOINT: &str = "NFT_STAKING_RPC_ENDPOINT";
    pub const BECH32_PREFIX: &str = "NFT_STAKING_BECH32_PREFIX";
    pub const GAS_PRICE: &str = "NFT_STAKING_GAS_PRICE";
    pub const WASM_PATH: &str = "NFT_STAKING_WASM_PATH";
    pub const NFT_CODE_ID: &str = "NFT_STAKING_NFT_CODE_ID";
    pub const MNEMONIC: &str = "NFT_STAKING_MNEMONIC";
    pub const CONFIG_PATH: &str = "NFT_STAKING_CONFIG";
}
