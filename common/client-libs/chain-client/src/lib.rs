// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::direct_wallet::DirectSecp256k1HdWallet;
use tendermint_rpc::HttpClient;

pub mod client;
pub mod coin;
pub mod contract_traits;
pub mod cosmwasm_client;
pub mod error;
pub mod fee;
pub mod signing;

pub use crate::client::{ChainClient, Config};
pub use crate::coin::Coin;
pub use crate::cosmwasm_client::{CosmWasmClient, SigningCosmWasmClient};
pub use crate::error::ChainClientError;
pub use crate::fee::{gas_price::GasPrice, Fee, GasAdjustable, GasAdjustment};
pub use cosmrs::{
    tendermint::{
        abci::{Event, EventAttribute},
        block::Height,
        Hash,
    },
    AccountId, Gas,
};

pub type DirectSigningHttpRpcChainClient = ChainClient<HttpClient, DirectSecp256k1HdWallet>;
