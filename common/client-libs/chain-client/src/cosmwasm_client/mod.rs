// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod helpers;
pub mod logs;
pub mod query_client;
pub mod signing_client;
pub mod types;

pub use query_client::CosmWasmClient;
pub use signing_client::SigningCosmWasmClient;
