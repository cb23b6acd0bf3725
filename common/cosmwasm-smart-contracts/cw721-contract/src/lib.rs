// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod msg;
pub mod types;

pub use msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
pub use types::*;

pub use cosmwasm_std::Binary;
