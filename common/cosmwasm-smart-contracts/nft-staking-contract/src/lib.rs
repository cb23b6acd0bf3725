// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod events;
pub mod msg;
pub mod response;
pub mod types;

// Re-export all types at the top-level
pub use msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
pub use response::*;
pub use types::*;

pub use cosmwasm_std::{Addr, Timestamp};
