// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
mod helpers;
pub mod report;
pub mod scenario;

pub use crate::error::InteractionError;
pub use crate::report::{ScenarioReport, Step};
pub use crate::scenario::{InteractionClient, Scenario, ScenarioParams, StakingCode};
