// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmrs::tx;
use cosmrs::Gas;

pub mod gas_price;

pub type GasAdjustment = f32;

pub const DEFAULT_SIMULATED_GAS_MULTIPLIER: GasAdjustment = 1.5;

pub trait GasAdjustable {
    fn adjust_gas(&self, adjustment: GasAdjustment) -> Self;
}

impl GasAdjustable for Gas {
    fn adjust_gas(&self, adjustment: GasAdjustment) -> Self {
        if adjustment == 1.0 {
            *self
        } else {
            let adjusted = (*self as f64 * adjustment as f64).ceil();
            adjusted as Gas
        }
    }
}

/// How the fee of a transaction should be determined.
#[derive(Debug, Clone, PartialEq)]
pub enum Fee {
    /// Use exactly the provided fee.
    Manual(tx::Fee),

    /// Simulate the transaction and derive the fee from the used gas, the configured gas price
    /// and the (optional) gas multiplier. If the multiplier is not provided,
    /// the client default is used.
    Auto(Option<GasAdjustment>),
}

impl Fee {
    pub fn new_auto(multiplier: Option<GasAdjustment>) -> Self {
        Fee::Auto(multiplier)
    }
}

impl From<tx::Fee> for Fee {
    fn from(fee: tx::Fee) -> Self {
        Fee::Manual(fee)
    }
}

impl From<GasAdjustment> for Fee {
    fn from(multiplier: GasAdjustment) -> Self {
        Fee::Auto(Some(multiplier))
    }
}

impl Default for Fee {
    fn default() -> Self {
        Fee::Auto(Some(DEFAULT_SIMULATED_GAS_MULTIPLIER))
    }
}
