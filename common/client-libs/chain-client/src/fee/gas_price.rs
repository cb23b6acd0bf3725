// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::coin::Coin;
use crate::error::ChainClientError;
use cosmrs::{Denom, Gas};
use cosmwasm_std::{Decimal, Uint128};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// A gas price, i.e. the price of a single unit of gas. This is typically a fraction of
/// the smallest fee token unit, such as 0.025untrn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPrice {
    pub amount: Decimal,
    pub denom: String,
}

impl Mul<Gas> for &GasPrice {
    type Output = Coin;

    fn mul(self, gas_limit: Gas) -> Self::Output {
        // the same rounding cosmjs applies in `calculateFee`
        let amount = Uint128::from(gas_limit).mul_ceil(self.amount);
        Coin::new(amount.u128(), &self.denom)
    }
}

impl FromStr for GasPrice {
    type Err = ChainClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        let denom_start = raw
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(|| ChainClientError::malformed_gas_price(s))?;

        let (amount, denom) = raw.split_at(denom_start);
        if amount.is_empty() {
            return Err(ChainClientError::malformed_gas_price(s));
        }

        let amount = Decimal::from_str(amount).map_err(|_| ChainClientError::malformed_gas_price(s))?;
        let denom = Denom::from_str(denom).map_err(|_| ChainClientError::malformed_gas_price(s))?;

        Ok(GasPrice {
            amount,
            denom: denom.to_string(),
        })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
