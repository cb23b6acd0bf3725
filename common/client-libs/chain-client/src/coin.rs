// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::ChainClientError;
use cosmrs::Coin as CosmosCoin;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coin {
    pub amount: u128,
    pub denom: String,
}

impl Coin {
    pub fn new<S: Into<String>>(amount: u128, denom: S) -> Self {
        Coin {
            amount,
            denom: denom.into(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl TryFrom<Coin> for CosmosCoin {
    type Error = ChainClientError;

    fn try_from(coin: Coin) -> Result<Self, Self::Error> {
        CosmosCoin::new(coin.amount, &coin.denom).map_err(|_| ChainClientError::MalformedCoin {
            coin_representation: coin.to_string(),
        })
    }
}

impl From<CosmosCoin> for Coin {
    fn from(coin: CosmosCoin) -> Self {
        Coin {
            amount: coin.amount,
            denom: coin.denom.to_string(),
        }
    }
}

pub(crate) fn to_cosmos_coins(coins: Vec<Coin>) -> Result<Vec<CosmosCoin>, ChainClientError> {
    coins.into_iter().map(TryInto::try_into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converting_to_cosmos_coin() {
        let coin = Coin::new(1234, "untrn");
        let cosmos: CosmosCoin = coin.clone().try_into().unwrap();
        assert_eq!(cosmos.amount, 1234);
        assert_eq!(cosmos.denom.to_string(), "untrn");
        assert_eq!(Coin::from(cosmos), coin);
    }
}
