// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cli::ConfigOverridableArgs;
use crate::config::Config;

pub trait ConfigOverride {
    fn override_config(self, config: &mut Config);
}

impl ConfigOverride for ConfigOverridableArgs {
    fn override_config(self, config: &mut Config) {
        if let Some(rpc_endpoint) = self.rpc_endpoint {
            config.network.rpc_endpoint = rpc_endpoint.to_string()
        }

        if let Some(bech32_prefix) = self.bech32_prefix {
            config.network.bech32_prefix = bech32_prefix
        }

        if let Some(gas_price) = self.gas_price {
            config.network.gas_price = gas_price
        }

        if let Some(staking_wasm_path) = self.staking_wasm_path {
            config.contracts.staking_wasm_path = staking_wasm_path
        }

        if let Some(staking_code_id) = self.staking_code_id {
            config.contracts.staking_code_id = Some(staking_code_id)
        }

        if let Some(nft_code_id) = self.nft_code_id {
            config.contracts.nft_code_id = nft_code_id
        }

        if let Some(nft_contract_address) = self.nft_contract_address {
            config.contracts.nft_contract_address = Some(nft_contract_address)
        }

        if let Some(token_id) = self.token_id {
            config.scenario.token_id = token_id
        }

        if let Some(secondary_collection) = self.secondary_collection {
            config.scenario.secondary_collection = secondary_collection
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_provided_values_are_overridden() {
        let args = ConfigOverridableArgs {
            gas_price: Some("0.1untrn".to_string()),
            staking_code_id: Some(1234),
            ..Default::default()
        };

        let config = Config::default().with_override(args);
        assert_eq!(config.network.gas_price, "0.1untrn");
        assert_eq!(config.contracts.staking_code_id, Some(1234));
        assert_eq!(config.network.bech32_prefix, "neutron");
        assert_eq!(config.contracts.nft_code_id, 3471);
        assert_eq!(config.scenario.token_id, "send_try");
    }
}
