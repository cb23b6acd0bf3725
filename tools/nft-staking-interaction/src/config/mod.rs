// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::config::r#override::ConfigOverride;
use crate::error::InteractionError;
use nft_staking_chain_client::cosmwasm_client::types::ContractCodeId;
use nft_staking_chain_client::{AccountId, Config as ChainClientConfig, GasPrice};
use nft_staking_contract_common::StakeIndex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub mod r#override;

const DEFAULT_INTERACTION_DIR: &str = ".nft-staking";
const DEFAULT_CONFIG_FILENAME: &str = "interaction.toml";

pub const DEFAULT_RPC_ENDPOINT: &str = "https://rpc-palvus.pion-1.ntrn.tech";
pub const DEFAULT_BECH32_PREFIX: &str = "neutron";
pub const DEFAULT_GAS_PRICE: &str = "0.025untrn";
pub const DEFAULT_SIMULATED_GAS_MULTIPLIER: f32 = 1.5;
pub const DEFAULT_BROADCAST_POLLING_RATE: Duration = Duration::from_secs(4);
pub const DEFAULT_BROADCAST_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_STAKING_WASM_PATH: &str = "artifacts/nft_staking.wasm";
pub const DEFAULT_NFT_CODE_ID: ContractCodeId = 3471;

pub const DEFAULT_TOKEN_ID: &str = "send_try";
pub const DEFAULT_SECONDARY_COLLECTION: &str =
    "neutron1e7yppujrshzzsqfflu09udrje0zpd6jnfwe304wdexl7dd28gqxqv8x776";

/// Get default path to the tool's config directory.
/// It should get resolved to `$HOME/.nft-staking`
pub fn default_config_directory() -> Result<PathBuf, InteractionError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_INTERACTION_DIR))
        .ok_or(InteractionError::NoHomeDirectory)
}

/// Get default path to the tool's config file.
/// It should get resolved to `$HOME/.nft-staking/interaction.toml`
pub fn default_config_filepath() -> Result<PathBuf, InteractionError> {
    Ok(default_config_directory()?.join(DEFAULT_CONFIG_FILENAME))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub network: Network,

    #[serde(default)]
    pub contracts: Contracts,

    #[serde(default)]
    pub scenario: Scenario,
}

impl Config {
    pub fn ensure_is_valid(&self) -> Result<(), InteractionError> {
        self.network.ensure_is_valid()?;
        self.contracts.ensure_is_valid(&self.network.bech32_prefix)?;
        self.scenario.ensure_is_valid(&self.network.bech32_prefix)
    }

    pub fn r#override<O: ConfigOverride>(&mut self, r#override: O) {
        r#override.override_config(self)
    }

    pub fn with_override<O: ConfigOverride>(mut self, r#override: O) -> Self {
        self.r#override(r#override);
        self
    }

    pub fn read_from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, InteractionError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| InteractionError::ConfigLoadFailure {
                path: path.to_path_buf(),
                source,
            })?;

        let loaded: Config =
            toml::from_str(&content).map_err(|source| InteractionError::ConfigParseFailure {
                path: path.to_path_buf(),
                source,
            })?;
        loaded.ensure_is_valid()?;

        debug!("loaded config file from {}", path.display());
        Ok(loaded)
    }

    pub fn default_location() -> Result<PathBuf, InteractionError> {
        default_config_filepath()
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), InteractionError> {
        let path = path.as_ref();
        let serialized = toml::to_string_pretty(self)?;

        let save_failure = |source| InteractionError::ConfigSaveFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(save_failure)?;
        }
        fs::write(path, serialized).map_err(save_failure)?;

        debug!("saved config file to {}", path.display());
        Ok(())
    }

    pub fn chain_client_config(&self) -> Result<ChainClientConfig, InteractionError> {
        Ok(
            ChainClientConfig::new(&self.network.bech32_prefix, self.network.gas_price()?)
                .with_simulated_gas_multiplier(self.network.simulated_gas_multiplier)
                .with_broadcast_polling_rate(self.network.broadcast_polling_rate)
                .with_broadcast_timeout(self.network.broadcast_timeout),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Network {
    /// Tendermint RPC endpoint of the chain.
    pub rpc_endpoint: String,

    /// Human readable part of the bech32 addresses used on the chain.
    pub bech32_prefix: String,

    /// Minimum gas price paid for every transaction, for example `0.025untrn`.
    pub gas_price: String,

    /// Multiplier applied to simulated gas usage when determining the gas limit.
    pub simulated_gas_multiplier: f32,

    #[serde(with = "humantime_serde")]
    pub broadcast_polling_rate: Duration,

    #[serde(with = "humantime_serde")]
    pub broadcast_timeout: Duration,
}

impl Network {
    pub fn rpc_endpoint(&self) -> Result<Url, InteractionError> {
        self.rpc_endpoint.parse().map_err(|_| {
            InteractionError::invalid_config(format!(
                "'{}' is not a valid rpc endpoint",
                self.rpc_endpoint
            ))
        })
    }

    pub fn gas_price(&self) -> Result<GasPrice, InteractionError> {
        self.gas_price.parse().map_err(|_| {
            InteractionError::invalid_config(format!(
                "'{}' is not a valid gas price",
                self.gas_price
            ))
        })
    }

    fn ensure_is_valid(&self) -> Result<(), InteractionError> {
        if self.bech32_prefix.is_empty() {
            return Err(InteractionError::invalid_config(
                "the bech32 prefix must not be empty",
            ));
        }

        self.rpc_endpoint()?;
        self.gas_price()?;

        if !self.simulated_gas_multiplier.is_finite() || self.simulated_gas_multiplier <= 0.0 {
            return Err(InteractionError::invalid_config(format!(
                "the simulated gas multiplier must be positive. got: {}",
                self.simulated_gas_multiplier
            )));
        }

        if self.broadcast_polling_rate.is_zero() {
            return Err(InteractionError::invalid_config(
                "the broadcast polling rate must be non-zero",
            ));
        }

        if self.broadcast_timeout < self.broadcast_polling_rate {
            return Err(InteractionError::invalid_config(
                "the broadcast timeout must not be shorter than the polling rate",
            ));
        }

        Ok(())
    }
}

impl Default for Network {
    fn default() -> Self {
        Network {
            rpc_endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            bech32_prefix: DEFAULT_BECH32_PREFIX.to_string(),
            gas_price: DEFAULT_GAS_PRICE.to_string(),
            simulated_gas_multiplier: DEFAULT_SIMULATED_GAS_MULTIPLIER,
            broadcast_polling_rate: DEFAULT_BROADCAST_POLLING_RATE,
            broadcast_timeout: DEFAULT_BROADCAST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Contracts {
    /// Location of the compiled staking contract.
    pub staking_wasm_path: PathBuf,

    /// Code id of an already uploaded staking contract. If set, the upload is skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staking_code_id: Option<ContractCodeId>,

    /// Code id of the cw721 contract used for the NFT collection.
    pub nft_code_id: ContractCodeId,

    /// Address of an existing NFT collection. If set, the NFT instantiation is skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_contract_address: Option<String>,
}

impl Contracts {
    pub fn nft_contract_address(&self) -> Result<Option<AccountId>, InteractionError> {
        self.nft_contract_address
            .as_deref()
            .map(|raw| parse_address(raw, "nft contract address"))
            .transpose()
    }

    fn ensure_is_valid(&self, bech32_prefix: &str) -> Result<(), InteractionError> {
        if let Some(address) = self.nft_contract_address()? {
            ensure_prefix(&address, bech32_prefix, "nft contract address")?;
        }

        if self.staking_code_id.is_none() && self.staking_wasm_path.as_os_str().is_empty() {
            return Err(InteractionError::invalid_config(
                "either the staking code id or the path to its wasm file must be provided",
            ));
        }

        Ok(())
    }
}

impl Default for Contracts {
    fn default() -> Self {
        Contracts {
            staking_wasm_path: PathBuf::from(DEFAULT_STAKING_WASM_PATH),
            staking_code_id: None,
            nft_code_id: DEFAULT_NFT_CODE_ID,
            nft_contract_address: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Scenario {
    /// Id of the token minted and staked during the run.
    pub token_id: String,

    /// Index of the stake record unstaked, claimed and burned.
    pub stake_index: StakeIndex,

    /// Collection temporarily added to (and removed from) the whitelist.
    pub secondary_collection: String,

    pub nft_name: String,
    pub nft_symbol: String,
    pub nft_label: String,
    pub staking_label: String,

    pub token_name: String,
    pub token_description: String,
}

impl Scenario {
    pub fn secondary_collection(&self) -> Result<AccountId, InteractionError> {
        parse_address(&self.secondary_collection, "secondary collection")
    }

    fn ensure_is_valid(&self, bech32_prefix: &str) -> Result<(), InteractionError> {
        if self.token_id.is_empty() {
            return Err(InteractionError::invalid_config(
                "the token id must not be empty",
            ));
        }
        if self.nft_label.is_empty() || self.staking_label.is_empty() {
            return Err(InteractionError::invalid_config(
                "contract labels must not be empty",
            ));
        }
        ensure_prefix(
            &self.secondary_collection()?,
            bech32_prefix,
            "secondary collection",
        )
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            token_id: DEFAULT_TOKEN_ID.to_string(),
            stake_index: 0,
            secondary_collection: DEFAULT_SECONDARY_COLLECTION.to_string(),
            nft_name: "Token".to_string(),
            nft_symbol: "TOKEN".to_string(),
            nft_label: "NFT".to_string(),
            staking_label: "NFT Staking".to_string(),
            token_name: "Token Name".to_string(),
            token_description: "Token Description".to_string(),
        }
    }
}

fn parse_address(raw: &str, what: &str) -> Result<AccountId, InteractionError> {
    raw.parse()
        .map_err(|_| InteractionError::invalid_config(format!("'{raw}' is not a valid {what}")))
}

fn ensure_prefix(address: &AccountId, prefix: &str, what: &str) -> Result<(), InteractionError> {
    if address.prefix() != prefix {
        return Err(InteractionError::invalid_config(format!(
            "the {what} {address} does not use the '{prefix}' prefix"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(
            config.network.rpc_endpoint().unwrap().as_str(),
            "https://rpc-palvus.pion-1.ntrn.tech/"
        );
        assert_eq!(config.network.bech32_prefix, "neutron");
        assert_eq!(config.network.gas_price().unwrap().to_string(), "0.025untrn");
        assert_eq!(config.contracts.nft_code_id, 3471);
        assert!(config.contracts.staking_code_id.is_none());
        assert_eq!(config.scenario.token_id, "send_try");
        assert_eq!(config.scenario.stake_index, 0);
        config.ensure_is_valid().unwrap();
    }

    #[test]
    fn saving_and_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("interaction.toml");

        let mut config = Config::default();
        config.contracts.staking_code_id = Some(3472);
        config.network.broadcast_timeout = Duration::from_secs(90);
        config.save_to_path(&path).unwrap();

        let loaded = Config::read_from_toml_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interaction.toml");
        fs::write(
            &path,
            r#"
[network]
gas_price = "0.05untrn"
broadcast_timeout = "2m"

[scenario]
token_id = "another"
"#,
        )
        .unwrap();

        let loaded = Config::read_from_toml_file(&path).unwrap();
        assert_eq!(loaded.network.gas_price, "0.05untrn");
        assert_eq!(loaded.network.broadcast_timeout, Duration::from_secs(120));
        assert_eq!(loaded.network.bech32_prefix, "neutron");
        assert_eq!(loaded.contracts, Contracts::default());
        assert_eq!(loaded.scenario.token_id, "another");
        assert_eq!(loaded.scenario.nft_symbol, "TOKEN");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = Config::default();
        config.network.gas_price = "cheap".to_string();
        assert!(matches!(
            config.ensure_is_valid(),
            Err(InteractionError::InvalidConfig { .. })
        ));

        let mut config = Config::default();
        config.network.simulated_gas_multiplier = 0.0;
        assert!(config.ensure_is_valid().is_err());

        let mut config = Config::default();
        config.contracts.nft_contract_address = Some("not-an-address".to_string());
        assert!(config.ensure_is_valid().is_err());

        let mut config = Config::default();
        config.scenario.token_id = String::new();
        assert!(config.ensure_is_valid().is_err());

        let mut config = Config::default();
        config.network.rpc_endpoint = "not a url".to_string();
        assert!(matches!(
            config.ensure_is_valid(),
            Err(InteractionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn addresses_must_match_the_chain_prefix() {
        let mut config = Config::default();
        config.network.bech32_prefix = "cosmos".to_string();
        // the default secondary collection is a neutron address
        assert!(matches!(
            config.ensure_is_valid(),
            Err(InteractionError::InvalidConfig { .. })
        ));

        let cosmos_contract = AccountId::new("cosmos", &[7u8; 32]).unwrap().to_string();

        let mut config = Config::default();
        config.scenario.secondary_collection = cosmos_contract.clone();
        let err = config.ensure_is_valid().unwrap_err();
        assert!(err.to_string().contains("'neutron' prefix"), "{err}");

        let mut config = Config::default();
        config.contracts.nft_contract_address = Some(cosmos_contract);
        let err = config.ensure_is_valid().unwrap_err();
        assert!(err.to_string().contains("'neutron' prefix"), "{err}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interaction.toml");
        fs::write(&path, "mnemonic = \"abandon\"\n").unwrap();

        assert!(matches!(
            Config::read_from_toml_file(&path),
            Err(InteractionError::ConfigParseFailure { .. })
        ));
    }

    #[test]
    fn chain_client_config_carries_network_settings() {
        let mut config = Config::default();
        config.network.bech32_prefix = "cosmos".to_string();
        let client_config = config.chain_client_config().unwrap();
        assert_eq!(client_config.bech32_prefix(), "cosmos");
    }
}
