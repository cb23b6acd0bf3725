// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::report::Step;
use nft_staking_chain_client::ChainClientError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(
        "failed to load config file using path '{}'. detailed message: {source}", path.display()
    )]
    ConfigLoadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file at '{}': {source}", path.display())]
    ConfigParseFailure {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "failed to save config file using path '{}'. detailed message: {source}", path.display()
    )]
    ConfigSaveFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize the config: {0}")]
    ConfigSerializationFailure(#[from] toml::ser::Error),

    #[error("there already exists a config file at: {}. if you want to overwrite its content, use --force flag", path.display())]
    ExistingConfig { path: PathBuf },

    #[error("could not determine the home directory of the current user")]
    NoHomeDirectory,

    #[error("the configuration is invalid: {reason}")]
    InvalidConfig { reason: String },

    #[error("no mnemonic was provided. use --mnemonic or set the NFT_STAKING_MNEMONIC environmental variable")]
    MissingMnemonic,

    #[error("the provided mnemonic is invalid: {0}")]
    InvalidMnemonic(#[from] bip39::Error),

    #[error("failed to read the contract code from '{}': {source}", path.display())]
    WasmReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    ChainClientFailure(#[from] ChainClientError),

    #[error("failed to serialize the payload of the '{step}' step: {source}")]
    PayloadSerializationFailure {
        step: Step,
        #[source]
        source: serde_json::Error,
    },

    #[error("the '{step}' step has failed for payload {payload}: {source}")]
    StepFailure {
        step: Step,
        payload: serde_json::Value,
        #[source]
        source: ChainClientError,
    },
}

impl InteractionError {
    pub fn invalid_config<S: Into<String>>(reason: S) -> Self {
        InteractionError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
