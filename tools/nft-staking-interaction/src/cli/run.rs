// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cli::ConfigOverridableArgs;
use crate::config::Config;
use crate::env::vars;
use crate::error::InteractionError;
use crate::scenario::{Scenario, ScenarioParams};
use nft_staking_bin_common::output_format::OutputFormat;
use nft_staking_chain_client::DirectSigningHttpRpcChainClient;
use std::fmt;
use std::path::PathBuf;
use tracing::info;
use zeroize::Zeroizing;

#[derive(clap::Args)]
pub(crate) struct Args {
    #[command(flatten)]
    config_override: ConfigOverridableArgs,

    /// Specifies custom location for the configuration file.
    /// If not provided, the default one is used if it exists.
    #[clap(long, env = vars::CONFIG_PATH)]
    config: Option<PathBuf>,

    /// Mnemonic of the account deploying and interacting with the contracts
    #[clap(long, env = vars::MNEMONIC, hide_env_values = true)]
    mnemonic: Option<Zeroizing<String>>,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("config_override", &self.config_override)
            .field("config", &self.config)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn load_config(custom_path: Option<PathBuf>) -> Result<Config, InteractionError> {
    if let Some(path) = custom_path {
        return Config::read_from_toml_file(path);
    }

    let default_path = Config::default_location()?;
    if default_path.exists() {
        Config::read_from_toml_file(default_path)
    } else {
        info!(
            "no config file found at {}. using the default values",
            default_path.display()
        );
        Ok(Config::default())
    }
}

pub(crate) async fn execute(args: Args, output: OutputFormat) -> Result<(), InteractionError> {
    let config = load_config(args.config)?.with_override(args.config_override);
    config.ensure_is_valid()?;

    let mnemonic = args.mnemonic.ok_or(InteractionError::MissingMnemonic)?;
    let mnemonic = bip39::Mnemonic::parse(mnemonic.as_str())?;

    let rpc_endpoint = config.network.rpc_endpoint()?;
    info!("connecting to {rpc_endpoint}");
    let client = DirectSigningHttpRpcChainClient::connect_with_mnemonic(
        config.chain_client_config()?,
        rpc_endpoint.as_str(),
        mnemonic,
    )?;

    let mut scenario = Scenario::new(client, ScenarioParams::try_from(&config)?);
    let res = scenario.run().await;

    output.to_stdout(scenario.report());
    res
}
