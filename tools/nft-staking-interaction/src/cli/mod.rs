// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::env::vars;
use crate::error::InteractionError;
use clap::{Parser, Subcommand};
use nft_staking_bin_common::bin_info_owned;
use nft_staking_bin_common::logging::maybe_print_banner;
use nft_staking_bin_common::output_format::OutputFormat;
use std::path::PathBuf;
use std::sync::OnceLock;
use url::Url;

mod build_info;
mod init_config;
mod run;

/// Values that take precedence over the ones read from the config file.
#[derive(clap::Args, Debug, Default)]
pub struct ConfigOverridableArgs {
    /// Tendermint RPC endpoint of the chain
    #[clap(long, env = vars::RPC_ENDPOINT)]
    pub(crate) rpc_endpoint: Option<Url>,

    /// Human readable part of the addresses used on the chain
    #[clap(long, env = vars::BECH32_PREFIX)]
    pub(crate) bech32_prefix: Option<String>,

    /// Minimum gas price, for example `0.025untrn`
    #[clap(long, env = vars::GAS_PRICE)]
    pub(crate) gas_price: Option<String>,

    /// Path to the compiled staking contract
    #[clap(long, env = vars::WASM_PATH)]
    pub(crate) staking_wasm_path: Option<PathBuf>,

    /// Code id of an already stored staking contract. The upload is skipped if provided.
    #[clap(long)]
    pub(crate) staking_code_id: Option<u64>,

    /// Code id of the cw721 contract
    #[clap(long, env = vars::NFT_CODE_ID)]
    pub(crate) nft_code_id: Option<u64>,

    /// Address of an existing NFT collection. Its instantiation is skipped if provided.
    #[clap(long)]
    pub(crate) nft_contract_address: Option<String>,

    /// Id of the token minted and staked during the run
    #[clap(long)]
    pub(crate) token_id: Option<String>,

    /// Collection temporarily added to the whitelist
    #[clap(long)]
    pub(crate) secondary_collection: Option<String>,
}

// Helper for passing LONG_VERSION to clap
fn pretty_build_info_static() -> &'static str {
    static PRETTY_BUILD_INFORMATION: OnceLock<String> = OnceLock::new();
    PRETTY_BUILD_INFORMATION.get_or_init(|| bin_info_owned!().to_string())
}

#[derive(Parser, Debug)]
#[clap(author = "Nymtech", version, long_version = pretty_build_info_static(), about)]
pub struct Cli {
    /// Format of the printed output
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn print_banner(&self) {
        if self.output.is_text() {
            maybe_print_banner(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        }
    }

    pub async fn execute(self) -> Result<(), InteractionError> {
        match self.command {
            Commands::Run(args) => run::execute(args, self.output).await,
            Commands::InitConfig(args) => init_config::execute(args),
            Commands::BuildInfo => {
                build_info::execute(self.output);
                Ok(())
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Deploy the contracts and run the whole interaction scenario against them
    Run(run::Args),

    /// Write a config file populated with the default values
    InitConfig(init_config::Args),

    /// Show build information of this binary
    BuildInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parsing_run_overrides() {
        let cli = Cli::try_parse_from([
            "nft-staking-interaction",
            "run",
            "--staking-code-id",
            "3472",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Run(_)));
    }
}
