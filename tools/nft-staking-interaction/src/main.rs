// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use nft_staking_bin_common::logging::setup_tracing_logger;
use nft_staking_interaction::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // values from a local .env file are visible to clap
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_tracing_logger();
    cli.print_banner();

    cli.execute().await?;

    Ok(())
}
