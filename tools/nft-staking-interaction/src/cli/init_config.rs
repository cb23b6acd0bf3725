// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cli::ConfigOverridableArgs;
use crate::config::Config;
use crate::env::vars;
use crate::error::InteractionError;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, clap::Args)]
pub(crate) struct Args {
    #[command(flatten)]
    config_override: ConfigOverridableArgs,

    /// Specifies custom location for the configuration file.
    #[clap(long, env = vars::CONFIG_PATH)]
    config: Option<PathBuf>,

    /// Overwrite existing configuration file.
    #[clap(long, short)]
    force: bool,
}

pub(crate) fn execute(args: Args) -> Result<(), InteractionError> {
    let path = match args.config {
        Some(path) => path,
        None => Config::default_location()?,
    };

    if path.exists() && !args.force {
        return Err(InteractionError::ExistingConfig { path });
    }

    let config = Config::default().with_override(args.config_override);
    config.ensure_is_valid()?;
    config.save_to_path(&path)?;

    info!("saved the config file to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: PathBuf, force: bool) -> Args {
        Args {
            config_override: ConfigOverridableArgs {
                token_id: Some("custom_token".to_string()),
                ..Default::default()
            },
            config: Some(path),
            force,
        }
    }

    #[test]
    fn writing_new_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interaction.toml");

        execute(args(path.clone(), false)).unwrap();

        let saved = Config::read_from_toml_file(&path).unwrap();
        assert_eq!(saved.scenario.token_id, "custom_token");
        assert_eq!(saved.contracts.nft_code_id, 3471);
    }

    #[test]
    fn existing_config_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interaction.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            execute(args(path.clone(), false)),
            Err(InteractionError::ExistingConfig { .. })
        ));
        execute(args(path.clone(), true)).unwrap();
        assert!(Config::read_from_toml_file(&path).is_ok());
    }
}
