// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Information about the binary, captured at compile time of the calling crate.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BinaryBuildInformationOwned {
    /// Provides the name of the binary, i.e. the content of `CARGO_PKG_NAME` environmental variable.
    pub binary_name: String,

    /// Provides the build version, i.e. the content of the `CARGO_PKG_VERSION` environmental variable.
    pub build_version: String,

    /// Provides the minimum supported rust version the binary was declared against,
    /// i.e. the content of the `CARGO_PKG_RUST_VERSION` environmental variable.
    pub rust_version: String,

    /// Provides the profile of the build, based on the `debug_assertions` of the calling crate.
    pub cargo_profile: String,
}

impl fmt::Display for BinaryBuildInformationOwned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}{}", "Binary Name:", self.binary_name)?;
        writeln!(f, "{:<20}{}", "Build Version:", self.build_version)?;
        writeln!(f, "{:<20}{}", "Rust Version:", self.rust_version)?;
        write!(f, "{:<20}{}", "Cargo Profile:", self.cargo_profile)
    }
}

// needs to be a macro so that the cargo variables are the ones of the calling crate
#[macro_export]
macro_rules! bin_info_owned {
    () => {
        $crate::build_information::BinaryBuildInformationOwned {
            binary_name: env!("CARGO_PKG_NAME").to_string(),
            build_version: env!("CARGO_PKG_VERSION").to_string(),
            rust_version: env!("CARGO_PKG_RUST_VERSION").to_string(),
            cargo_profile: if cfg!(debug_assertions) {
                "debug".to_string()
            } else {
                "release".to_string()
            },
        }
    };
}
