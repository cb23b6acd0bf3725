// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod build_information;
pub mod logging;

#[cfg(feature = "output_format")]
pub mod output_format;
