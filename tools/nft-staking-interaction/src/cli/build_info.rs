// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use nft_staking_bin_common::bin_info_owned;
use nft_staking_bin_common::output_format::OutputFormat;

pub(crate) fn execute(output: OutputFormat) {
    output.to_stdout(&bin_info_owned!())
}
