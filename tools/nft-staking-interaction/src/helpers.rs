// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::InteractionError;
use std::path::Path;

pub(crate) fn wasm_code<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, InteractionError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| InteractionError::WasmReadFailure {
        path: path.to_path_buf(),
        source,
    })
}
