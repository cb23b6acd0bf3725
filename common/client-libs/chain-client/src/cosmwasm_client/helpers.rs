// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::ChainClientError;
use cosmrs::tendermint::abci;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::io::Write;
use tendermint_rpc::endpoint::{broadcast, tx};

pub(crate) fn compress_wasm_code(code: &[u8]) -> Result<Vec<u8>, ChainClientError> {
    // using compression level 9, same as cosmjs, that optimises for size
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(code)
        .map_err(ChainClientError::WasmCompressionError)?;
    encoder
        .finish()
        .map_err(ChainClientError::WasmCompressionError)
}

pub(crate) trait CheckResponse: Sized {
    fn check_response(self) -> Result<Self, ChainClientError>;
}

impl CheckResponse for broadcast::tx_sync::Response {
    fn check_response(self) -> Result<Self, ChainClientError> {
        if self.code.is_err() {
            return Err(ChainClientError::BroadcastTxErrorCheckTx {
                hash: self.hash,
                height: None,
                code: self.code.value(),
                raw_log: self.log,
            });
        }

        Ok(self)
    }
}

impl CheckResponse for tx::Response {
    fn check_response(self) -> Result<Self, ChainClientError> {
        if self.tx_result.code.is_err() {
            return Err(ChainClientError::BroadcastTxErrorDeliverTx {
                hash: self.hash,
                height: Some(self.height),
                code: self.tx_result.code.value(),
                raw_log: self.tx_result.log,
            });
        }

        Ok(self)
    }
}

/// Looks up the value of the first attribute with the given key inside events of the given type.
pub fn find_event_attribute(
    events: &[abci::Event],
    event_type: &str,
    attribute_key: &str,
) -> Option<String> {
    events
        .iter()
        .filter(|event| event.kind == event_type)
        .flat_map(|event| event.attributes.iter())
        .find(|attribute| attribute.key_bytes() == attribute_key.as_bytes())
        .map(|attribute| String::from_utf8_lossy(attribute.value_bytes()).into_owned())
}

/// Collects all attributes of the first event of the given type.
pub fn event_attributes(
    events: &[abci::Event],
    event_type: &str,
) -> Option<BTreeMap<String, String>> {
    let event = events.iter().find(|event| event.kind == event_type)?;
    Some(
        event
            .attributes
            .iter()
            .map(|attribute| {
                (
                    String::from_utf8_lossy(attribute.key_bytes()).into_owned(),
                    String::from_utf8_lossy(attribute.value_bytes()).into_owned(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn compressed_code_decompresses_to_the_original() {
        let code = b"\0asm\x01\0\0\0".repeat(128);
        let compressed = compress_wasm_code(&code).unwrap();
        assert!(compressed.len() < code.len());

        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, code);
    }

    #[test]
    fn finding_event_attributes() {
        let events = vec![
            abci::Event::new("message", [("action", "/cosmwasm.wasm.v1.MsgStoreCode")]),
            abci::Event::new(
                "store_code",
                [("code_checksum", "deadbeef"), ("code_id", "3472")],
            ),
        ];

        assert_eq!(
            find_event_attribute(&events, "store_code", "code_id"),
            Some("3472".to_string())
        );
        assert_eq!(find_event_attribute(&events, "message", "code_id"), None);
        assert_eq!(find_event_attribute(&events, "instantiate", "code_id"), None);
    }

    #[test]
    fn collecting_event_attributes() {
        let events = vec![
            abci::Event::new("execute", [("_contract_address", "neutron1staking")]),
            abci::Event::new(
                "wasm-Claimed",
                [("nft_addr", "neutron1nft"), ("token_id", "send_try"), ("index", "0")],
            ),
        ];

        let attributes = event_attributes(&events, "wasm-Claimed").unwrap();
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes["token_id"], "send_try");
        assert_eq!(attributes["index"], "0");
        assert!(event_attributes(&events, "wasm-staked").is_none());
    }
}
