// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::signer::SigningError;
use cosmrs::tendermint::{block, Hash};
use cosmrs::AccountId;
use std::io;
use std::time::Duration;
use tendermint_rpc::endpoint::abci_query::AbciQuery;
use tendermint_rpc::error::ErrorDetail as TendermintRpcErrorDetail;
use tendermint_rpc::response_error::Code;
use thiserror::Error;

pub use tendermint_rpc::error::Error as TendermintRpcError;

#[derive(Debug, Error)]
pub enum ChainClientError {
    #[error("{contract} contract address is not available")]
    NoContractAddressAvailable { contract: String },

    #[error("there was an issue with bip39 - {0}")]
    Bip39Error(#[from] bip39::Error),

    #[error(transparent)]
    SigningError(#[from] SigningError),

    #[error("there was an issue with a tendermint RPC request - {0}")]
    TendermintError(#[from] TendermintRpcError),

    #[error("cosmrs error - {0}")]
    CosmrsErrorReport(#[from] eyre::Report),

    #[error("there was an issue when attempting to serialize {0}")]
    SerializationError(String),

    #[error("there was an issue when attempting to deserialize {0}")]
    DeserializationError(String),

    #[error("there was an issue when attempting to encode our protobuf data - {0}")]
    ProtobufEncodingError(#[from] prost::EncodeError),

    #[error("there was an issue when attempting to decode our protobuf data - {0}")]
    ProtobufDecodingError(#[from] prost::DecodeError),

    #[error("there was an issue with the serialization/deserialization - {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("account {0} does not exist on the chain")]
    NonExistentAccountError(AccountId),

    #[error("{0} is not a valid account address")]
    MalformedAccountAddress(String),

    #[error("unsupported account type: {type_url}")]
    UnsupportedAccountType { type_url: String },

    #[error("this account does not have BaseAccount information available to it")]
    NoBaseAccountInformationAvailable,

    #[error("failed to compress provided wasm code - {0}")]
    WasmCompressionError(io::Error),

    #[error("the provided gas price '{raw}' is malformed")]
    MalformedGasPrice { raw: String },

    #[error("{coin_representation} is not a valid Cosmos Coin")]
    MalformedCoin { coin_representation: String },

    #[error("failed to estimate gas for the transaction")]
    GasEstimationFailure,

    #[error("abci query failed with code {code} - {log}")]
    AbciError { code: u32, log: String },

    #[error(
        "error when broadcasting tx {hash} at height {height:?}. Error occurred during CheckTx phase. Code: {code}; Raw log: {raw_log}"
    )]
    BroadcastTxErrorCheckTx {
        hash: Hash,
        height: Option<block::Height>,
        code: u32,
        raw_log: String,
    },

    #[error(
        "error when broadcasting tx {hash} at height {height:?}. Error occurred during DeliverTx phase. Code: {code}; Raw log: {raw_log}"
    )]
    BroadcastTxErrorDeliverTx {
        hash: Hash,
        height: Option<block::Height>,
        code: u32,
        raw_log: String,
    },

    #[error("tx {hash} was broadcast but it was not included in a block within {timeout:?}")]
    BroadcastTimeout { hash: Hash, timeout: Duration },

    #[error("could not find '{attribute}' attribute of the '{event_type}' event in tx {hash}")]
    MissingEventAttribute {
        hash: Hash,
        event_type: String,
        attribute: String,
    },
}

impl ChainClientError {
    pub fn unavailable_contract_address<S: Into<String>>(contract: S) -> Self {
        ChainClientError::NoContractAddressAvailable {
            contract: contract.into(),
        }
    }

    pub fn malformed_gas_price<S: Into<String>>(raw: S) -> Self {
        ChainClientError::MalformedGasPrice { raw: raw.into() }
    }

    pub fn is_tendermint_response_not_found(&self) -> bool {
        match self {
            ChainClientError::TendermintError(err) => is_not_found_response(err),
            _ => false,
        }
    }
}

/// Checks whether the node has answered that the requested item (such as a transaction) does not exist (yet).
pub(crate) fn is_not_found_response(err: &TendermintRpcError) -> bool {
    match err {
        TendermintRpcError(TendermintRpcErrorDetail::Response(err), _) => {
            let response = &err.source;
            // cometbft reports missing transactions as "tx (<hash>) not found"
            response.code() == Code::InternalError
                && response.data().is_some_and(|data| data.contains("not found"))
        }
        _ => false,
    }
}

pub(crate) fn parse_abci_query_result(query_result: AbciQuery) -> Result<AbciQuery, ChainClientError> {
    if query_result.code.is_err() {
        return Err(ChainClientError::AbciError {
            code: query_result.code.value(),
            log: query_result.log,
        });
    }

    Ok(query_result)
}
