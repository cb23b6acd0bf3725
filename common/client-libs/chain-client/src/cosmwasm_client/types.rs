// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cosmwasm_client::logs::Log;
use crate::error::ChainClientError;
use cosmrs::proto::cosmos::auth::v1beta1::{
    BaseAccount as ProtoBaseAccount, ModuleAccount as ProtoModuleAccount,
};
use cosmrs::proto::cosmos::base::abci::v1beta1::GasInfo as ProtoGasInfo;
use cosmrs::proto::cosmos::tx::v1beta1::SimulateResponse as ProtoSimulateResponse;
use cosmrs::tendermint::{abci, block, Hash};
use cosmrs::{AccountId, Any, Gas};
use prost::Message;
use tendermint_rpc::endpoint::tx;

pub type ContractCodeId = u64;

const BASE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.BaseAccount";
const MODULE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.ModuleAccount";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceResponse {
    pub account_number: u64,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseAccount {
    pub address: AccountId,
    pub account_number: u64,
    pub sequence: u64,
}

impl TryFrom<ProtoBaseAccount> for BaseAccount {
    type Error = ChainClientError;

    fn try_from(value: ProtoBaseAccount) -> Result<Self, Self::Error> {
        let address = value
            .address
            .parse()
            .map_err(|_| ChainClientError::MalformedAccountAddress(value.address.clone()))?;

        Ok(BaseAccount {
            address,
            account_number: value.account_number,
            sequence: value.sequence,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAccount {
    pub base_account: Option<BaseAccount>,
    pub name: String,
}

impl TryFrom<ProtoModuleAccount> for ModuleAccount {
    type Error = ChainClientError;

    fn try_from(value: ProtoModuleAccount) -> Result<Self, Self::Error> {
        Ok(ModuleAccount {
            base_account: value.base_account.map(TryFrom::try_from).transpose()?,
            name: value.name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Base(BaseAccount),
    Module(ModuleAccount),
}

impl Account {
    pub fn try_get_base_account(&self) -> Result<&BaseAccount, ChainClientError> {
        match self {
            Account::Base(acc) => Ok(acc),
            Account::Module(acc) => acc
                .base_account
                .as_ref()
                .ok_or(ChainClientError::NoBaseAccountInformationAvailable),
        }
    }
}

impl TryFrom<Any> for Account {
    type Error = ChainClientError;

    fn try_from(raw_account: Any) -> Result<Self, Self::Error> {
        match raw_account.type_url.as_str() {
            BASE_ACCOUNT_TYPE_URL => Ok(Account::Base(
                ProtoBaseAccount::decode(raw_account.value.as_ref())?.try_into()?,
            )),
            MODULE_ACCOUNT_TYPE_URL => Ok(Account::Module(
                ProtoModuleAccount::decode(raw_account.value.as_ref())?.try_into()?,
            )),
            _ => Err(ChainClientError::UnsupportedAccountType {
                type_url: raw_account.type_url,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasInfo {
    /// GasWanted is the maximum units of work we allow this tx to perform.
    pub gas_wanted: Gas,

    /// GasUsed is the amount of gas actually consumed.
    pub gas_used: Gas,
}

impl GasInfo {
    pub fn new(gas_wanted: Gas, gas_used: Gas) -> Self {
        GasInfo {
            gas_wanted,
            gas_used,
        }
    }
}

impl From<ProtoGasInfo> for GasInfo {
    fn from(value: ProtoGasInfo) -> Self {
        GasInfo {
            gas_wanted: value.gas_wanted,
            gas_used: value.gas_used,
        }
    }
}

impl From<&tx::Response> for GasInfo {
    fn from(value: &tx::Response) -> Self {
        GasInfo {
            gas_wanted: value.tx_result.gas_wanted.max(0) as Gas,
            gas_used: value.tx_result.gas_used.max(0) as Gas,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulateResponse {
    pub gas_info: Option<GasInfo>,
}

impl From<ProtoSimulateResponse> for SimulateResponse {
    fn from(value: ProtoSimulateResponse) -> Self {
        SimulateResponse {
            gas_info: value.gas_info.map(Into::into),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Size of the original wasm code in bytes
    pub original_size: usize,

    /// sha256 checksum of the original wasm code (that is stored on chain)
    pub original_checksum: Vec<u8>,

    /// Size of the compressed wasm code in bytes
    pub compressed_size: usize,

    /// sha256 checksum of the compressed wasm code (that is included in the transaction)
    pub compressed_checksum: Vec<u8>,

    /// The ID of the code assigned by the chain
    pub code_id: ContractCodeId,

    pub logs: Vec<Log>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[derive(Debug, Clone)]
pub struct InstantiateResult {
    /// The address of the newly instantiated contract
    pub contract_address: AccountId,

    pub logs: Vec<Log>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[derive(Debug, Clone)]
pub struct ExecuteResult {
    pub logs: Vec<Log>,

    pub events: Vec<abci::Event>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_base_account() {
        let address = AccountId::new("neutron", &[7u8; 20]).unwrap();
        let proto = ProtoBaseAccount {
            address: address.to_string(),
            pub_key: None,
            account_number: 123,
            sequence: 4,
        };
        let raw = Any {
            type_url: BASE_ACCOUNT_TYPE_URL.to_string(),
            value: proto.encode_to_vec(),
        };

        let account = Account::try_from(raw).unwrap();
        let base = account.try_get_base_account().unwrap();
        assert_eq!(base.address, address);
        assert_eq!(base.account_number, 123);
        assert_eq!(base.sequence, 4);
    }

    #[test]
    fn unknown_account_types_are_rejected() {
        let raw = Any {
            type_url: "/cosmos.vesting.v1beta1.ContinuousVestingAccount".to_string(),
            value: vec![],
        };
        assert!(matches!(
            Account::try_from(raw),
            Err(ChainClientError::UnsupportedAccountType { .. })
        ))
    }
}
