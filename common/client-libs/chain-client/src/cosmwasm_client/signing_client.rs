// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::coin::{to_cosmos_coins, Coin};
use crate::cosmwasm_client::helpers::{compress_wasm_code, CheckResponse};
use crate::cosmwasm_client::logs::{find_tx_attribute, parse_raw_logs};
use crate::cosmwasm_client::query_client::CosmWasmClient;
use crate::cosmwasm_client::types::{
    ContractCodeId, ExecuteResult, GasInfo, InstantiateResult, SimulateResponse, UploadResult,
};
use crate::error::ChainClientError;
use crate::fee::gas_price::GasPrice;
use crate::fee::{Fee, GasAdjustable, GasAdjustment};
use crate::signing::signer::SigningError;
use crate::signing::tx_signer::TxSigner;
use crate::signing::SignerData;
use async_trait::async_trait;
use cosmrs::cosmwasm::{MsgExecuteContract, MsgInstantiateContract, MsgStoreCode};
use cosmrs::proto::cosmos::tx::v1beta1::{
    SimulateRequest, SimulateResponse as ProtoSimulateResponse, TxRaw,
};
use cosmrs::tx::{self, Msg, SignerInfo};
use cosmrs::{AccountId, Any};
use prost::Message;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tendermint_rpc::endpoint::tx::Response as TxResponse;
use tracing::{debug, info};

const STORE_CODE_EVENT_TYPE: &str = "store_code";
const CODE_ID_ATTRIBUTE_KEY: &str = "code_id";
const INSTANTIATE_EVENT_TYPE: &str = "instantiate";
const CONTRACT_ADDRESS_ATTRIBUTE_KEY: &str = "_contract_address";

#[derive(Debug, Clone, Default)]
pub struct InstantiateOptions {
    /// The funds that are transferred from the sender to the newly created contract.
    pub funds: Vec<Coin>,

    /// A bech32 encoded address of an admin account.
    /// Caution: an admin has the privilege to upgrade a contract.
    /// If this is not desired, do not set this value.
    pub admin: Option<AccountId>,
}

impl InstantiateOptions {
    pub fn new(funds: Vec<Coin>, admin: Option<AccountId>) -> Self {
        InstantiateOptions { funds, admin }
    }
}

#[async_trait]
pub trait SigningCosmWasmClient: CosmWasmClient + TxSigner {
    fn gas_price(&self) -> &GasPrice;

    fn simulated_gas_multiplier(&self) -> GasAdjustment;

    fn broadcast_polling_rate(&self) -> Duration;

    fn broadcast_timeout(&self) -> Duration;

    /// Address of the first account held by the underlying signer.
    fn signer_address(&self) -> Result<AccountId, ChainClientError> {
        self.signer_addresses()?
            .into_iter()
            .next()
            .ok_or_else(|| SigningError::NoAccounts.into())
    }

    async fn upload(
        &self,
        sender_address: &AccountId,
        wasm_code: Vec<u8>,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<UploadResult, ChainClientError> {
        let compressed = compress_wasm_code(&wasm_code)?;
        let compressed_size = compressed.len();
        let compressed_checksum = Sha256::digest(&compressed).to_vec();

        debug!(
            "compressed {} bytes of wasm code down to {compressed_size} bytes",
            wasm_code.len()
        );

        let upload_msg = MsgStoreCode {
            sender: sender_address.clone(),
            wasm_byte_code: compressed,
            instantiate_permission: None,
        }
        .to_any()
        .map_err(|_| ChainClientError::SerializationError("MsgStoreCode".to_owned()))?;

        let tx_res = self
            .sign_and_broadcast(sender_address, vec![upload_msg], fee, memo)
            .await?;

        let logs = parse_raw_logs(&tx_res.tx_result.log);
        let code_id = find_tx_attribute(
            &tx_res.tx_result.events,
            &logs,
            STORE_CODE_EVENT_TYPE,
            CODE_ID_ATTRIBUTE_KEY,
        )
        .ok_or_else(|| ChainClientError::MissingEventAttribute {
            hash: tx_res.hash,
            event_type: STORE_CODE_EVENT_TYPE.to_owned(),
            attribute: CODE_ID_ATTRIBUTE_KEY.to_owned(),
        })?
        .parse::<ContractCodeId>()
        .map_err(|_| ChainClientError::DeserializationError("code id".to_owned()))?;

        info!("stored new wasm code with id {code_id}");

        Ok(UploadResult {
            original_size: wasm_code.len(),
            original_checksum: Sha256::digest(&wasm_code).to_vec(),
            compressed_size,
            compressed_checksum,
            code_id,
            gas_info: GasInfo::from(&tx_res),
            logs,
            transaction_hash: tx_res.hash,
            height: tx_res.height,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn instantiate<M>(
        &self,
        sender_address: &AccountId,
        code_id: ContractCodeId,
        msg: &M,
        label: String,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
        options: Option<InstantiateOptions>,
    ) -> Result<InstantiateResult, ChainClientError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let options = options.unwrap_or_default();

        let init_msg = MsgInstantiateContract {
            sender: sender_address.clone(),
            admin: options.admin,
            code_id,
            label: Some(label),
            msg: serde_json::to_vec(msg)?,
            funds: to_cosmos_coins(options.funds)?,
        }
        .to_any()
        .map_err(|_| ChainClientError::SerializationError("MsgInstantiateContract".to_owned()))?;

        let tx_res = self
            .sign_and_broadcast(sender_address, vec![init_msg], fee, memo)
            .await?;

        let logs = parse_raw_logs(&tx_res.tx_result.log);
        let contract_address = find_tx_attribute(
            &tx_res.tx_result.events,
            &logs,
            INSTANTIATE_EVENT_TYPE,
            CONTRACT_ADDRESS_ATTRIBUTE_KEY,
        )
        .ok_or_else(|| ChainClientError::MissingEventAttribute {
            hash: tx_res.hash,
            event_type: INSTANTIATE_EVENT_TYPE.to_owned(),
            attribute: CONTRACT_ADDRESS_ATTRIBUTE_KEY.to_owned(),
        })?;

        let contract_address = contract_address
            .parse()
            .map_err(|_| ChainClientError::MalformedAccountAddress(contract_address))?;

        info!("instantiated code {code_id} at {contract_address}");

        Ok(InstantiateResult {
            contract_address,
            gas_info: GasInfo::from(&tx_res),
            logs,
            transaction_hash: tx_res.hash,
            height: tx_res.height,
        })
    }

    async fn execute<M>(
        &self,
        sender_address: &AccountId,
        contract_address: &AccountId,
        msg: &M,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
        funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let execute_msg = MsgExecuteContract {
            sender: sender_address.clone(),
            contract: contract_address.clone(),
            msg: serde_json::to_vec(msg)?,
            funds: to_cosmos_coins(funds)?,
        }
        .to_any()
        .map_err(|_| ChainClientError::SerializationError("MsgExecuteContract".to_owned()))?;

        let tx_res = self
            .sign_and_broadcast(sender_address, vec![execute_msg], fee, memo)
            .await?;

        Ok(ExecuteResult {
            logs: parse_raw_logs(&tx_res.tx_result.log),
            gas_info: GasInfo::from(&tx_res),
            events: tx_res.tx_result.events,
            transaction_hash: tx_res.hash,
            height: tx_res.height,
        })
    }

    async fn simulate(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<SimulateResponse, ChainClientError> {
        let public_key = self.find_account(signer_address)?.public_key();
        let sequence_response = self.get_sequence(signer_address).await?;

        let partial_tx = tx::Body::new(messages, memo, 0u32);

        // the fee is irrelevant for simulation purposes
        let auth_info = SignerInfo::single_direct(Some(public_key), sequence_response.sequence)
            .auth_info(tx::Fee {
                amount: vec![],
                gas_limit: 0,
                payer: None,
                granter: None,
            });

        // the chain only checks the signature count, not the signature itself
        let simulation_tx = TxRaw {
            body_bytes: partial_tx.into_bytes()?,
            auth_info_bytes: auth_info.into_bytes()?,
            signatures: vec![Vec::new()],
        };

        #[allow(deprecated)]
        let req = SimulateRequest {
            tx: None,
            tx_bytes: simulation_tx.encode_to_vec(),
        };

        let path = Some("/cosmos.tx.v1beta1.Service/Simulate".to_owned());
        let res = self
            .make_abci_query::<_, ProtoSimulateResponse>(path, req)
            .await?;

        Ok(res.into())
    }

    async fn determine_transaction_fee(
        &self,
        signer_address: &AccountId,
        messages: &[Any],
        fee: Fee,
        memo: String,
    ) -> Result<tx::Fee, ChainClientError> {
        let multiplier = match fee {
            Fee::Manual(fee) => return Ok(fee),
            Fee::Auto(multiplier) => multiplier.unwrap_or(self.simulated_gas_multiplier()),
        };

        let gas_estimation = self
            .simulate(signer_address, messages.to_vec(), memo)
            .await?;
        let gas_used = gas_estimation
            .gas_info
            .ok_or(ChainClientError::GasEstimationFailure)?
            .gas_used;

        let gas_limit = gas_used.adjust_gas(multiplier);
        let fee_amount = self.gas_price() * gas_limit;

        debug!(
            "simulated gas usage: {gas_used}, adjusted gas limit: {gas_limit} (multiplier: {multiplier}), fee: {fee_amount}"
        );

        Ok(tx::Fee::from_amount_and_gas(
            fee_amount.try_into()?,
            gas_limit,
        ))
    }

    /// Signs the messages, broadcasts the resulting transaction in the sync mode
    /// and waits for it to get included in a block.
    async fn sign_and_broadcast(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<TxResponse, ChainClientError> {
        let memo = memo.into();
        let fee = self
            .determine_transaction_fee(signer_address, &messages, fee, memo.clone())
            .await?;

        let sequence_response = self.get_sequence(signer_address).await?;
        let chain_id = self.get_chain_id().await?;

        let signer_data = SignerData {
            account_number: sequence_response.account_number,
            sequence: sequence_response.sequence,
            chain_id,
        };

        let tx_raw = self.sign_direct_tx(signer_address, messages, fee, memo, signer_data)?;
        let tx_bytes = tx_raw
            .to_bytes()
            .map_err(|_| ChainClientError::SerializationError("Tx".to_owned()))?;

        let broadcast_res = self.broadcast_tx_sync(tx_bytes).await?.check_response()?;
        debug!("broadcast tx {}", broadcast_res.hash);

        self.wait_for_tx(
            broadcast_res.hash,
            self.broadcast_polling_rate(),
            self.broadcast_timeout(),
        )
        .await?
        .check_response()
    }
}
