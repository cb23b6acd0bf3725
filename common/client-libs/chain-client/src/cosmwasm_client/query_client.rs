// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cosmwasm_client::types::{Account, SequenceResponse};
use crate::error::{is_not_found_response, parse_abci_query_result, ChainClientError};
use async_trait::async_trait;
use cosmrs::proto::cosmos::auth::v1beta1::{QueryAccountRequest, QueryAccountResponse};
use cosmrs::proto::cosmwasm::wasm::v1::{
    QuerySmartContractStateRequest, QuerySmartContractStateResponse,
};
use cosmrs::tendermint::{chain, Hash};
use cosmrs::AccountId;
use prost::Message;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tendermint_rpc::endpoint::tx;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

#[async_trait]
pub trait CosmWasmClient: tendermint_rpc::Client + Send + Sync {
    // helper method to remove duplicate code involved in making abci requests with protobuf messages
    async fn make_abci_query<Req, Res>(
        &self,
        path: Option<String>,
        req: Req,
    ) -> Result<Res, ChainClientError>
    where
        Req: Message,
        Res: Message + Default,
    {
        let mut buf = Vec::with_capacity(req.encoded_len());
        req.encode(&mut buf)?;

        let res = self.abci_query(path, buf, None, false).await?;

        let res = parse_abci_query_result(res)?;
        Ok(Res::decode(res.value.as_ref())?)
    }

    async fn get_chain_id(&self) -> Result<chain::Id, ChainClientError> {
        Ok(self.status().await?.node_info.network)
    }

    async fn get_account(&self, address: &AccountId) -> Result<Option<Account>, ChainClientError> {
        let path = Some("/cosmos.auth.v1beta1.Query/Account".to_owned());

        let req = QueryAccountRequest {
            address: address.to_string(),
        };

        let res = match self
            .make_abci_query::<_, QueryAccountResponse>(path, req)
            .await
        {
            Ok(res) => res,
            // the account does not exist until it has received funds at least once
            Err(ChainClientError::AbciError { log, .. }) if log.contains("not found") => {
                return Ok(None)
            }
            Err(err) => return Err(err),
        };

        res.account.map(Account::try_from).transpose()
    }

    async fn get_sequence(&self, address: &AccountId) -> Result<SequenceResponse, ChainClientError> {
        let base_account = self
            .get_account(address)
            .await?
            .ok_or_else(|| ChainClientError::NonExistentAccountError(address.clone()))?
            .try_get_base_account()?
            .clone();

        Ok(SequenceResponse {
            account_number: base_account.account_number,
            sequence: base_account.sequence,
        })
    }

    async fn query_contract_smart<M, T>(
        &self,
        address: &AccountId,
        query_msg: &M,
    ) -> Result<T, ChainClientError>
    where
        M: ?Sized + Serialize + Sync,
        for<'a> T: Deserialize<'a>,
    {
        let path = Some("/cosmwasm.wasm.v1.Query/SmartContractState".to_owned());

        let req = QuerySmartContractStateRequest {
            address: address.to_string(),
            query_data: serde_json::to_vec(query_msg)?,
        };

        let res = self
            .make_abci_query::<_, QuerySmartContractStateResponse>(path, req)
            .await?;

        Ok(serde_json::from_slice(&res.data)?)
    }

    /// Polls the node for the transaction with the given hash until it gets included in a block
    /// or the timeout is reached.
    async fn wait_for_tx(
        &self,
        tx_hash: Hash,
        polling_rate: Duration,
        timeout: Duration,
    ) -> Result<tx::Response, ChainClientError> {
        debug!("waiting for tx {tx_hash} to get included in a block");
        let start = Instant::now();

        loop {
            sleep(polling_rate).await;

            match self.tx(tx_hash, false).await {
                Ok(tx) => return Ok(tx),
                Err(err) if is_not_found_response(&err) => {
                    trace!("tx {tx_hash} is not yet available: {err}")
                }
                // any other rpc failure ends the wait
                Err(err) => return Err(err.into()),
            }

            if start.elapsed() >= timeout {
                return Err(ChainClientError::BroadcastTimeout {
                    hash: tx_hash,
                    timeout,
                });
            }
        }
    }
}

impl<T> CosmWasmClient for T where T: tendermint_rpc::Client + Send + Sync {}
