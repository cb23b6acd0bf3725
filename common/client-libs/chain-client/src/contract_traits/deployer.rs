// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cosmwasm_client::signing_client::InstantiateOptions;
use crate::cosmwasm_client::types::{ContractCodeId, InstantiateResult, UploadResult};
use crate::cosmwasm_client::SigningCosmWasmClient;
use crate::error::ChainClientError;
use crate::fee::Fee;
use async_trait::async_trait;
use cosmrs::AccountId;
use serde::Serialize;

/// Storing and instantiating contract code on behalf of the signer.
#[async_trait]
pub trait ContractDeployer {
    /// Address that signs (and pays for) every deployment transaction.
    fn deployer_address(&self) -> Result<AccountId, ChainClientError>;

    async fn upload_contract(
        &self,
        wasm_code: Vec<u8>,
        fee: Option<Fee>,
    ) -> Result<UploadResult, ChainClientError>;

    async fn instantiate_contract<M>(
        &self,
        code_id: ContractCodeId,
        msg: &M,
        label: String,
        admin: Option<AccountId>,
        fee: Option<Fee>,
    ) -> Result<InstantiateResult, ChainClientError>
    where
        M: ?Sized + Serialize + Sync;
}

#[async_trait]
impl<C> ContractDeployer for C
where
    C: SigningCosmWasmClient + Sync,
{
    fn deployer_address(&self) -> Result<AccountId, ChainClientError> {
        self.signer_address()
    }

    async fn upload_contract(
        &self,
        wasm_code: Vec<u8>,
        fee: Option<Fee>,
    ) -> Result<UploadResult, ChainClientError> {
        let sender = self.signer_address()?;
        self.upload(
            &sender,
            wasm_code,
            fee.unwrap_or(Fee::Auto(None)),
            "Storing contract code",
        )
        .await
    }

    async fn instantiate_contract<M>(
        &self,
        code_id: ContractCodeId,
        msg: &M,
        label: String,
        admin: Option<AccountId>,
        fee: Option<Fee>,
    ) -> Result<InstantiateResult, ChainClientError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let sender = self.signer_address()?;
        let memo = format!("Instantiating {label}");
        self.instantiate(
            &sender,
            code_id,
            msg,
            label,
            fee.unwrap_or(Fee::Auto(None)),
            memo,
            Some(InstantiateOptions::new(vec![], admin)),
        )
        .await
    }
}
