// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::coin::Coin;
use crate::contract_traits::{StakingContractsProvider, NFT_CONTRACT_NAME};
use crate::cosmwasm_client::types::ExecuteResult;
use crate::cosmwasm_client::SigningCosmWasmClient;
use crate::error::ChainClientError;
use crate::fee::Fee;
use async_trait::async_trait;
use cw721_contract_common::{Binary, ExecuteMsg as Cw721ExecuteMsg, Metadata, TokenId};

#[async_trait]
pub trait Cw721SigningClient {
    async fn execute_cw721_contract(
        &self,
        fee: Option<Fee>,
        msg: Cw721ExecuteMsg,
        memo: String,
        funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError>;

    async fn mint(
        &self,
        token_id: TokenId,
        owner: String,
        extension: Metadata,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_cw721_contract(
            fee,
            Cw721ExecuteMsg::Mint {
                token_id,
                extension,
                owner,
            },
            "Cw721Contract::Mint".to_string(),
            vec![],
        )
        .await
    }

    /// Transfers the token to the given contract and invokes its receive hook with the provided
    /// payload.
    async fn send_nft(
        &self,
        contract: String,
        token_id: TokenId,
        msg: Binary,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_cw721_contract(
            fee,
            Cw721ExecuteMsg::SendNft {
                contract,
                msg,
                token_id,
            },
            "Cw721Contract::SendNft".to_string(),
            vec![],
        )
        .await
    }

    async fn transfer_nft(
        &self,
        recipient: String,
        token_id: TokenId,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_cw721_contract(
            fee,
            Cw721ExecuteMsg::TransferNft {
                recipient,
                token_id,
            },
            "Cw721Contract::TransferNft".to_string(),
            vec![],
        )
        .await
    }

    async fn burn(
        &self,
        token_id: TokenId,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_cw721_contract(
            fee,
            Cw721ExecuteMsg::Burn { token_id },
            "Cw721Contract::Burn".to_string(),
            vec![],
        )
        .await
    }
}

#[async_trait]
impl<C> Cw721SigningClient for C
where
    C: SigningCosmWasmClient + StakingContractsProvider + Sync,
{
    async fn execute_cw721_contract(
        &self,
        fee: Option<Fee>,
        msg: Cw721ExecuteMsg,
        memo: String,
        funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError> {
        let nft_contract_address = self
            .nft_contract_address()
            .ok_or_else(|| ChainClientError::unavailable_contract_address(NFT_CONTRACT_NAME))?;

        let fee = fee.unwrap_or(Fee::Auto(None));
        let signer_address = self.signer_address()?;

        self.execute(
            &signer_address,
            nft_contract_address,
            &msg,
            fee,
            memo,
            funds,
        )
        .await
    }
}
