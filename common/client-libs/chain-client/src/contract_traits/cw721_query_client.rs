// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::contract_traits::{StakingContractsProvider, NFT_CONTRACT_NAME};
use crate::cosmwasm_client::CosmWasmClient;
use crate::error::ChainClientError;
use async_trait::async_trait;
use cw721_contract_common::{QueryMsg as Cw721QueryMsg, TokensResponse};
use serde::Deserialize;

#[async_trait]
pub trait Cw721QueryClient {
    async fn query_cw721_contract<T>(&self, query: Cw721QueryMsg) -> Result<T, ChainClientError>
    where
        for<'a> T: Deserialize<'a>;

    /// Returns ids of the tokens owned by the given address.
    async fn get_tokens(&self, owner: String) -> Result<TokensResponse, ChainClientError> {
        self.query_cw721_contract(Cw721QueryMsg::tokens(owner))
            .await
    }
}

#[async_trait]
impl<C> Cw721QueryClient for C
where
    C: CosmWasmClient + StakingContractsProvider + Sync,
{
    async fn query_cw721_contract<T>(&self, query: Cw721QueryMsg) -> Result<T, ChainClientError>
    where
        for<'a> T: Deserialize<'a>,
    {
        let nft_contract_address = self
            .nft_contract_address()
            .ok_or_else(|| ChainClientError::unavailable_contract_address(NFT_CONTRACT_NAME))?;
        self.query_contract_smart(nft_contract_address, &query)
            .await
    }
}
