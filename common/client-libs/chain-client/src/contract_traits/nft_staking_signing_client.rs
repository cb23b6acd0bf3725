// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::coin::Coin;
use crate::contract_traits::{StakingContractsProvider, STAKING_CONTRACT_NAME};
use crate::cosmwasm_client::types::ExecuteResult;
use crate::cosmwasm_client::SigningCosmWasmClient;
use crate::error::ChainClientError;
use crate::fee::Fee;
use async_trait::async_trait;
use nft_staking_contract_common::{ExecuteMsg as NftStakingExecuteMsg, StakeIndex};

#[async_trait]
pub trait NftStakingSigningClient {
    async fn execute_nft_staking_contract(
        &self,
        fee: Option<Fee>,
        msg: NftStakingExecuteMsg,
        memo: String,
        funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError>;

    async fn unstake(
        &self,
        index: StakeIndex,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_nft_staking_contract(
            fee,
            NftStakingExecuteMsg::Unstake { index },
            "NftStakingContract::Unstake".to_string(),
            vec![],
        )
        .await
    }

    async fn claim(
        &self,
        index: StakeIndex,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_nft_staking_contract(
            fee,
            NftStakingExecuteMsg::Claim { index },
            "NftStakingContract::Claim".to_string(),
            vec![],
        )
        .await
    }

    async fn admin_burn(
        &self,
        index: StakeIndex,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_nft_staking_contract(
            fee,
            NftStakingExecuteMsg::AdminBurn { index },
            "NftStakingContract::AdminBurn".to_string(),
            vec![],
        )
        .await
    }

    async fn add_collection(
        &self,
        nft_addr: String,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_nft_staking_contract(
            fee,
            NftStakingExecuteMsg::AddCollection { nft_addr },
            "NftStakingContract::AddCollection".to_string(),
            vec![],
        )
        .await
    }

    async fn remove_collection(
        &self,
        nft_addr: String,
        fee: Option<Fee>,
    ) -> Result<ExecuteResult, ChainClientError> {
        self.execute_nft_staking_contract(
            fee,
            NftStakingExecuteMsg::RemoveCollection { nft_addr },
            "NftStakingContract::RemoveCollection".to_string(),
            vec![],
        )
        .await
    }
}

#[async_trait]
impl<C> NftStakingSigningClient for C
where
    C: SigningCosmWasmClient + StakingContractsProvider + Sync,
{
    async fn execute_nft_staking_contract(
        &self,
        fee: Option<Fee>,
        msg: NftStakingExecuteMsg,
        memo: String,
        funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError> {
        let staking_contract_address = self
            .staking_contract_address()
            .ok_or_else(|| ChainClientError::unavailable_contract_address(STAKING_CONTRACT_NAME))?;

        let fee = fee.unwrap_or(Fee::Auto(None));
        let signer_address = self.signer_address()?;

        self.execute(
            &signer_address,
            staking_contract_address,
            &msg,
            fee,
            memo,
            funds,
        )
        .await
    }
}
