// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmrs::AccountId;

pub mod cw721_query_client;
pub mod cw721_signing_client;
pub mod deployer;
pub mod nft_staking_query_client;
pub mod nft_staking_signing_client;

pub use cw721_query_client::Cw721QueryClient;
pub use cw721_signing_client::Cw721SigningClient;
pub use deployer::ContractDeployer;
pub use nft_staking_query_client::NftStakingQueryClient;
pub use nft_staking_signing_client::NftStakingSigningClient;

pub const NFT_CONTRACT_NAME: &str = "cw721 nft";
pub const STAKING_CONTRACT_NAME: &str = "nft staking";

/// Provides addresses of the contracts the client interacts with.
/// They only become known once the contracts got instantiated (or were explicitly configured).
pub trait StakingContractsProvider {
    fn nft_contract_address(&self) -> Option<&AccountId>;

    fn staking_contract_address(&self) -> Option<&AccountId>;

    fn set_nft_contract_address(&mut self, address: AccountId);

    fn set_staking_contract_address(&mut self, address: AccountId);
}

#[derive(Debug, Clone, Default)]
pub struct StakingContracts {
    pub nft_contract_address: Option<AccountId>,
    pub staking_contract_address: Option<AccountId>,
}
