// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::contract_traits::{StakingContracts, StakingContractsProvider};
use crate::cosmwasm_client::SigningCosmWasmClient;
use crate::error::{ChainClientError, TendermintRpcError};
use crate::fee::gas_price::GasPrice;
use crate::fee::{GasAdjustment, DEFAULT_SIMULATED_GAS_MULTIPLIER};
use crate::signing::direct_wallet::DirectSecp256k1HdWallet;
use crate::signing::signer::{OfflineSigner, SigningError};
use crate::signing::AccountData;
use async_trait::async_trait;
use cosmrs::tendermint::{block::Height, Hash};
use cosmrs::tx::{Raw, SignDoc};
use cosmrs::AccountId;
use std::time::Duration;
use tendermint_rpc::endpoint::{abci_query, broadcast, status, tx};
use tendermint_rpc::{HttpClient, HttpClientUrl, SimpleRequest};
use tracing::debug;

pub const DEFAULT_BROADCAST_POLLING_RATE: Duration = Duration::from_secs(4);
pub const DEFAULT_BROADCAST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) bech32_prefix: String,
    pub(crate) gas_price: GasPrice,
    pub(crate) simulated_gas_multiplier: GasAdjustment,
    pub(crate) broadcast_polling_rate: Duration,
    pub(crate) broadcast_timeout: Duration,
}

impl Config {
    pub fn new<S: Into<String>>(bech32_prefix: S, gas_price: GasPrice) -> Self {
        Config {
            bech32_prefix: bech32_prefix.into(),
            gas_price,
            simulated_gas_multiplier: DEFAULT_SIMULATED_GAS_MULTIPLIER,
            broadcast_polling_rate: DEFAULT_BROADCAST_POLLING_RATE,
            broadcast_timeout: DEFAULT_BROADCAST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_simulated_gas_multiplier(mut self, simulated_gas_multiplier: GasAdjustment) -> Self {
        self.simulated_gas_multiplier = simulated_gas_multiplier;
        self
    }

    #[must_use]
    pub fn with_broadcast_polling_rate(mut self, broadcast_polling_rate: Duration) -> Self {
        self.broadcast_polling_rate = broadcast_polling_rate;
        self
    }

    #[must_use]
    pub fn with_broadcast_timeout(mut self, broadcast_timeout: Duration) -> Self {
        self.broadcast_timeout = broadcast_timeout;
        self
    }

    pub fn bech32_prefix(&self) -> &str {
        &self.bech32_prefix
    }
}

/// Signing client bound to a single rpc endpoint and a single signer.
#[derive(Debug)]
pub struct ChainClient<C, S> {
    client: C,
    signer: S,
    config: Config,
    contracts: StakingContracts,
}

impl ChainClient<HttpClient, DirectSecp256k1HdWallet> {
    pub fn connect_with_mnemonic<U>(
        config: Config,
        endpoint: U,
        mnemonic: bip39::Mnemonic,
    ) -> Result<Self, ChainClientError>
    where
        U: TryInto<HttpClientUrl, Error = TendermintRpcError>,
    {
        let client = HttpClient::new(endpoint)?;
        let wallet = DirectSecp256k1HdWallet::from_mnemonic(&config.bech32_prefix, mnemonic);

        Ok(ChainClient::new_signing(config, client, wallet))
    }
}

impl<C, S> ChainClient<C, S> {
    pub fn new_signing(config: Config, client: C, signer: S) -> Self {
        debug!(
            "creating signing client with gas price {} and gas multiplier {}",
            config.gas_price, config.simulated_gas_multiplier
        );

        ChainClient {
            client,
            signer,
            config,
            contracts: StakingContracts::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<C, S> StakingContractsProvider for ChainClient<C, S> {
    fn nft_contract_address(&self) -> Option<&AccountId> {
        self.contracts.nft_contract_address.as_ref()
    }

    fn staking_contract_address(&self) -> Option<&AccountId> {
        self.contracts.staking_contract_address.as_ref()
    }

    fn set_nft_contract_address(&mut self, address: AccountId) {
        self.contracts.nft_contract_address = Some(address)
    }

    fn set_staking_contract_address(&mut self, address: AccountId) {
        self.contracts.staking_contract_address = Some(address)
    }
}

impl<C, S> OfflineSigner for ChainClient<C, S>
where
    S: OfflineSigner,
{
    fn get_accounts(&self) -> Result<Vec<AccountData>, SigningError> {
        self.signer.get_accounts()
    }

    fn sign_direct_with_account(
        &self,
        signer: &AccountData,
        sign_doc: SignDoc,
    ) -> Result<Raw, SigningError> {
        self.signer.sign_direct_with_account(signer, sign_doc)
    }
}

#[async_trait]
impl<C, S> tendermint_rpc::Client for ChainClient<C, S>
where
    C: tendermint_rpc::Client + Send + Sync,
    S: Send + Sync,
{
    async fn abci_query<V>(
        &self,
        path: Option<String>,
        data: V,
        height: Option<Height>,
        prove: bool,
    ) -> Result<abci_query::AbciQuery, TendermintRpcError>
    where
        V: Into<Vec<u8>> + Send,
    {
        self.client.abci_query(path, data, height, prove).await
    }

    async fn broadcast_tx_sync<T>(
        &self,
        tx: T,
    ) -> Result<broadcast::tx_sync::Response, TendermintRpcError>
    where
        T: Into<Vec<u8>> + Send,
    {
        self.client.broadcast_tx_sync(tx).await
    }

    async fn status(&self) -> Result<status::Response, TendermintRpcError> {
        self.client.status().await
    }

    async fn tx(&self, hash: Hash, prove: bool) -> Result<tx::Response, TendermintRpcError> {
        self.client.tx(hash, prove).await
    }

    async fn perform<R>(&self, request: R) -> Result<R::Output, TendermintRpcError>
    where
        R: SimpleRequest,
    {
        self.client.perform(request).await
    }
}

impl<C, S> SigningCosmWasmClient for ChainClient<C, S>
where
    C: tendermint_rpc::Client + Send + Sync,
    S: OfflineSigner + Send + Sync,
{
    fn gas_price(&self) -> &GasPrice {
        &self.config.gas_price
    }

    fn simulated_gas_multiplier(&self) -> GasAdjustment {
        self.config.simulated_gas_multiplier
    }

    fn broadcast_polling_rate(&self) -> Duration {
        self.config.broadcast_polling_rate
    }

    fn broadcast_timeout(&self) -> Duration {
        self.config.broadcast_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_client() -> ChainClient<HttpClient, DirectSecp256k1HdWallet> {
        let config = Config::new("neutron", "0.025untrn".parse().unwrap());
        ChainClient::connect_with_mnemonic(
            config,
            "https://rpc-palvus.pion-1.ntrn.tech",
            bip39::Mnemonic::parse(TEST_MNEMONIC).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn client_exposes_signer_address() {
        let client = test_client();
        let address = client.signer_address().unwrap();
        assert_eq!(address.prefix(), "neutron");
        assert_eq!(client.signer_addresses().unwrap(), vec![address]);
    }

    #[test]
    fn contract_addresses_are_unset_until_provided() {
        let mut client = test_client();
        assert!(client.nft_contract_address().is_none());
        assert!(client.staking_contract_address().is_none());

        let staking = AccountId::new("neutron", &[3u8; 32]).unwrap();
        client.set_staking_contract_address(staking.clone());
        assert_eq!(client.staking_contract_address(), Some(&staking));
        assert!(client.nft_contract_address().is_none());
    }

    #[test]
    fn default_config_values() {
        let config = Config::new("neutron", "0.025untrn".parse().unwrap());
        assert_eq!(config.simulated_gas_multiplier, 1.5);
        assert_eq!(config.broadcast_polling_rate, Duration::from_secs(4));
        assert_eq!(config.broadcast_timeout, Duration::from_secs(60));
        assert_eq!(config.bech32_prefix(), "neutron");
    }
}
