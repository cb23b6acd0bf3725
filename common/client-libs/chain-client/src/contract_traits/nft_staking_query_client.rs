// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::contract_traits::{StakingContractsProvider, STAKING_CONTRACT_NAME};
use crate::cosmwasm_client::CosmWasmClient;
use crate::error::ChainClientError;
use async_trait::async_trait;
use nft_staking_contract_common::{
    AdminAddressResponse, QueryMsg as NftStakingQueryMsg, StakingsResponse,
    WhitelistedNftAddressesResponse,
};
use serde::Deserialize;

#[async_trait]
pub trait NftStakingQueryClient {
    async fn query_nft_staking_contract<T>(
        &self,
        query: NftStakingQueryMsg,
    ) -> Result<T, ChainClientError>
    where
        for<'a> T: Deserialize<'a>;

    async fn get_whitelisted_nft_addresses(
        &self,
    ) -> Result<WhitelistedNftAddressesResponse, ChainClientError> {
        self.query_nft_staking_contract(NftStakingQueryMsg::WhitelistedNftAddresses {})
            .await
    }

    async fn get_admin_address(&self) -> Result<AdminAddressResponse, ChainClientError> {
        self.query_nft_staking_contract(NftStakingQueryMsg::AdminAddress {})
            .await
    }

    async fn get_stakings_by_address(
        &self,
        address: String,
    ) -> Result<StakingsResponse, ChainClientError> {
        self.query_nft_staking_contract(NftStakingQueryMsg::StakingsByAddress { address })
            .await
    }
}

#[async_trait]
impl<C> NftStakingQueryClient for C
where
    C: CosmWasmClient + StakingContractsProvider + Sync,
{
    async fn query_nft_staking_contract<T>(
        &self,
        query: NftStakingQueryMsg,
    ) -> Result<T, ChainClientError>
    where
        for<'a> T: Deserialize<'a>,
    {
        let staking_contract_address = self
            .staking_contract_address()
            .ok_or_else(|| ChainClientError::unavailable_contract_address(STAKING_CONTRACT_NAME))?;
        self.query_contract_smart(staking_contract_address, &query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_traits::tests::{IgnoreValue, RecordingClient};
    use serde_json::json;

    #[async_trait]
    impl NftStakingQueryClient for RecordingClient {
        async fn query_nft_staking_contract<T>(
            &self,
            query: NftStakingQueryMsg,
        ) -> Result<T, ChainClientError>
        where
            for<'a> T: Deserialize<'a>,
        {
            self.record_query(&query)
        }
    }

    // it's enough that this compiles and clippy is happy about it
    #[allow(dead_code)]
    fn all_query_variants_are_covered<C: NftStakingQueryClient + Send + Sync>(
        client: C,
        msg: NftStakingQueryMsg,
    ) {
        match msg {
            NftStakingQueryMsg::WhitelistedNftAddresses {} => {
                client.get_whitelisted_nft_addresses().ignore()
            }
            NftStakingQueryMsg::AdminAddress {} => client.get_admin_address().ignore(),
            NftStakingQueryMsg::StakingsByAddress { address } => {
                client.get_stakings_by_address(address).ignore()
            }
        };
    }

    #[tokio::test]
    async fn whitelist_query() {
        let client = RecordingClient::with_query_response(
            json!({"nft_addrs": ["neutron1first", "neutron1second"]}),
        );

        let res = client.get_whitelisted_nft_addresses().await.unwrap();
        assert_eq!(
            client.last_query(),
            json!({"whitelisted_nft_addresses": {}})
        );
        assert!(res.contains("neutron1second"));
        assert!(!res.contains("neutron1third"));
    }

    #[tokio::test]
    async fn stakings_query() {
        let client = RecordingClient::with_query_response(json!({
            "stakings": [{
                "nft_addr": "neutron1nft",
                "token_id": "send_try",
                "sender": "neutron1owner",
                "start_timestamp": "1700000000000000000",
                "end_timestamp": "0",
                "is_burned_by_admin": false
            }]
        }));

        let res = client
            .get_stakings_by_address("neutron1owner".to_string())
            .await
            .unwrap();
        assert_eq!(
            client.last_query(),
            json!({"stakings_by_address": {"address": "neutron1owner"}})
        );
        assert_eq!(res.index_of("send_try"), Some(0));
    }

    #[tokio::test]
    async fn admin_query() {
        let client = RecordingClient::with_query_response(json!({"admin": "neutron1admin"}));
        let res = client.get_admin_address().await.unwrap();
        assert_eq!(client.last_query(), json!({"admin_address": {}}));
        assert_eq!(res.admin, "neutron1admin");
    }
}
