// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

// not every test binary uses every helper
#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use cw721_contract_common::{
    Cw721ReceiveMsg, ExecuteMsg as Cw721ExecuteMsg, QueryMsg as Cw721QueryMsg, TokensResponse,
};
use nft_staking_chain_client::contract_traits::{
    ContractDeployer, Cw721QueryClient, Cw721SigningClient, NftStakingQueryClient,
    NftStakingSigningClient, StakingContractsProvider,
};
use nft_staking_chain_client::cosmwasm_client::types::{
    ContractCodeId, ExecuteResult, GasInfo, InstantiateResult, UploadResult,
};
use nft_staking_chain_client::{AccountId, ChainClientError, Coin, Event, Fee, Hash, Height};
use nft_staking_contract_common::{
    AdminAddressResponse, ExecuteMsg as NftStakingExecuteMsg, QueryMsg as NftStakingQueryMsg,
    Staking, StakingsResponse, Timestamp, WhitelistedNftAddressesResponse,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

pub const TEST_BLOCK_TIME_SECS: u64 = 6;
pub const FIRST_FREE_CODE_ID: ContractCodeId = 3472;

pub fn test_address(seed: u8) -> AccountId {
    AccountId::new("neutron", &[seed; 32]).unwrap()
}

#[derive(Default)]
struct ChainState {
    height: u32,
    block_time: u64,
    next_code_id: ContractCodeId,
    instantiated_contracts: u8,

    // cw721 state
    owners: BTreeMap<String, String>,

    // staking contract state
    admin: Option<String>,
    whitelist: Vec<String>,
    stakings: BTreeMap<String, Vec<Staking>>,

    memos: Vec<String>,
    fail_on_memo: Option<String>,
}

impl ChainState {
    fn next_block(&mut self) -> Height {
        self.height += 1;
        self.block_time += TEST_BLOCK_TIME_SECS;
        Height::from(self.height)
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_seconds(self.block_time)
    }

    fn new_contract_address(&mut self) -> AccountId {
        self.instantiated_contracts += 1;
        test_address(100 + self.instantiated_contracts)
    }
}

fn rejected<S: Into<String>>(height: Height, raw_log: S) -> ChainClientError {
    ChainClientError::BroadcastTxErrorDeliverTx {
        hash: Hash::None,
        height: Some(height),
        code: 5,
        raw_log: raw_log.into(),
    }
}

fn executed(height: Height, events: Vec<Event>) -> ExecuteResult {
    ExecuteResult {
        logs: vec![],
        events,
        transaction_hash: Hash::None,
        height,
        gas_info: GasInfo::new(200_000, 150_000),
    }
}

fn respond<R: Serialize, T: for<'a> Deserialize<'a>>(response: R) -> Result<T, ChainClientError> {
    Ok(serde_json::from_value(serde_json::to_value(response)?)?)
}

/// In-memory stand-in for a chain running the cw721 and the staking contracts
/// with the semantics of their real implementations. Executions emit the staking contract's custom events.
pub struct MockChain {
    sender: AccountId,
    unbonding_period_secs: u64,
    nft_contract_address: Option<AccountId>,
    staking_contract_address: Option<AccountId>,
    state: Mutex<ChainState>,
}

impl MockChain {
    pub fn new(sender: AccountId) -> Self {
        MockChain {
            sender,
            unbonding_period_secs: 0,
            nft_contract_address: None,
            staking_contract_address: None,
            state: Mutex::new(ChainState {
                block_time: 1_700_000_000,
                next_code_id: FIRST_FREE_CODE_ID,
                ..Default::default()
            }),
        }
    }

    pub fn with_unbonding_period(mut self, unbonding_period_secs: u64) -> Self {
        self.unbonding_period_secs = unbonding_period_secs;
        self
    }

    /// Makes every transaction with the given memo get rejected.
    pub fn failing_on<S: Into<String>>(self, memo: S) -> Self {
        self.state.lock().unwrap().fail_on_memo = Some(memo.into());
        self
    }

    pub fn sender(&self) -> &AccountId {
        &self.sender
    }

    pub fn memos(&self) -> Vec<String> {
        self.state.lock().unwrap().memos.clone()
    }

    pub fn owner_of(&self, token_id: &str) -> Option<String> {
        self.state.lock().unwrap().owners.get(token_id).cloned()
    }

    fn begin_tx(&self, memo: &str) -> Result<(MutexGuard<'_, ChainState>, Height), ChainClientError> {
        let mut state = self.state.lock().unwrap();
        let height = state.next_block();
        state.memos.push(memo.to_string());
        if state.fail_on_memo.as_deref() == Some(memo) {
            return Err(rejected(height, "out of gas"));
        }
        Ok((state, height))
    }

    fn staking_contract(&self) -> Result<String, ChainClientError> {
        self.staking_contract_address
            .as_ref()
            .map(ToString::to_string)
            .ok_or_else(|| ChainClientError::unavailable_contract_address("nft staking"))
    }

    fn nft_contract(&self) -> Result<String, ChainClientError> {
        self.nft_contract_address
            .as_ref()
            .map(ToString::to_string)
            .ok_or_else(|| ChainClientError::unavailable_contract_address("cw721 nft"))
    }

    // the receiver hook of the staking contract, invoked by the nft contract
    fn receive_nft(
        &self,
        state: &mut ChainState,
        height: Height,
        nft_addr: String,
        receive_msg: Cw721ReceiveMsg,
    ) -> Result<Event, ChainClientError> {
        if !state.whitelist.contains(&nft_addr) {
            return Err(rejected(height, "Already a whitelisted collection"));
        }
        let now = state.now();
        let event = Event::new(
            "wasm-staked",
            [
                ("nft_address", nft_addr.clone()),
                ("token_id", receive_msg.token_id.clone()),
                ("sender", receive_msg.sender.clone()),
                ("start_timestamp", now.to_string()),
            ],
        );
        state
            .stakings
            .entry(receive_msg.sender.clone())
            .or_default()
            .push(Staking {
                nft_addr,
                token_id: receive_msg.token_id,
                sender: receive_msg.sender,
                start_timestamp: now,
                end_timestamp: Timestamp::from_nanos(0),
                is_burned_by_admin: false,
            });
        Ok(event)
    }
}

impl StakingContractsProvider for MockChain {
    fn nft_contract_address(&self) -> Option<&AccountId> {
        self.nft_contract_address.as_ref()
    }

    fn staking_contract_address(&self) -> Option<&AccountId> {
        self.staking_contract_address.as_ref()
    }

    fn set_nft_contract_address(&mut self, address: AccountId) {
        self.nft_contract_address = Some(address)
    }

    fn set_staking_contract_address(&mut self, address: AccountId) {
        self.staking_contract_address = Some(address)
    }
}

#[async_trait]
impl ContractDeployer for MockChain {
    fn deployer_address(&self) -> Result<AccountId, ChainClientError> {
        Ok(self.sender.clone())
    }

    async fn upload_contract(
        &self,
        wasm_code: Vec<u8>,
        _fee: Option<Fee>,
    ) -> Result<UploadResult, ChainClientError> {
        let (mut state, height) = self.begin_tx("Storing contract code")?;
        if wasm_code.is_empty() {
            return Err(rejected(height, "Empty wasm code"));
        }

        let code_id = state.next_code_id;
        state.next_code_id += 1;

        Ok(UploadResult {
            original_size: wasm_code.len(),
            original_checksum: vec![0xaa; 32],
            compressed_size: wasm_code.len() / 2,
            compressed_checksum: vec![0xbb; 32],
            code_id,
            logs: vec![],
            transaction_hash: Hash::None,
            height,
            gas_info: GasInfo::new(2_000_000, 1_500_000),
        })
    }

    async fn instantiate_contract<M>(
        &self,
        code_id: ContractCodeId,
        msg: &M,
        label: String,
        _admin: Option<AccountId>,
        _fee: Option<Fee>,
    ) -> Result<InstantiateResult, ChainClientError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let msg = serde_json::to_value(msg)?;
        let (mut state, height) = self.begin_tx(&format!("Instantiating {label}"))?;
        if code_id == 0 {
            return Err(rejected(height, "no such code: 0"));
        }

        let contract_address = state.new_contract_address();
        if let Some(nft_addr) = msg.get("nft_addr").and_then(|addr| addr.as_str()) {
            let admin = msg
                .get("admin")
                .and_then(|admin| admin.as_str())
                .map(ToString::to_string)
                .unwrap_or_else(|| self.sender.to_string());
            state.admin = Some(admin);
            state.whitelist = vec![nft_addr.to_string()];
        } else if msg.get("minter").is_none() {
            return Err(rejected(height, "unknown instantiate message"));
        }

        Ok(InstantiateResult {
            contract_address,
            logs: vec![],
            transaction_hash: Hash::None,
            height,
            gas_info: GasInfo::new(300_000, 250_000),
        })
    }
}

#[async_trait]
impl Cw721SigningClient for MockChain {
    async fn execute_cw721_contract(
        &self,
        _fee: Option<Fee>,
        msg: Cw721ExecuteMsg,
        memo: String,
        _funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError> {
        let nft_contract = self.nft_contract()?;
        let (mut state, height) = self.begin_tx(&memo)?;
        let sender = self.sender.to_string();
        let mut events = Vec::new();

        match msg {
            Cw721ExecuteMsg::Mint {
                token_id, owner, ..
            } => {
                if state.owners.contains_key(&token_id) {
                    return Err(rejected(height, "token_id already claimed"));
                }
                state.owners.insert(token_id, owner);
            }
            Cw721ExecuteMsg::SendNft {
                contract,
                msg,
                token_id,
            } => {
                if state.owners.get(&token_id) != Some(&sender) {
                    return Err(rejected(height, "Caller is not the token owner"));
                }
                if self.staking_contract().ok().as_ref() == Some(&contract) {
                    let receive_msg = Cw721ReceiveMsg {
                        sender: sender.clone(),
                        token_id: token_id.clone(),
                        msg,
                    };
                    events.push(self.receive_nft(&mut state, height, nft_contract, receive_msg)?);
                }
                state.owners.insert(token_id, contract);
            }
            Cw721ExecuteMsg::TransferNft {
                recipient,
                token_id,
            } => {
                if state.owners.get(&token_id) != Some(&sender) {
                    return Err(rejected(height, "Caller is not the token owner"));
                }
                state.owners.insert(token_id, recipient);
            }
            Cw721ExecuteMsg::Burn { token_id } => {
                if state.owners.remove(&token_id).is_none() {
                    return Err(rejected(height, "token not found"));
                }
            }
        }

        Ok(executed(height, events))
    }
}

#[async_trait]
impl Cw721QueryClient for MockChain {
    async fn query_cw721_contract<T>(&self, query: Cw721QueryMsg) -> Result<T, ChainClientError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.nft_contract()?;
        let state = self.state.lock().unwrap();

        match query {
            Cw721QueryMsg::Tokens { owner, .. } => respond(TokensResponse {
                tokens: state
                    .owners
                    .iter()
                    .filter(|(_, token_owner)| **token_owner == owner)
                    .map(|(token_id, _)| token_id.clone())
                    .collect(),
            }),
        }
    }
}

#[async_trait]
impl NftStakingSigningClient for MockChain {
    async fn execute_nft_staking_contract(
        &self,
        _fee: Option<Fee>,
        msg: NftStakingExecuteMsg,
        memo: String,
        _funds: Vec<Coin>,
    ) -> Result<ExecuteResult, ChainClientError> {
        let staking_contract = self.staking_contract()?;
        let (mut state, height) = self.begin_tx(&memo)?;
        let sender = self.sender.to_string();
        let now = state.now();
        let is_admin = state.admin.as_deref() == Some(sender.as_str());

        let event = match msg {
            NftStakingExecuteMsg::ReceiveNft(_) => {
                return Err(rejected(height, "Already a whitelisted collection"))
            }
            NftStakingExecuteMsg::Unstake { index } => {
                let unbonding_period = self.unbonding_period_secs;
                let record = state
                    .stakings
                    .get_mut(&sender)
                    .and_then(|stakings| stakings.get_mut(index as usize))
                    .ok_or_else(|| rejected(height, "index out of bounds"))?;
                if record.end_timestamp != Timestamp::from_nanos(0) {
                    return Err(rejected(height, "Already unstaked"));
                }
                if record.is_burned_by_admin {
                    return Err(rejected(height, "Staked Token Is Burned By Admin"));
                }
                record.end_timestamp = now.plus_seconds(unbonding_period);
                stake_event("wasm-unstaked", record, index)
            }
            NftStakingExecuteMsg::Claim { index } => {
                let record = state
                    .stakings
                    .get(&sender)
                    .and_then(|stakings| stakings.get(index as usize))
                    .cloned()
                    .ok_or_else(|| rejected(height, "index out of bounds"))?;
                if record.is_burned_by_admin {
                    return Err(rejected(height, "Staked Token Is Burned By Admin"));
                }
                if !record.is_claimable_at(now) {
                    return Err(rejected(
                        height,
                        format!("Unbounding at(will_finish: {})", record.end_timestamp),
                    ));
                }
                // the transfer back is sent by the staking contract
                if state.owners.get(&record.token_id) != Some(&staking_contract) {
                    return Err(rejected(height, "Caller is not the token owner"));
                }
                state.owners.insert(record.token_id.clone(), sender);
                stake_event("wasm-Claimed", &record, index)
            }
            NftStakingExecuteMsg::AdminBurn { index } => {
                if !is_admin {
                    return Err(rejected(height, "Unauthorized"));
                }
                let record = state
                    .stakings
                    .get(&sender)
                    .and_then(|stakings| stakings.get(index as usize))
                    .cloned()
                    .ok_or_else(|| rejected(height, "index out of bounds"))?;
                // the cw721 burn is sent by the staking contract, which must still hold the token
                if state.owners.get(&record.token_id) != Some(&staking_contract) {
                    return Err(rejected(height, "Caller is not the token owner"));
                }
                state.owners.remove(&record.token_id);
                if let Some(stored) = state
                    .stakings
                    .get_mut(&sender)
                    .and_then(|stakings| stakings.get_mut(index as usize))
                {
                    stored.is_burned_by_admin = true;
                }
                stake_event("wasm-Burned By Admin", &record, index)
            }
            NftStakingExecuteMsg::AddCollection { nft_addr } => {
                if !is_admin {
                    return Err(rejected(height, "Unauthorized"));
                }
                if state.whitelist.contains(&nft_addr) {
                    return Err(rejected(height, "Already a whitelisted collection"));
                }
                state.whitelist.push(nft_addr.clone());
                Event::new("wasm-Collection added", [("nft_addr", nft_addr)])
            }
            NftStakingExecuteMsg::RemoveCollection { nft_addr } => {
                if !is_admin {
                    return Err(rejected(height, "Unauthorized"));
                }
                let Some(position) = state.whitelist.iter().position(|addr| *addr == nft_addr)
                else {
                    return Err(rejected(height, "Not whitelisted collection"));
                };
                state.whitelist.remove(position);
                Event::new("wasm-Collection removed", [("nft_addr", nft_addr)])
            }
        };

        Ok(executed(height, vec![event]))
    }
}

fn stake_event(kind: &str, record: &Staking, index: u64) -> Event {
    Event::new(
        kind,
        [
            ("nft_addr", record.nft_addr.clone()),
            ("token_id", record.token_id.clone()),
            ("index", index.to_string()),
        ],
    )
}

#[async_trait]
impl NftStakingQueryClient for MockChain {
    async fn query_nft_staking_contract<T>(
        &self,
        query: NftStakingQueryMsg,
    ) -> Result<T, ChainClientError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.staking_contract()?;
        let state = self.state.lock().unwrap();

        match query {
            NftStakingQueryMsg::WhitelistedNftAddresses {} => {
                respond(WhitelistedNftAddressesResponse {
                    nft_addrs: state.whitelist.clone(),
                })
            }
            NftStakingQueryMsg::AdminAddress {} => respond(AdminAddressResponse {
                admin: state.admin.clone().unwrap_or_default(),
            }),
            NftStakingQueryMsg::StakingsByAddress { address } => respond(StakingsResponse {
                stakings: state.stakings.get(&address).cloned().unwrap_or_default(),
            }),
        }
    }
}
