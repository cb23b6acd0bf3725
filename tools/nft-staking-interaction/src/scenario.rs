// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use crate::error::InteractionError;
use crate::helpers::wasm_code;
use crate::report::{
    ContractEvent, ExpectationCheck, FailureReport, ScenarioReport, Step, StepOutcome, StepReport,
};
use cw721_contract_common::{
    Binary, ExecuteMsg as Cw721ExecuteMsg, InstantiateMsg as Cw721InstantiateMsg, Metadata,
    QueryMsg as Cw721QueryMsg, TokenId,
};
use nft_staking_chain_client::contract_traits::{
    ContractDeployer, Cw721QueryClient, Cw721SigningClient, NftStakingQueryClient,
    NftStakingSigningClient, StakingContractsProvider,
};
use nft_staking_chain_client::cosmwasm_client::types::{ContractCodeId, ExecuteResult};
use nft_staking_chain_client::{AccountId, ChainClientError};
use nft_staking_contract_common::events::{
    BURNED_BY_ADMIN_EVENT_TYPE, CLAIMED_EVENT_TYPE, COLLECTION_ADDED_EVENT_TYPE,
    COLLECTION_REMOVED_EVENT_TYPE, INDEX_KEY, NFT_ADDRESS_KEY, SENDER_KEY, STAKED_EVENT_TYPE,
    STAKED_NFT_ADDRESS_KEY, TOKEN_ID_KEY, UNSTAKED_EVENT_TYPE,
};
use nft_staking_contract_common::{
    ExecuteMsg as NftStakingExecuteMsg, InstantiateMsg as NftStakingInstantiateMsg,
    QueryMsg as NftStakingQueryMsg, StakeIndex,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Everything the scenario needs from the chain: deploying contracts and talking to both of them.
pub trait InteractionClient:
    ContractDeployer
    + Cw721SigningClient
    + Cw721QueryClient
    + NftStakingSigningClient
    + NftStakingQueryClient
    + StakingContractsProvider
    + Send
    + Sync
{
}

impl<C> InteractionClient for C where
    C: ContractDeployer
        + Cw721SigningClient
        + Cw721QueryClient
        + NftStakingSigningClient
        + NftStakingQueryClient
        + StakingContractsProvider
        + Send
        + Sync
{
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingCode {
    /// Upload the contract code found at the path.
    Upload(PathBuf),

    /// Reuse code that has already been stored on chain.
    Existing(ContractCodeId),
}

#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub staking_code: StakingCode,
    pub nft_code_id: ContractCodeId,
    pub nft_contract_address: Option<AccountId>,

    pub token_id: TokenId,
    pub token_metadata: Metadata,
    pub stake_index: StakeIndex,
    pub secondary_collection: String,

    pub nft_name: String,
    pub nft_symbol: String,
    pub nft_label: String,
    pub staking_label: String,
}

impl TryFrom<&Config> for ScenarioParams {
    type Error = InteractionError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        let staking_code = match config.contracts.staking_code_id {
            Some(code_id) => StakingCode::Existing(code_id),
            None => StakingCode::Upload(config.contracts.staking_wasm_path.clone()),
        };

        Ok(ScenarioParams {
            staking_code,
            nft_code_id: config.contracts.nft_code_id,
            nft_contract_address: config.contracts.nft_contract_address()?,
            token_id: config.scenario.token_id.clone(),
            token_metadata: Metadata::new(
                &config.scenario.token_name,
                &config.scenario.token_description,
            ),
            stake_index: config.scenario.stake_index,
            secondary_collection: config.scenario.secondary_collection.clone(),
            nft_name: config.scenario.nft_name.clone(),
            nft_symbol: config.scenario.nft_symbol.clone(),
            nft_label: config.scenario.nft_label.clone(),
            staking_label: config.scenario.staking_label.clone(),
        })
    }
}

/// Custom event the staking contract should emit for a message, with the attribute values it should carry.
struct ExpectedEvent {
    kind: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl ExpectedEvent {
    fn new(kind: &'static str) -> Self {
        ExpectedEvent {
            kind,
            attributes: Vec::new(),
        }
    }

    fn with_attribute(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    fn matches(&self, event: &ContractEvent) -> bool {
        self.attributes
            .iter()
            .all(|(key, value)| event.attribute(key) == Some(value.as_str()))
    }
}

impl Display for ExpectedEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a '{}' event was emitted", self.kind)?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            let separator = if i == 0 { " with" } else { "," };
            write!(f, "{separator} {key} = {value}")?;
        }
        Ok(())
    }
}

fn payload<M: ?Sized + Serialize>(step: Step, msg: &M) -> Result<Value, InteractionError> {
    serde_json::to_value(msg)
        .map_err(|source| InteractionError::PayloadSerializationFailure { step, source })
}

fn step_failure(step: Step, payload: &Value) -> impl FnOnce(ChainClientError) -> InteractionError {
    let payload = payload.clone();
    move |source| InteractionError::StepFailure {
        step,
        payload,
        source,
    }
}

/// The fixed sequence of operations deploying the staking contract and exercising its whole api.
/// Steps run strictly one after another and the first failure aborts the remaining ones.
pub struct Scenario<C> {
    client: C,
    params: ScenarioParams,
    report: ScenarioReport,
    current_step: Option<Step>,
}

impl<C> Scenario<C>
where
    C: InteractionClient,
{
    pub fn new(client: C, params: ScenarioParams) -> Self {
        Scenario {
            client,
            params,
            report: ScenarioReport::default(),
            current_step: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn report(&self) -> &ScenarioReport {
        &self.report
    }

    pub fn into_parts(self) -> (C, ScenarioReport) {
        (self.client, self.report)
    }

    /// Executes every step in order. Reports of the completed steps are kept even if one of them fails.
    pub async fn run(&mut self) -> Result<(), InteractionError> {
        let res = self.execute_steps().await;
        if let Err(err) = &res {
            error!("aborting the interaction scenario: {err}");
            self.report.failure = Some(FailureReport::new(self.current_step, err));
        }
        res
    }

    async fn execute_steps(&mut self) -> Result<(), InteractionError> {
        let sender = self.create_wallet()?;
        let staking_code_id = self.upload_staking_code().await?;
        let nft_contract = self.instantiate_nft(&sender).await?;
        let staking_contract = self
            .instantiate_staking(&sender, staking_code_id, &nft_contract)
            .await?;

        self.mint(&sender).await?;
        self.send_nft(&sender, &nft_contract, &staking_contract)
            .await?;
        self.unstake().await?;
        self.claim().await?;
        self.query_tokens(&sender).await?;

        let secondary = self.params.secondary_collection.clone();
        self.query_whitelist(Step::QueryWhitelistBefore, &nft_contract.to_string(), true)
            .await?;
        self.add_collection().await?;
        self.query_whitelist(Step::QueryWhitelistAfterAdd, &secondary, true)
            .await?;
        self.remove_collection().await?;
        self.query_whitelist(Step::QueryWhitelistAfterRemove, &secondary, false)
            .await?;

        self.query_stakings(&sender).await?;
        self.query_admin(&sender).await?;
        self.admin_burn().await
    }

    fn begin(&mut self, step: Step) {
        info!("executing '{step}'");
        self.current_step = Some(step);
    }

    fn record(&mut self, step: Step, payload: Value, outcome: StepOutcome) {
        info!("'{step}' done. {outcome}");
        self.report.steps.push(StepReport {
            step,
            payload,
            outcome,
        })
    }

    fn check(&mut self, after: Step, description: String, satisfied: bool) {
        if !satisfied {
            warn!("unexpected state after '{after}': {description} does not hold");
        }
        self.report.checks.push(ExpectationCheck {
            after,
            description,
            satisfied,
        })
    }

    fn record_execution(
        &mut self,
        step: Step,
        payload: Value,
        res: &ExecuteResult,
        expected: ExpectedEvent,
    ) {
        let event = ContractEvent::find(&res.events, expected.kind);
        let satisfied = event.as_ref().is_some_and(|event| expected.matches(event));

        self.record(step, payload, StepOutcome::executed(res, event));
        self.check(step, expected.to_string(), satisfied);
    }

    fn record_query<T: Serialize>(
        &mut self,
        step: Step,
        payload: Value,
        response: &T,
    ) -> Result<(), InteractionError> {
        let response = serde_json::to_value(response)
            .map_err(|source| InteractionError::PayloadSerializationFailure { step, source })?;
        self.record(step, payload, StepOutcome::Queried { response });
        Ok(())
    }

    // events of the stake record operations identify the record by its index and token
    fn expected_stake_event(&self, kind: &'static str, index: StakeIndex) -> ExpectedEvent {
        ExpectedEvent::new(kind)
            .with_attribute(TOKEN_ID_KEY, &self.params.token_id)
            .with_attribute(INDEX_KEY, index)
    }

    fn create_wallet(&mut self) -> Result<AccountId, InteractionError> {
        let step = Step::CreateWallet;
        self.begin(step);

        let sender = self
            .client
            .deployer_address()
            .map_err(step_failure(step, &Value::Null))?;

        self.report.sender = Some(sender.to_string());
        self.record(
            step,
            Value::Null,
            StepOutcome::Wallet {
                address: sender.to_string(),
            },
        );
        Ok(sender)
    }

    async fn upload_staking_code(&mut self) -> Result<ContractCodeId, InteractionError> {
        let step = Step::UploadStakingCode;
        self.begin(step);

        let code_id = match self.params.staking_code.clone() {
            StakingCode::Existing(code_id) => {
                self.record(
                    step,
                    serde_json::json!({ "code_id": code_id }),
                    StepOutcome::Skipped {
                        reason: format!("using already stored code {code_id}"),
                    },
                );
                code_id
            }
            StakingCode::Upload(path) => {
                let payload = serde_json::json!({ "wasm_path": path.display().to_string() });
                let wasm = wasm_code(&path)?;

                let res = self
                    .client
                    .upload_contract(wasm, None)
                    .await
                    .map_err(step_failure(step, &payload))?;
                self.record(step, payload, StepOutcome::uploaded(&res));
                res.code_id
            }
        };

        self.report.staking_code_id = Some(code_id);
        Ok(code_id)
    }

    async fn instantiate_nft(&mut self, sender: &AccountId) -> Result<AccountId, InteractionError> {
        let step = Step::InstantiateNft;
        self.begin(step);

        let nft_contract = match self.params.nft_contract_address.clone() {
            Some(address) => {
                self.record(
                    step,
                    serde_json::json!({ "contract_address": address.to_string() }),
                    StepOutcome::Skipped {
                        reason: format!("using existing collection {address}"),
                    },
                );
                address
            }
            None => {
                let msg = Cw721InstantiateMsg {
                    minter: sender.to_string(),
                    name: self.params.nft_name.clone(),
                    symbol: self.params.nft_symbol.clone(),
                };
                let payload = payload(step, &msg)?;

                let res = self
                    .client
                    .instantiate_contract(
                        self.params.nft_code_id,
                        &msg,
                        self.params.nft_label.clone(),
                        None,
                        None,
                    )
                    .await
                    .map_err(step_failure(step, &payload))?;
                self.record(step, payload, StepOutcome::instantiated(&res));
                res.contract_address
            }
        };

        self.client.set_nft_contract_address(nft_contract.clone());
        self.report.nft_contract_address = Some(nft_contract.to_string());
        Ok(nft_contract)
    }

    async fn instantiate_staking(
        &mut self,
        sender: &AccountId,
        code_id: ContractCodeId,
        nft_contract: &AccountId,
    ) -> Result<AccountId, InteractionError> {
        let step = Step::InstantiateStaking;
        self.begin(step);

        let msg = NftStakingInstantiateMsg {
            admin: Some(sender.to_string()),
            nft_addr: nft_contract.to_string(),
        };
        let payload = payload(step, &msg)?;

        let res = self
            .client
            .instantiate_contract(code_id, &msg, self.params.staking_label.clone(), None, None)
            .await
            .map_err(step_failure(step, &payload))?;
        self.record(step, payload, StepOutcome::instantiated(&res));

        let staking_contract = res.contract_address;
        self.client
            .set_staking_contract_address(staking_contract.clone());
        self.report.staking_contract_address = Some(staking_contract.to_string());
        Ok(staking_contract)
    }

    async fn mint(&mut self, sender: &AccountId) -> Result<(), InteractionError> {
        let step = Step::Mint;
        self.begin(step);

        let token_id = self.params.token_id.clone();
        let extension = self.params.token_metadata.clone();
        let payload = payload(
            step,
            &Cw721ExecuteMsg::Mint {
                token_id: token_id.clone(),
                extension: extension.clone(),
                owner: sender.to_string(),
            },
        )?;

        let res = self
            .client
            .mint(token_id, sender.to_string(), extension, None)
            .await
            .map_err(step_failure(step, &payload))?;
        self.record(step, payload, StepOutcome::executed(&res, None));
        Ok(())
    }

    async fn send_nft(
        &mut self,
        sender: &AccountId,
        nft_contract: &AccountId,
        staking_contract: &AccountId,
    ) -> Result<(), InteractionError> {
        let step = Step::SendNft;
        self.begin(step);

        // the staking contract treats any payload, including an empty one, as a stake request
        let msg = Binary::default();
        let token_id = self.params.token_id.clone();
        let payload = payload(
            step,
            &Cw721ExecuteMsg::SendNft {
                contract: staking_contract.to_string(),
                msg: msg.clone(),
                token_id: token_id.clone(),
            },
        )?;

        let res = self
            .client
            .send_nft(staking_contract.to_string(), token_id.clone(), msg, None)
            .await
            .map_err(step_failure(step, &payload))?;

        let expected = ExpectedEvent::new(STAKED_EVENT_TYPE)
            .with_attribute(STAKED_NFT_ADDRESS_KEY, nft_contract)
            .with_attribute(TOKEN_ID_KEY, token_id)
            .with_attribute(SENDER_KEY, sender);
        self.record_execution(step, payload, &res, expected);
        Ok(())
    }

    async fn unstake(&mut self) -> Result<(), InteractionError> {
        let step = Step::Unstake;
        self.begin(step);

        let index = self.params.stake_index;
        let payload = payload(step, &NftStakingExecuteMsg::Unstake { index })?;

        let res = self
            .client
            .unstake(index, None)
            .await
            .map_err(step_failure(step, &payload))?;

        let expected = self.expected_stake_event(UNSTAKED_EVENT_TYPE, index);
        self.record_execution(step, payload, &res, expected);
        Ok(())
    }

    async fn claim(&mut self) -> Result<(), InteractionError> {
        let step = Step::Claim;
        self.begin(step);

        let index = self.params.stake_index;
        let payload = payload(step, &NftStakingExecuteMsg::Claim { index })?;

        let res = self
            .client
            .claim(index, None)
            .await
            .map_err(step_failure(step, &payload))?;

        let expected = self.expected_stake_event(CLAIMED_EVENT_TYPE, index);
        self.record_execution(step, payload, &res, expected);
        Ok(())
    }

    async fn query_tokens(&mut self, sender: &AccountId) -> Result<(), InteractionError> {
        let step = Step::QueryTokens;
        self.begin(step);

        let payload = payload(step, &Cw721QueryMsg::tokens(sender.to_string()))?;
        let res = self
            .client
            .get_tokens(sender.to_string())
            .await
            .map_err(step_failure(step, &payload))?;
        self.record_query(step, payload, &res)?;

        let token_id = self.params.token_id.clone();
        self.check(
            step,
            format!("token '{token_id}' is owned by {sender} after being claimed"),
            res.contains(&token_id),
        );
        Ok(())
    }

    async fn query_whitelist(
        &mut self,
        step: Step,
        collection: &str,
        expect_listed: bool,
    ) -> Result<(), InteractionError> {
        self.begin(step);

        let payload = payload(step, &NftStakingQueryMsg::WhitelistedNftAddresses {})?;
        let res = self
            .client
            .get_whitelisted_nft_addresses()
            .await
            .map_err(step_failure(step, &payload))?;
        self.record_query(step, payload, &res)?;

        let negation = if expect_listed { "" } else { "not " };
        self.check(
            step,
            format!("collection {collection} is {negation}whitelisted"),
            res.contains(collection) == expect_listed,
        );
        Ok(())
    }

    async fn add_collection(&mut self) -> Result<(), InteractionError> {
        let step = Step::AddCollection;
        self.begin(step);

        let nft_addr = self.params.secondary_collection.clone();
        let payload = payload(
            step,
            &NftStakingExecuteMsg::AddCollection {
                nft_addr: nft_addr.clone(),
            },
        )?;

        let res = self
            .client
            .add_collection(nft_addr.clone(), None)
            .await
            .map_err(step_failure(step, &payload))?;

        let expected =
            ExpectedEvent::new(COLLECTION_ADDED_EVENT_TYPE).with_attribute(NFT_ADDRESS_KEY, nft_addr);
        self.record_execution(step, payload, &res, expected);
        Ok(())
    }

    async fn remove_collection(&mut self) -> Result<(), InteractionError> {
        let step = Step::RemoveCollection;
        self.begin(step);

        let nft_addr = self.params.secondary_collection.clone();
        let payload = payload(
            step,
            &NftStakingExecuteMsg::RemoveCollection {
                nft_addr: nft_addr.clone(),
            },
        )?;

        let res = self
            .client
            .remove_collection(nft_addr.clone(), None)
            .await
            .map_err(step_failure(step, &payload))?;

        let expected = ExpectedEvent::new(COLLECTION_REMOVED_EVENT_TYPE)
            .with_attribute(NFT_ADDRESS_KEY, nft_addr);
        self.record_execution(step, payload, &res, expected);
        Ok(())
    }

    async fn query_stakings(&mut self, sender: &AccountId) -> Result<(), InteractionError> {
        let step = Step::QueryStakings;
        self.begin(step);

        let address = sender.to_string();
        let payload = payload(
            step,
            &NftStakingQueryMsg::StakingsByAddress {
                address: address.clone(),
            },
        )?;
        let res = self
            .client
            .get_stakings_by_address(address)
            .await
            .map_err(step_failure(step, &payload))?;
        self.record_query(step, payload, &res)?;

        let token_id = self.params.token_id.clone();
        let index = self.params.stake_index;
        self.check(
            step,
            format!("{sender} has a stake record of token '{token_id}'"),
            res.index_of(&token_id).is_some(),
        );
        self.check(
            step,
            format!("the stake record at index {index} references token '{token_id}'"),
            res.get(index)
                .is_some_and(|staking| staking.token_id == token_id),
        );
        Ok(())
    }

    async fn query_admin(&mut self, sender: &AccountId) -> Result<(), InteractionError> {
        let step = Step::QueryAdmin;
        self.begin(step);

        let payload = payload(step, &NftStakingQueryMsg::AdminAddress {})?;
        let res = self
            .client
            .get_admin_address()
            .await
            .map_err(step_failure(step, &payload))?;
        self.record_query(step, payload, &res)?;

        self.check(
            step,
            format!("the admin is {sender}, as set during instantiation"),
            res.admin == sender.to_string(),
        );
        Ok(())
    }

    async fn admin_burn(&mut self) -> Result<(), InteractionError> {
        let step = Step::AdminBurn;
        self.begin(step);

        let index = self.params.stake_index;
        let payload = payload(step, &NftStakingExecuteMsg::AdminBurn { index })?;

        let res = self
            .client
            .admin_burn(index, None)
            .await
            .map_err(step_failure(step, &payload))?;

        let expected = self.expected_stake_event(BURNED_BY_ADMIN_EVENT_TYPE, index);
        self.record_execution(step, payload, &res, expected);
        Ok(())
    }
}
