// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::InteractionError;
use nft_staking_chain_client::cosmwasm_client::types::{
    ContractCodeId, ExecuteResult, GasInfo, InstantiateResult, UploadResult,
};
use nft_staking_chain_client::cosmwasm_client::helpers::event_attributes;
use nft_staking_chain_client::{Event, Hash, Height};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Every action performed by the interaction scenario, in the order of execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CreateWallet,
    UploadStakingCode,
    InstantiateNft,
    InstantiateStaking,
    Mint,
    SendNft,
    Unstake,
    Claim,
    QueryTokens,
    QueryWhitelistBefore,
    AddCollection,
    QueryWhitelistAfterAdd,
    RemoveCollection,
    QueryWhitelistAfterRemove,
    QueryStakings,
    QueryAdmin,
    AdminBurn,
}

impl Step {
    pub const ALL: [Step; 17] = [
        Step::CreateWallet,
        Step::UploadStakingCode,
        Step::InstantiateNft,
        Step::InstantiateStaking,
        Step::Mint,
        Step::SendNft,
        Step::Unstake,
        Step::Claim,
        Step::QueryTokens,
        Step::QueryWhitelistBefore,
        Step::AddCollection,
        Step::QueryWhitelistAfterAdd,
        Step::RemoveCollection,
        Step::QueryWhitelistAfterRemove,
        Step::QueryStakings,
        Step::QueryAdmin,
        Step::AdminBurn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::CreateWallet => "create_wallet",
            Step::UploadStakingCode => "upload_staking_code",
            Step::InstantiateNft => "instantiate_nft",
            Step::InstantiateStaking => "instantiate_staking",
            Step::Mint => "mint",
            Step::SendNft => "send_nft",
            Step::Unstake => "unstake",
            Step::Claim => "claim",
            Step::QueryTokens => "query_tokens",
            Step::QueryWhitelistBefore => "query_whitelist_before",
            Step::AddCollection => "add_collection",
            Step::QueryWhitelistAfterAdd => "query_whitelist_after_add",
            Step::RemoveCollection => "remove_collection",
            Step::QueryWhitelistAfterRemove => "query_whitelist_after_remove",
            Step::QueryStakings => "query_stakings",
            Step::QueryAdmin => "query_admin",
            Step::AdminBurn => "admin_burn",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxSummary {
    pub hash: String,
    pub height: u64,
    pub gas_wanted: u64,
    pub gas_used: u64,
}

impl TxSummary {
    fn new(hash: &Hash, height: Height, gas_info: GasInfo) -> Self {
        TxSummary {
            hash: hash.to_string(),
            height: height.value(),
            gas_wanted: gas_info.gas_wanted,
            gas_used: gas_info.gas_used,
        }
    }
}

impl Display for TxSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tx {} at height {} (gas used {} / wanted {})",
            self.hash, self.height, self.gas_used, self.gas_wanted
        )
    }
}

impl From<&ExecuteResult> for TxSummary {
    fn from(res: &ExecuteResult) -> Self {
        TxSummary::new(&res.transaction_hash, res.height, res.gas_info)
    }
}

impl From<&InstantiateResult> for TxSummary {
    fn from(res: &InstantiateResult) -> Self {
        TxSummary::new(&res.transaction_hash, res.height, res.gas_info)
    }
}

impl From<&UploadResult> for TxSummary {
    fn from(res: &UploadResult) -> Self {
        TxSummary::new(&res.transaction_hash, res.height, res.gas_info)
    }
}

/// Custom event emitted by a contract while executing a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: BTreeMap<String, String>,
}

impl ContractEvent {
    pub fn find(events: &[Event], kind: &str) -> Option<Self> {
        event_attributes(events, kind).map(|attributes| ContractEvent {
            kind: kind.to_string(),
            attributes,
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl Display for ContractEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {{", self.kind)?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {key}: {value}")?;
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    Wallet {
        address: String,
    },
    Skipped {
        reason: String,
    },
    Uploaded {
        code_id: ContractCodeId,
        original_size: usize,
        compressed_size: usize,
        checksum: String,
        transaction: TxSummary,
    },
    Instantiated {
        contract_address: String,
        transaction: TxSummary,
    },
    Executed {
        transaction: TxSummary,
        #[serde(skip_serializing_if = "Option::is_none")]
        event: Option<ContractEvent>,
    },
    Queried {
        response: serde_json::Value,
    },
}

impl StepOutcome {
    pub fn uploaded(res: &UploadResult) -> Self {
        StepOutcome::Uploaded {
            code_id: res.code_id,
            original_size: res.original_size,
            compressed_size: res.compressed_size,
            checksum: hex::encode(&res.original_checksum),
            transaction: res.into(),
        }
    }

    pub fn instantiated(res: &InstantiateResult) -> Self {
        StepOutcome::Instantiated {
            contract_address: res.contract_address.to_string(),
            transaction: res.into(),
        }
    }

    pub fn executed(res: &ExecuteResult, event: Option<ContractEvent>) -> Self {
        StepOutcome::Executed {
            transaction: res.into(),
            event,
        }
    }
}

impl Display for StepOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Wallet { address } => write!(f, "sender address: {address}"),
            StepOutcome::Skipped { reason } => write!(f, "skipped: {reason}"),
            StepOutcome::Uploaded {
                code_id,
                original_size,
                compressed_size,
                checksum,
                transaction,
            } => write!(
                f,
                "code id {code_id} ({original_size}B, {compressed_size}B compressed, checksum {checksum}) in {transaction}"
            ),
            StepOutcome::Instantiated {
                contract_address,
                transaction,
            } => write!(f, "contract {contract_address} in {transaction}"),
            StepOutcome::Executed {
                transaction,
                event: None,
            } => write!(f, "{transaction}"),
            StepOutcome::Executed {
                transaction,
                event: Some(event),
            } => write!(f, "{transaction} emitting {event}"),
            StepOutcome::Queried { response } => write!(f, "{response}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub payload: serde_json::Value,
    pub outcome: StepOutcome,
}

/// Outcome of comparing the observed chain state against what the scenario should have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectationCheck {
    pub after: Step,
    pub description: String,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub step: Option<Step>,
    pub payload: Option<serde_json::Value>,
    pub error: String,
}

impl FailureReport {
    pub(crate) fn new(step: Option<Step>, err: &InteractionError) -> Self {
        let (step, payload) = match err {
            InteractionError::StepFailure { step, payload, .. } => {
                (Some(*step), Some(payload.clone()))
            }
            _ => (step, None),
        };

        FailureReport {
            step,
            payload,
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub sender: Option<String>,
    pub staking_code_id: Option<ContractCodeId>,
    pub nft_contract_address: Option<String>,
    pub staking_contract_address: Option<String>,
    pub steps: Vec<StepReport>,
    pub checks: Vec<ExpectationCheck>,
    pub failure: Option<FailureReport>,
}

impl ScenarioReport {
    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|report| report.step == step)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &ExpectationCheck> {
        self.checks.iter().filter(|check| !check.satisfied)
    }

    pub fn is_successful(&self) -> bool {
        self.failure.is_none() && self.failed_checks().next().is_none()
    }
}

impl Display for ScenarioReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let unknown = "-".to_string();
        writeln!(f, "{:<20}{}", "Sender:", self.sender.as_ref().unwrap_or(&unknown))?;
        writeln!(
            f,
            "{:<20}{}",
            "NFT contract:",
            self.nft_contract_address.as_ref().unwrap_or(&unknown)
        )?;
        writeln!(
            f,
            "{:<20}{}",
            "Staking contract:",
            self.staking_contract_address.as_ref().unwrap_or(&unknown)
        )?;

        writeln!(f, "\nSteps:")?;
        for report in &self.steps {
            writeln!(f, "  {:<30}{}", report.step.as_str(), report.outcome)?;
        }

        if !self.checks.is_empty() {
            writeln!(f, "\nChecks:")?;
            for check in &self.checks {
                let status = if check.satisfied { "ok" } else { "FAILED" };
                writeln!(f, "  [{status}] {}", check.description)?;
            }
        }

        match &self.failure {
            Some(failure) => write!(f, "\nAborted: {}", failure.error),
            None => write!(f, "\nCompleted {} steps", self.steps.len()),
        }
    }
}
