// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cosmwasm_client::helpers::find_event_attribute;
use cosmrs::tendermint::abci;
use cosmwasm_std::Event;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Log {
    #[serde(default)]
    pub msg_index: usize,
    pub events: Vec<Event>,
}

/// Searches in logs for the first event of the given event type and in that event
/// for the first attribute with the given attribute key.
pub fn find_attribute<'a>(
    logs: &'a [Log],
    event_type: &str,
    attribute_key: &str,
) -> Option<&'a cosmwasm_std::Attribute> {
    logs.iter()
        .flat_map(|log| log.events.iter())
        .find(|event| event.ty == event_type)?
        .attributes
        .iter()
        .find(|attr| attr.key == attribute_key)
}

/// Chains running cosmos-sdk < 0.50 put the message events into the json-encoded raw log,
/// newer ones leave it empty. Anything that is not a valid log array yields no logs.
pub fn parse_raw_logs(raw_log: &str) -> Vec<Log> {
    serde_json::from_str(raw_log).unwrap_or_default()
}

/// Looks up an attribute value in the tx events, falling back to the legacy raw logs.
pub fn find_tx_attribute(
    events: &[abci::Event],
    logs: &[Log],
    event_type: &str,
    attribute_key: &str,
) -> Option<String> {
    find_event_attribute(events, event_type, attribute_key).or_else(|| {
        find_attribute(logs, event_type, attribute_key).map(|attr| attr.value.clone())
    })
}
