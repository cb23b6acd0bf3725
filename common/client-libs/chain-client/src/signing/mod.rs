// Copyright 2023-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmrs::bip32::{ChildNumber, DerivationPath};
use cosmrs::crypto::secp256k1::SigningKey;
use cosmrs::crypto::PublicKey;
use cosmrs::tendermint::chain::Id as ChainId;
use cosmrs::AccountId;

pub mod direct_wallet;
pub mod signer;
pub mod tx_signer;

pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";

pub fn default_derivation_path() -> DerivationPath {
    let mut path = DerivationPath::default();
    for index in [
        44 | ChildNumber::HARDENED_FLAG,
        118 | ChildNumber::HARDENED_FLAG,
        ChildNumber::HARDENED_FLAG,
        0,
        0,
    ] {
        path.push(ChildNumber(index))
    }
    path
}

/// Derivation information required to derive a keypair and an address from a mnemonic.
#[derive(Debug, Clone)]
pub struct Secp256k1Derivation {
    pub(crate) hd_path: DerivationPath,
    pub(crate) prefix: String,
}

pub struct AccountData {
    pub(crate) address: AccountId,
    pub(crate) private_key: SigningKey,
}

impl AccountData {
    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn public_key(&self) -> PublicKey {
        self.private_key.public_key()
    }

    pub fn private_key(&self) -> &SigningKey {
        &self.private_key
    }
}

#[derive(Debug, Clone)]
pub struct SignerData {
    pub account_number: u64,
    pub sequence: u64,
    pub chain_id: ChainId,
}
