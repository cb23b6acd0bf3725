// Copyright 2023-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::AccountData;
use cosmrs::tx::{Raw, SignDoc};
use cosmrs::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    // bip32 errors only implement `std::error::Error` with its `std` feature
    #[error("failed to derive the keypair - {message}")]
    KeyDerivationFailure { message: String },

    #[error("failed to derive the account address - {source}")]
    AccountDerivationFailure { source: eyre::Report },

    #[error("account {address} does not belong to this signer")]
    NonExistentAccount { address: AccountId },

    #[error("the signer does not hold any accounts")]
    NoAccounts,

    #[error("failed to create the sign doc - {source}")]
    SignDocFailure { source: eyre::Report },

    #[error("failed to sign the transaction - {source}")]
    SigningFailure { source: eyre::Report },
}

impl From<cosmrs::bip32::Error> for SigningError {
    fn from(err: cosmrs::bip32::Error) -> Self {
        SigningError::KeyDerivationFailure {
            message: err.to_string(),
        }
    }
}

/// Signer that can be used to produce `SIGN_MODE_DIRECT` signatures.
pub trait OfflineSigner {
    fn get_accounts(&self) -> Result<Vec<AccountData>, SigningError>;

    fn signer_addresses(&self) -> Result<Vec<AccountId>, SigningError> {
        Ok(self
            .get_accounts()?
            .into_iter()
            .map(|account| account.address)
            .collect())
    }

    fn find_account(&self, signer_address: &AccountId) -> Result<AccountData, SigningError> {
        self.get_accounts()?
            .into_iter()
            .find(|account| &account.address == signer_address)
            .ok_or_else(|| SigningError::NonExistentAccount {
                address: signer_address.clone(),
            })
    }

    fn sign_direct_with_account(
        &self,
        signer: &AccountData,
        sign_doc: SignDoc,
    ) -> Result<Raw, SigningError> {
        sign_doc
            .sign(&signer.private_key)
            .map_err(|source| SigningError::SigningFailure { source })
    }

    fn sign_direct(
        &self,
        signer_address: &AccountId,
        sign_doc: SignDoc,
    ) -> Result<Raw, SigningError> {
        let account = self.find_account(signer_address)?;
        self.sign_direct_with_account(&account, sign_doc)
    }
}
