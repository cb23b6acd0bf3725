// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::signer::{OfflineSigner, SigningError};
use crate::signing::SignerData;
use cosmrs::tx::{self, Raw, SignDoc, SignerInfo};
use cosmrs::{AccountId, Any};
use tracing::trace;

pub trait TxSigner: OfflineSigner {
    fn sign_direct_tx(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: tx::Fee,
        memo: impl Into<String>,
        signer_data: SignerData,
    ) -> Result<Raw, SigningError> {
        trace!("signing {} message(s) in direct mode", messages.len());

        let account = self.find_account(signer_address)?;

        let tx_body = tx::Body::new(messages, memo, 0u32);
        let signer_info = SignerInfo::single_direct(Some(account.public_key()), signer_data.sequence);
        let auth_info = signer_info.auth_info(fee);

        let sign_doc = SignDoc::new(
            &tx_body,
            &auth_info,
            &signer_data.chain_id,
            signer_data.account_number,
        )
        .map_err(|source| SigningError::SignDocFailure { source })?;

        self.sign_direct_with_account(&account, sign_doc)
    }
}

impl<T> TxSigner for T where T: OfflineSigner {}
