// Copyright 2021-2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::signer::{OfflineSigner, SigningError};
use crate::signing::{default_derivation_path, AccountData, Secp256k1Derivation};
use cosmrs::bip32::{DerivationPath, XPrv};
use cosmrs::crypto::secp256k1::SigningKey;
use std::fmt;
use zeroize::Zeroize;

/// Hierarchical deterministic wallet holding secp256k1 keys derived from a bip39 mnemonic.
// only the seed is retained. keys are derived on demand
pub struct DirectSecp256k1HdWallet {
    /// BIP39 seed
    seed: [u8; 64],

    /// Derivation instructions
    accounts: Vec<Secp256k1Derivation>,
}

impl fmt::Debug for DirectSecp256k1HdWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectSecp256k1HdWallet")
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}

impl Drop for DirectSecp256k1HdWallet {
    fn drop(&mut self) {
        self.seed.zeroize()
    }
}

impl DirectSecp256k1HdWallet {
    pub fn builder(prefix: &str) -> DirectSecp256k1HdWalletBuilder {
        DirectSecp256k1HdWalletBuilder::new(prefix)
    }

    /// Restores a wallet from the given BIP39 mnemonic using the default derivation path.
    pub fn from_mnemonic(prefix: &str, mnemonic: bip39::Mnemonic) -> Self {
        DirectSecp256k1HdWalletBuilder::new(prefix).build(mnemonic)
    }

    fn derive_keypair(&self, hd_path: &DerivationPath) -> Result<SigningKey, SigningError> {
        let extended_private_key = XPrv::derive_from_path(self.seed, hd_path)?;
        Ok(extended_private_key.into())
    }
}

impl OfflineSigner for DirectSecp256k1HdWallet {
    fn get_accounts(&self) -> Result<Vec<AccountData>, SigningError> {
        self.accounts
            .iter()
            .map(|derivation_info| {
                let private_key = self.derive_keypair(&derivation_info.hd_path)?;
                let address = private_key
                    .public_key()
                    .account_id(&derivation_info.prefix)
                    .map_err(|source| SigningError::AccountDerivationFailure { source })?;

                Ok(AccountData {
                    address,
                    private_key,
                })
            })
            .collect()
    }
}

#[must_use]
pub struct DirectSecp256k1HdWalletBuilder {
    /// The BIP-32/SLIP-10 derivation paths
    hd_paths: Vec<DerivationPath>,

    /// The bech32 address prefix (human readable part)
    prefix: String,
}

impl DirectSecp256k1HdWalletBuilder {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        DirectSecp256k1HdWalletBuilder {
            hd_paths: vec![default_derivation_path()],
            prefix: prefix.into(),
        }
    }

    pub fn with_hd_path(mut self, path: DerivationPath) -> Self {
        self.hd_paths.push(path);
        self
    }

    pub fn build(self, mnemonic: bip39::Mnemonic) -> DirectSecp256k1HdWallet {
        let seed = mnemonic.to_seed("");
        let prefix = self.prefix;
        let accounts = self
            .hd_paths
            .into_iter()
            .map(|hd_path| Secp256k1Derivation {
                hd_path,
                prefix: prefix.clone(),
            })
            .collect();

        DirectSecp256k1HdWallet {
            seed,
            accounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::DEFAULT_DERIVATION_PATH;

    // the well-known test mnemonic shared by most cosmos tooling
    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn default_path_matches_the_cosmos_hub_path() {
        let parsed: DerivationPath = DEFAULT_DERIVATION_PATH.parse().unwrap();
        assert_eq!(default_derivation_path(), parsed)
    }

    #[test]
    fn derived_addresses_use_the_requested_prefix() {
        let mnemonic = bip39::Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let wallet = DirectSecp256k1HdWallet::from_mnemonic("neutron", mnemonic);

        let addresses = wallet.signer_addresses().unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].prefix(), "neutron");
        assert!(addresses[0].to_string().starts_with("neutron1"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = DirectSecp256k1HdWallet::from_mnemonic(
            "neutron",
            bip39::Mnemonic::parse(TEST_MNEMONIC).unwrap(),
        );
        let second = DirectSecp256k1HdWallet::from_mnemonic(
            "cosmos",
            bip39::Mnemonic::parse(TEST_MNEMONIC).unwrap(),
        );

        let neutron_address = &first.signer_addresses().unwrap()[0];
        let cosmos_address = &second.signer_addresses().unwrap()[0];

        // same key, different human readable part
        assert_eq!(neutron_address.to_bytes(), cosmos_address.to_bytes());
        assert_ne!(neutron_address, cosmos_address);
    }

    #[test]
    fn additional_hd_paths_yield_additional_accounts() {
        let mnemonic = bip39::Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let wallet = DirectSecp256k1HdWallet::builder("neutron")
            .with_hd_path("m/44'/118'/0'/0/1".parse().unwrap())
            .build(mnemonic);

        let accounts = wallet.get_accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_ne!(accounts[0].address(), accounts[1].address());

        let found = wallet.find_account(accounts[1].address()).unwrap();
        assert_eq!(found.public_key(), accounts[1].public_key());
    }
}
