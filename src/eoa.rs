//!

use std::fmt;

use ethers::prelude::*;

use crate::errors::{ProfileError, Result};

/// Externally owned account (EOA) derived from a profile credential.
#[derive(Clone)]
pub struct ProfileAccount {
    /// Position in the profile's credential list
    index: usize,
    /// Derived address (public key)
    address: Address,
    /// Private key as given in the secrets store
    private_key: String,
}

impl ProfileAccount {
    /// Parse a hex private key, with or without `0x` prefix.
    pub fn from_private_key(index: usize, private_key: &str) -> Result<ProfileAccount> {
        let wallet = parse_wallet(index, private_key)?;
        Ok(ProfileAccount {
            index,
            address: wallet.address(),
            private_key: private_key.to_string(),
        })
    }

    /// Get index of account within credential list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get address of EOA.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get private key of EOA.
    pub fn private_key(&self) -> String {
        self.private_key.clone()
    }

    /// Local wallet signing for `chain_id`.
    pub fn wallet(&self, chain_id: u64) -> Result<LocalWallet> {
        Ok(parse_wallet(self.index, &self.private_key)?.with_chain_id(chain_id))
    }
}

impl fmt::Debug for ProfileAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileAccount")
            .field("index", &self.index)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn parse_wallet(index: usize, private_key: &str) -> Result<LocalWallet> {
    private_key
        .trim()
        .parse::<LocalWallet>()
        .map_err(|e| ProfileError::InvalidPrivateKey {
            index,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn derives_address_with_and_without_prefix() {
        let plain = ProfileAccount::from_private_key(0, KEY).unwrap();
        let prefixed = ProfileAccount::from_private_key(1, &format!("0x{}", KEY)).unwrap();
        let expected = ADDRESS.parse::<Address>().unwrap();
        assert_eq!(plain.address(), expected);
        assert_eq!(prefixed.address(), expected);
        assert_eq!(prefixed.index(), 1);
    }

    #[test]
    fn wallet_is_bound_to_chain_id() {
        let account = ProfileAccount::from_private_key(0, KEY).unwrap();
        assert_eq!(account.wallet(42).unwrap().chain_id(), 42);
    }

    #[test]
    fn rejects_malformed_keys() {
        for bad in ["0xabc", "", "not-hex-at-all"] {
            assert!(matches!(
                ProfileAccount::from_private_key(2, bad),
                Err(ProfileError::InvalidPrivateKey { index: 2, .. })
            ));
        }
    }

    #[test]
    fn debug_output_hides_private_key() {
        let account = ProfileAccount::from_private_key(0, KEY).unwrap();
        assert!(!format!("{:?}", account).contains(KEY));
    }
}
