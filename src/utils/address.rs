//! Solana address validation for front ends

use solana_pubkey::Pubkey;
use std::str::FromStr;

/// Check that `address` decodes to a 32-byte Solana public key.
pub fn is_valid_solana_address(address: &str) -> bool {
    Pubkey::from_str(address.trim()).is_ok()
}
