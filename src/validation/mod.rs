//! Wallet address validation
//!
//! This module provides the canonical payment pointer validator shared by
//! the resolution path, the interactive verification flow, and the
//! persistence sanitizers.

pub mod hostname;
pub mod payment_pointer;

pub use hostname::is_valid_hostname;

pub use payment_pointer::{
    clean_wallet_address, expand_shorthand, is_valid, normalize, normalize_field, split_pointers,
    validate_field, validate_pointer, WalletFieldKind, MAX_POINTER_LENGTH,
};
