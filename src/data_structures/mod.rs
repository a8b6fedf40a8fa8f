//! Core data structures for wallet resolution
//!
//! Transient resolution types ([`WalletCandidate`], [`WalletSource`]) and
//! the configuration structures the host persists.

pub mod candidate;
pub mod config;
pub mod wallet_source;

pub use candidate::WalletCandidate;
pub use config::{
    value_as_flag, CountryCode, CountryOverrides, CountryWalletEntry, PostConfig, PostId,
    PostTypeEntry, PostTypeSettings, SiteConfig, UserId,
};
pub use wallet_source::{ResolutionMode, WalletSource};
