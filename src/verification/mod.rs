//! Interactive wallet verification
//!
//! The admin "Verify Wallet Address" flow: fetch each pointer's wallet
//! address document over HTTPS, validate it, and only then mark the field
//! as connected. Cancellable, bounded by a timeout, and serialized per
//! input field.

pub mod cancellation;
pub mod fetcher;
pub mod verifier;

pub use cancellation::{AtomicCancellationToken, CancellationToken, NeverCancelToken};
pub use fetcher::{
    HttpWalletFetcher, WalletDetails, WalletDetailsFetcher, DEFAULT_VERIFY_TIMEOUT,
};
pub use verifier::{commit_connection, VerifiedWallet, WalletVerifier};
