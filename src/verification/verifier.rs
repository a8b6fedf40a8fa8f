//! Interactive wallet verification flow
//!
//! Verifies that every pointer in an input field resolves to a real wallet
//! address document before the host marks the field as connected. The flow
//! is all-or-nothing: if any pointer fails, nothing is committed and the
//! failure surfaces as a retryable error. A second verification for the
//! same field while one is in flight is rejected rather than interleaved.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::errors::{VerificationError, WebMonetizationResult};
use crate::storage::{get_or_default, keys, ConfigStore};
use crate::data_structures::PostTypeSettings;
use crate::validation::{normalize, split_pointers, validate_pointer, WalletFieldKind};

use super::cancellation::CancellationToken;
use super::fetcher::WalletDetailsFetcher;

/// Outcome of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedWallet {
    /// The input field that was verified
    pub field: String,
    /// Normalized pointer URLs, in input order, after following redirects
    pub normalized_pointers: Vec<String>,
    /// Wallet identifiers from the fetched documents, in input order
    pub wallet_ids: Vec<String>,
}

impl VerifiedWallet {
    /// The normalized joined value to write back into the input field
    pub fn normalized_value(&self) -> String {
        self.normalized_pointers.join(" ")
    }
}

/// Removes the field from the in-flight set when the verification ends,
/// whether it succeeded, failed, or was cancelled
struct InFlightGuard {
    field: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&self.field);
        }
    }
}

/// Drives the interactive verify-wallet flow
pub struct WalletVerifier<F> {
    fetcher: F,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl<F: WalletDetailsFetcher> WalletVerifier<F> {
    /// Create a verifier over a wallet details fetcher
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    fn acquire(&self, field: &str) -> Result<InFlightGuard, VerificationError> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| VerificationError::already_in_flight(field))?;
        if !set.insert(field.to_string()) {
            return Err(VerificationError::already_in_flight(field));
        }
        Ok(InFlightGuard {
            field: field.to_string(),
            in_flight: self.in_flight.clone(),
        })
    }

    /// Verify every pointer in a field's raw input
    ///
    /// Pointers are syntax-checked up front, then each one's wallet address
    /// document is fetched and validated. The cancellation token is honoured
    /// between fetches. No partial result is ever returned.
    pub async fn verify_field(
        &self,
        field: &str,
        raw: &str,
        cancel: &dyn CancellationToken,
    ) -> WebMonetizationResult<VerifiedWallet> {
        let _guard = self.acquire(field)?;

        let tokens = split_pointers(raw);
        if tokens.is_empty() {
            return Err(VerificationError::invalid_details("no wallet address to verify").into());
        }
        let kind = WalletFieldKind::for_field(field);
        if kind == WalletFieldKind::SinglePointer && tokens.len() > 1 {
            return Err(VerificationError::InvalidPointer {
                pointer: raw.to_string(),
                source: crate::errors::ValidationError::MultiplePointersNotAllowed,
            }
            .into());
        }
        for token in &tokens {
            validate_pointer(token).map_err(|source| VerificationError::InvalidPointer {
                pointer: token.to_string(),
                source,
            })?;
        }

        let mut normalized_pointers = Vec::with_capacity(tokens.len());
        let mut wallet_ids = Vec::with_capacity(tokens.len());

        for token in tokens {
            if cancel.is_cancelled() {
                warn!(field, "wallet verification cancelled");
                return Err(VerificationError::Cancelled.into());
            }
            let pointer_url = normalize(token)?;
            let details = self.fetcher.fetch(&pointer_url).await?;
            details.validate()?;
            debug!(field, wallet_id = %details.id, "pointer verified");

            normalized_pointers.push(if details.resolved_url.is_empty() {
                pointer_url
            } else {
                details.resolved_url.clone()
            });
            wallet_ids.push(details.id);
        }

        Ok(VerifiedWallet {
            field: field.to_string(),
            normalized_pointers,
            wallet_ids,
        })
    }
}

/// Persist the connected state for a successfully verified field
///
/// Post-type fields (`wm_post_type_settings[<type>][wallet]`) flip the
/// `connected` flag inside the stored settings map; any other field gets a
/// `<field>_connected` marker option. Must only be called with the outcome
/// of a successful [`WalletVerifier::verify_field`].
pub fn commit_connection(store: &mut dyn ConfigStore, verified: &VerifiedWallet) {
    if let Some(post_type) = post_type_from_field(&verified.field) {
        let mut settings: PostTypeSettings = get_or_default(&*store, keys::POST_TYPE_SETTINGS);
        if let Some(entry) = settings.get_mut(&post_type) {
            entry.connected = true;
            match serde_json::to_value(&settings) {
                Ok(value) => store.set(keys::POST_TYPE_SETTINGS, value),
                Err(err) => warn!(%err, "failed to serialize post type settings"),
            }
        }
    } else {
        store.set(
            &format!("{}{}", verified.field, keys::CONNECTED_SUFFIX),
            serde_json::Value::from("1"),
        );
    }
}

/// Extract the content-type name from a post-type settings field name
fn post_type_from_field(field: &str) -> Option<String> {
    let rest = field.strip_prefix(keys::POST_TYPE_SETTINGS)?;
    let start = rest.find('[')? + 1;
    let end = rest[start..].find(']')? + start;
    let post_type = &rest[start..end];
    if post_type.is_empty() {
        None
    } else {
        Some(post_type.to_string())
    }
}
