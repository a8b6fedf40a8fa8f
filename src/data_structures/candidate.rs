//! Candidate wallet addresses produced during resolution

use serde::{Deserialize, Serialize};

use super::wallet_source::WalletSource;

/// A single candidate wallet address, tagged with its provenance
///
/// Candidates are transient: they are computed per resolution call and never
/// persisted. A candidate whose `enabled` flag is false was present in
/// configuration but suppressed by policy (excluded author, disabled
/// post-type mapping, country resolution turned off).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCandidate {
    /// Configuration tier the address came from
    pub source: WalletSource,
    /// The raw or normalized wallet address
    pub address: String,
    /// Whether the candidate participates in resolution
    pub enabled: bool,
}

impl WalletCandidate {
    /// Create an enabled candidate
    pub fn new(source: WalletSource, address: impl Into<String>) -> Self {
        Self {
            source,
            address: address.into(),
            enabled: true,
        }
    }

    /// Create a candidate suppressed by policy
    pub fn suppressed(source: WalletSource, address: impl Into<String>) -> Self {
        Self {
            source,
            address: address.into(),
            enabled: false,
        }
    }

    /// Replace the address, keeping source and enabled state
    pub fn with_address(&self, address: impl Into<String>) -> Self {
        Self {
            source: self.source,
            address: address.into(),
            enabled: self.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_construction() {
        let c = WalletCandidate::new(WalletSource::Site, "https://ilp.example/alice");
        assert!(c.enabled);
        assert_eq!(c.source, WalletSource::Site);

        let s = WalletCandidate::suppressed(WalletSource::Author, "https://ilp.example/bob");
        assert!(!s.enabled);
    }

    #[test]
    fn test_with_address_preserves_tag() {
        let c = WalletCandidate::new(WalletSource::Article, "$ilp.example/alice");
        let n = c.with_address("https://ilp.example/alice");
        assert_eq!(n.source, WalletSource::Article);
        assert!(n.enabled);
        assert_eq!(n.address, "https://ilp.example/alice");
    }
}
