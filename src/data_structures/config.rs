//! Configuration structures backing wallet resolution
//!
//! These mirror the values a host persists in its options and meta storage.
//! Hosts store loosely-typed values ("1"/"0" strings, numbers, booleans), so
//! the flag fields deserialize tolerantly and malformed structures decode to
//! defaults rather than erroring.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ValidationError;
use crate::storage::{get_or_default, keys, ConfigStore};

use super::wallet_source::ResolutionMode;

/// Identifier of a content item (post)
pub type PostId = u64;

/// Identifier of a user account
pub type UserId = u64;

/// Deserialize a flag that may be stored as a bool, a number, or a string
fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagValue {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match FlagValue::deserialize(deserializer) {
        Ok(FlagValue::Bool(b)) => b,
        Ok(FlagValue::Int(i)) => i != 0,
        Ok(FlagValue::Str(s)) => matches!(s.trim(), "1" | "true" | "on" | "yes"),
        Err(_) => false,
    })
}

/// Interpret a raw stored value as a flag
pub fn value_as_flag(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0) != 0 || n.as_f64().unwrap_or(0.0) != 0.0,
        serde_json::Value::String(s) => matches!(s.trim(), "1" | "true" | "on" | "yes"),
        _ => false,
    }
}

/// Process-wide monetization configuration
///
/// Read on every resolution, mutated only through the host's admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Global kill switch for the whole feature
    pub enabled: bool,
    /// Site-wide fallback wallet; may hold several whitespace-separated pointers
    pub wallet_address: String,
    /// Whether author wallets participate in resolution
    pub authors_enabled: bool,
    /// Authors whose personal wallets are excluded from resolution
    pub excluded_authors: Vec<UserId>,
    /// Single highest-priority wallet, or every enabled wallet
    pub mode: ResolutionMode,
    /// Whether the frontend banner is shown (configured alongside, not used
    /// by resolution itself)
    pub banner_enabled: bool,
    /// Whether visitor-country overrides participate in resolution
    pub country_wallets_enabled: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wallet_address: String::new(),
            authors_enabled: false,
            excluded_authors: Vec::new(),
            mode: ResolutionMode::One,
            banner_enabled: true,
            country_wallets_enabled: false,
        }
    }
}

impl SiteConfig {
    /// Load the site configuration from a configuration store
    ///
    /// Missing or malformed values decode to their defaults.
    pub fn load(store: &dyn ConfigStore) -> Self {
        Self {
            enabled: store.get_flag(keys::ENABLED, true),
            wallet_address: store.get_string(keys::WALLET_ADDRESS, ""),
            authors_enabled: store.get_flag(keys::ENABLE_AUTHORS, false),
            excluded_authors: get_or_default(store, keys::EXCLUDED_AUTHORS),
            mode: ResolutionMode::from_option_value(&store.get_string(keys::MULTI_WALLETS_OPTION, "one")),
            banner_enabled: store.get_flag(keys::BANNER_ENABLED, true),
            country_wallets_enabled: store.get_flag(keys::ENABLE_COUNTRY_WALLETS, false),
        }
    }

    /// Whether the given author's personal wallet is excluded
    ///
    /// Exclusion only has meaning while author wallets are enabled at all.
    pub fn is_author_excluded(&self, author: UserId) -> bool {
        self.authors_enabled && self.excluded_authors.contains(&author)
    }
}

/// Per content-type wallet mapping entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostTypeEntry {
    /// Wallet address for this content type
    #[serde(default)]
    pub wallet: String,
    /// Whether the mapping participates in resolution
    #[serde(default, deserialize_with = "de_flag")]
    pub enabled: bool,
    /// Whether the wallet has been interactively verified
    #[serde(default, deserialize_with = "de_flag")]
    pub connected: bool,
}

/// Per content-type wallet mappings, keyed by type name
pub type PostTypeSettings = HashMap<String, PostTypeEntry>;

/// Country override entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryWalletEntry {
    /// Wallet address advertised to visitors from this country
    #[serde(default)]
    pub wallet: String,
    /// Whether the wallet has been interactively verified
    #[serde(default, deserialize_with = "de_flag")]
    pub connected: bool,
}

/// Country overrides, keyed by two-letter country code
pub type CountryOverrides = HashMap<String, CountryWalletEntry>;

/// Per-post monetization override, read from post meta
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostConfig {
    /// Post-level wallet address, empty when absent
    pub wallet_address: String,
    /// Hard override: monetization is off for this post entirely
    pub disabled: bool,
}

/// A validated ISO 3166-1 alpha-2 country code, uppercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a two-letter country code, case-insensitively
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        let bytes = raw.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(ValidationError::ForbiddenCharacter(
                raw.chars().next().unwrap_or(' '),
            ));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }

    /// The uppercase two-letter code
    pub fn as_str(&self) -> &str {
        // Invariant: constructed from two ASCII letters
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
