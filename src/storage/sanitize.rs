//! Server-side sanitization of persisted configuration structures
//!
//! The same canonical validator that powers interactive feedback runs here
//! before anything is persisted, so the two paths cannot diverge. Malformed
//! structures sanitize to empty rather than erroring; individual entries
//! with invalid wallets are dropped.

use serde_json::Value;
use tracing::warn;

use crate::data_structures::{CountryCode, CountryOverrides, PostTypeSettings};
use crate::errors::ValidationError;
use crate::validation::{normalize, normalize_field, validate_pointer, WalletFieldKind};

/// Sanitize the site-wide wallet field before persisting
///
/// Accepts several whitespace-separated pointers and returns the normalized
/// joined value. Invalid input is an error so the host can surface inline
/// feedback instead of silently persisting garbage.
pub fn sanitize_site_wallet(raw: &str) -> Result<String, ValidationError> {
    normalize_field(WalletFieldKind::MultiPointer, raw)
}

/// Sanitize the per content-type wallet mappings
///
/// Non-object input sanitizes to empty. Entries whose wallet fails
/// validation are dropped; valid wallets are normalized in place.
pub fn sanitize_post_type_settings(raw: &Value) -> PostTypeSettings {
    let mut settings: PostTypeSettings = match serde_json::from_value(raw.clone()) {
        Ok(settings) => settings,
        Err(_) => {
            warn!("post type settings are malformed, treating as empty");
            return PostTypeSettings::default();
        }
    };

    settings.retain(|type_name, entry| {
        if entry.wallet.is_empty() {
            return true;
        }
        match normalize(entry.wallet.trim()) {
            Ok(normalized) => {
                entry.wallet = normalized;
                true
            }
            Err(err) => {
                warn!(post_type = %type_name, %err, "dropping post type wallet");
                false
            }
        }
    });
    settings
}

/// Sanitize the country-code-keyed wallet overrides
///
/// Keys must be two-letter country codes (uppercased on the way through)
/// and every kept entry must carry a valid, non-empty wallet.
pub fn sanitize_country_overrides(raw: &Value) -> CountryOverrides {
    let overrides: CountryOverrides = match serde_json::from_value(raw.clone()) {
        Ok(overrides) => overrides,
        Err(_) => {
            warn!("country wallet overrides are malformed, treating as empty");
            return CountryOverrides::default();
        }
    };

    let mut sanitized = CountryOverrides::default();
    for (code, mut entry) in overrides {
        let country = match CountryCode::parse(&code) {
            Ok(country) => country,
            Err(_) => {
                warn!(code = %code, "dropping override with invalid country code");
                continue;
            }
        };
        if entry.wallet.is_empty() || validate_pointer(entry.wallet.trim()).is_err() {
            warn!(country = %country, "dropping override with invalid wallet");
            continue;
        }
        // Validated above, normalize cannot fail here
        if let Ok(normalized) = normalize(entry.wallet.trim()) {
            entry.wallet = normalized;
            sanitized.insert(country.as_str().to_string(), entry);
        }
    }
    sanitized
}
