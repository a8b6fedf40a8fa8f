//! Wallet source tiers and resolution modes
//!
//! A monetization link can originate from several configuration tiers. The
//! tier decides its priority and is emitted on the link tag as the
//! `data-wm-source` attribute.

use serde::{Deserialize, Serialize};

/// Provenance of a candidate wallet address
///
/// Ordering of the variants is the resolution priority: an article-level
/// wallet beats an author wallet, which beats a post-type wallet, and so on
/// down to the site-wide fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletSource {
    /// Per-post override from post meta
    Article,
    /// The post author's personal wallet from user meta
    Author,
    /// Per content-type mapping
    PostType,
    /// Visitor-country override
    Country,
    /// Site-wide fallback wallet
    Site,
}

impl WalletSource {
    /// All sources in resolution priority order (highest first)
    pub const PRIORITY: [WalletSource; 5] = [
        WalletSource::Article,
        WalletSource::Author,
        WalletSource::PostType,
        WalletSource::Country,
        WalletSource::Site,
    ];

    /// Stable wire name, used for the `data-wm-source` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletSource::Article => "article",
            WalletSource::Author => "author",
            WalletSource::PostType => "post_type",
            WalletSource::Country => "country",
            WalletSource::Site => "site",
        }
    }
}

impl std::fmt::Display for WalletSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether resolution advertises one wallet or every enabled wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// First-match-wins by priority
    #[default]
    One,
    /// Union of every enabled candidate, in priority order
    All,
}

impl std::str::FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one" => Ok(ResolutionMode::One),
            "all" => Ok(ResolutionMode::All),
            _ => Err(format!("Invalid resolution mode: {}. Valid options: one, all", s)),
        }
    }
}

impl ResolutionMode {
    /// Parse a stored option value, falling back to the default for
    /// anything unrecognized
    pub fn from_option_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(WalletSource::PRIORITY[0], WalletSource::Article);
        assert_eq!(WalletSource::PRIORITY[4], WalletSource::Site);
        assert!(WalletSource::Article < WalletSource::Site);
        assert!(WalletSource::PostType < WalletSource::Country);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(WalletSource::PostType.as_str(), "post_type");
        assert_eq!(WalletSource::Country.to_string(), "country");
    }

    #[test]
    fn test_resolution_mode_parsing() {
        assert_eq!("one".parse::<ResolutionMode>().unwrap(), ResolutionMode::One);
        assert_eq!("ALL".parse::<ResolutionMode>().unwrap(), ResolutionMode::All);
        assert!("both".parse::<ResolutionMode>().is_err());
        // Stored option values degrade to the default instead of erroring
        assert_eq!(ResolutionMode::from_option_value("garbage"), ResolutionMode::One);
    }
}
