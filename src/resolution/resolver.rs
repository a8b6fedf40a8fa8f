//! Wallet resolution engine
//!
//! Given a content item and the site's configuration, computes the ordered
//! list of monetization candidates to advertise. All configuration access
//! goes through the injected [`ConfigStore`]/[`ContentStore`] collaborators,
//! so the resolver is a pure function over its inputs and unit-testable
//! without a host runtime.
//!
//! Candidates are considered in fixed priority order:
//! `article > author > post_type > country > site`. A post-level disable
//! flag is a hard override that empties the result regardless of any other
//! configuration. An excluded author loses only the `author` candidate;
//! article, post-type, country, and site wallets for their content still
//! apply.

use tracing::{debug, warn};

use crate::data_structures::{
    CountryCode, CountryOverrides, PostConfig, PostId, PostTypeSettings, ResolutionMode,
    SiteConfig, WalletCandidate, WalletSource,
};
use crate::storage::{get_or_default, keys, ConfigStore, ContentStore};
use crate::validation::{clean_wallet_address, normalize, split_pointers};

/// Resolves the wallet candidates for content items
pub struct WalletResolver<'a> {
    options: &'a dyn ConfigStore,
    content: &'a dyn ContentStore,
}

impl<'a> WalletResolver<'a> {
    /// Create a resolver over configuration and content stores
    pub fn new(options: &'a dyn ConfigStore, content: &'a dyn ContentStore) -> Self {
        Self { options, content }
    }

    /// Resolve the candidates for a post using the configured mode
    ///
    /// Never fails: missing configuration means "no candidate from that
    /// source" and an unknown `post_id` yields an empty sequence.
    pub fn resolve(
        &self,
        post_id: PostId,
        visitor_country: Option<CountryCode>,
    ) -> Vec<WalletCandidate> {
        let site = SiteConfig::load(self.options);
        let mode = site.mode;
        self.resolve_for_site(post_id, &site, mode, visitor_country)
    }

    /// Resolve with an explicit mode, overriding the configured one
    pub fn resolve_with_mode(
        &self,
        post_id: PostId,
        mode: ResolutionMode,
        visitor_country: Option<CountryCode>,
    ) -> Vec<WalletCandidate> {
        let site = SiteConfig::load(self.options);
        self.resolve_for_site(post_id, &site, mode, visitor_country)
    }

    fn resolve_for_site(
        &self,
        post_id: PostId,
        site: &SiteConfig,
        mode: ResolutionMode,
        visitor_country: Option<CountryCode>,
    ) -> Vec<WalletCandidate> {
        let candidates = self.collect_candidates(post_id, site, visitor_country);

        // Expand multi-pointer strings, upgrade legacy notation, and drop
        // anything that fails the validator; resolution must never emit an
        // invalid address.
        let mut valid = Vec::new();
        for candidate in candidates.into_iter().filter(|c| c.enabled) {
            for token in split_pointers(&candidate.address) {
                match normalize(&clean_wallet_address(token)) {
                    Ok(address) if !address.is_empty() => {
                        valid.push(candidate.with_address(address));
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(source = %candidate.source, %err, "skipping invalid wallet address");
                    }
                }
            }
        }

        match mode {
            ResolutionMode::One => {
                valid.truncate(1);
                valid
            }
            ResolutionMode::All => valid,
        }
    }

    /// Collect every configured candidate in priority order
    ///
    /// Candidates suppressed by policy are returned with `enabled = false`
    /// so callers can inspect why a wallet was not advertised. Addresses
    /// are raw at this stage; validation and multi-pointer expansion happen
    /// during resolution.
    pub fn collect_candidates(
        &self,
        post_id: PostId,
        site: &SiteConfig,
        visitor_country: Option<CountryCode>,
    ) -> Vec<WalletCandidate> {
        let author = match self.content.post_author(post_id) {
            Some(author) => author,
            None => {
                debug!(post_id, "unknown post, no candidates");
                return Vec::new();
            }
        };

        let post_config = self.post_config(post_id);
        if post_config.disabled {
            debug!(post_id, "monetization disabled for post");
            return Vec::new();
        }

        let mut candidates = Vec::new();

        // Article wallet is independent of author exclusion
        if !post_config.wallet_address.is_empty() {
            candidates.push(WalletCandidate::new(
                WalletSource::Article,
                post_config.wallet_address,
            ));
        }

        if let Some(author_wallet) = self
            .content
            .user_meta(author, keys::WALLET_ADDRESS)
            .filter(|w| !w.is_empty())
        {
            let candidate = if site.authors_enabled && !site.is_author_excluded(author) {
                WalletCandidate::new(WalletSource::Author, author_wallet)
            } else {
                WalletCandidate::suppressed(WalletSource::Author, author_wallet)
            };
            candidates.push(candidate);
        }

        if let Some(post_type) = self.content.post_type(post_id) {
            let settings: PostTypeSettings =
                get_or_default(self.options, keys::POST_TYPE_SETTINGS);
            if let Some(entry) = settings.get(&post_type).filter(|e| !e.wallet.is_empty()) {
                let candidate = if entry.enabled {
                    WalletCandidate::new(WalletSource::PostType, entry.wallet.clone())
                } else {
                    WalletCandidate::suppressed(WalletSource::PostType, entry.wallet.clone())
                };
                candidates.push(candidate);
            }
        }

        if let Some(country) = visitor_country {
            let overrides: CountryOverrides =
                get_or_default(self.options, keys::WALLET_ADDRESS_OVERRIDES);
            if let Some(entry) = overrides
                .get(country.as_str())
                .filter(|e| !e.wallet.is_empty())
            {
                let candidate = if site.country_wallets_enabled {
                    WalletCandidate::new(WalletSource::Country, entry.wallet.clone())
                } else {
                    WalletCandidate::suppressed(WalletSource::Country, entry.wallet.clone())
                };
                candidates.push(candidate);
            }
        }

        if !site.wallet_address.is_empty() {
            candidates.push(WalletCandidate::new(
                WalletSource::Site,
                site.wallet_address.clone(),
            ));
        }

        candidates
    }

    /// Read the per-post override from post meta
    pub fn post_config(&self, post_id: PostId) -> PostConfig {
        PostConfig {
            wallet_address: self
                .content
                .post_meta(post_id, keys::WALLET_ADDRESS)
                .unwrap_or_default(),
            disabled: self
                .content
                .post_meta(post_id, keys::POST_DISABLED)
                .as_deref()
                == Some("1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryConfigStore, MemoryContentStore, PostRecord};
    use serde_json::json;

    const POST: PostId = 1;
    const AUTHOR: u64 = 9;

    fn base_stores() -> (MemoryConfigStore, MemoryContentStore) {
        let mut options = MemoryConfigStore::new();
        options.set(keys::ENABLED, json!(1));
        let mut content = MemoryContentStore::new();
        content.insert_post(POST, PostRecord::new(AUTHOR, "post"));
        (options, content)
    }

    fn sources(candidates: &[WalletCandidate]) -> Vec<WalletSource> {
        candidates.iter().map(|c| c.source).collect()
    }

    #[test]
    fn test_disabled_post_empties_everything() {
        let (mut options, mut content) = base_stores();
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        content.set_post_meta(POST, keys::WALLET_ADDRESS, "https://ilp.example/article");
        content.set_post_meta(POST, keys::POST_DISABLED, "1");

        let resolver = WalletResolver::new(&options, &content);
        assert!(resolver.resolve(POST, None).is_empty());
        assert!(resolver
            .resolve_with_mode(POST, ResolutionMode::All, None)
            .is_empty());
    }

    #[test]
    fn test_unknown_post_is_empty() {
        let (mut options, content) = base_stores();
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        let resolver = WalletResolver::new(&options, &content);
        assert!(resolver.resolve(999, None).is_empty());
    }

    #[test]
    fn test_one_mode_article_beats_site() {
        let (mut options, mut content) = base_stores();
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        content.set_post_meta(POST, keys::WALLET_ADDRESS, "https://ilp.example/article");

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, WalletSource::Article);
        assert_eq!(result[0].address, "https://ilp.example/article");
    }

    #[test]
    fn test_all_mode_returns_tagged_candidates_in_order() {
        let (mut options, mut content) = base_stores();
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        options.set(keys::MULTI_WALLETS_OPTION, json!("all"));
        content.set_post_meta(POST, keys::WALLET_ADDRESS, "$ilp.example/article");

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        assert_eq!(
            sources(&result),
            vec![WalletSource::Article, WalletSource::Site]
        );
        // Shorthand is normalized on the way out
        assert_eq!(result[0].address, "https://ilp.example/article");
    }

    #[test]
    fn test_author_wallet_requires_authors_enabled() {
        let (mut options, mut content) = base_stores();
        content.set_user_meta(AUTHOR, keys::WALLET_ADDRESS, "https://ilp.example/author");

        let resolver = WalletResolver::new(&options, &content);
        assert!(resolver.resolve(POST, None).is_empty());

        options.set(keys::ENABLE_AUTHORS, json!(1));
        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        assert_eq!(result[0].source, WalletSource::Author);
    }

    #[test]
    fn test_excluded_author_keeps_other_sources() {
        let (mut options, mut content) = base_stores();
        options.set(keys::ENABLE_AUTHORS, json!(1));
        options.set(keys::EXCLUDED_AUTHORS, json!([AUTHOR]));
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        options.set(keys::MULTI_WALLETS_OPTION, json!("all"));
        content.set_user_meta(AUTHOR, keys::WALLET_ADDRESS, "https://ilp.example/author");
        content.set_post_meta(POST, keys::WALLET_ADDRESS, "https://ilp.example/article");

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        // Author is suppressed; article and site still apply
        assert_eq!(
            sources(&result),
            vec![WalletSource::Article, WalletSource::Site]
        );

        // The suppression is visible when collecting raw candidates
        let site = SiteConfig::load(&options);
        let raw = resolver.collect_candidates(POST, &site, None);
        let author = raw.iter().find(|c| c.source == WalletSource::Author).unwrap();
        assert!(!author.enabled);
    }

    #[test]
    fn test_post_type_mapping() {
        let (mut options, content) = base_stores();
        options.set(
            keys::POST_TYPE_SETTINGS,
            json!({ "post": { "wallet": "https://ilp.example/posts", "enabled": "1" } }),
        );

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        assert_eq!(result[0].source, WalletSource::PostType);

        // Disabled mapping contributes nothing
        options.set(
            keys::POST_TYPE_SETTINGS,
            json!({ "post": { "wallet": "https://ilp.example/posts", "enabled": "0" } }),
        );
        let resolver = WalletResolver::new(&options, &content);
        assert!(resolver.resolve(POST, None).is_empty());
    }

    #[test]
    fn test_country_override_between_post_type_and_site() {
        let (mut options, content) = base_stores();
        options.set(keys::ENABLE_COUNTRY_WALLETS, json!(1));
        options.set(keys::MULTI_WALLETS_OPTION, json!("all"));
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        options.set(
            keys::WALLET_ADDRESS_OVERRIDES,
            json!({ "DE": { "wallet": "https://ilp.example/de" } }),
        );

        let resolver = WalletResolver::new(&options, &content);
        let country = CountryCode::parse("DE").unwrap();
        let result = resolver.resolve(POST, Some(country));
        assert_eq!(
            sources(&result),
            vec![WalletSource::Country, WalletSource::Site]
        );

        // Country resolution disabled: override suppressed, site remains
        options.set(keys::ENABLE_COUNTRY_WALLETS, json!(0));
        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, Some(country));
        assert_eq!(sources(&result), vec![WalletSource::Site]);
    }

    #[test]
    fn test_site_multi_pointer_expansion() {
        let (mut options, content) = base_stores();
        options.set(keys::MULTI_WALLETS_OPTION, json!("all"));
        options.set(
            keys::WALLET_ADDRESS,
            json!("https://a.example/1 https://b.example/2"),
        );

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.source == WalletSource::Site));
        assert_eq!(result[0].address, "https://a.example/1");
        assert_eq!(result[1].address, "https://b.example/2");
    }

    #[test]
    fn test_invalid_candidate_filtered_and_next_wins() {
        let (mut options, mut content) = base_stores();
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        // Bare domain, no path: never emitted
        content.set_post_meta(POST, keys::WALLET_ADDRESS, "https://ilp.example");

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, WalletSource::Site);
    }

    #[test]
    fn test_legacy_http_wallet_upgraded_not_dropped() {
        let (mut options, mut content) = base_stores();
        options.set(keys::WALLET_ADDRESS, json!("https://ilp.example/site"));
        content.set_post_meta(POST, keys::WALLET_ADDRESS, "http://ilp.example/article");

        let resolver = WalletResolver::new(&options, &content);
        let result = resolver.resolve(POST, None);
        // The legacy notation is upgraded, not filtered, so the article
        // wallet still outranks the site wallet
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source, WalletSource::Article);
        assert_eq!(result[0].address, "https://ilp.example/article");
    }

    #[test]
    fn test_no_configuration_no_candidates() {
        let (options, content) = base_stores();
        let resolver = WalletResolver::new(&options, &content);
        assert!(resolver.resolve(POST, None).is_empty());
    }
}
