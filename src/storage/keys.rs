//! Option and meta key names for persisted monetization configuration
//!
//! These are the storage keys the host persists configuration under. Post
//! and user meta reuse [`WALLET_ADDRESS`] and the `wm_disabled` flag lives
//! only in post meta.

/// Global kill switch for the whole feature
pub const ENABLED: &str = "wm_enabled";

/// Site-wide wallet address option; also the post/user meta key for
/// per-post and per-author wallets
pub const WALLET_ADDRESS: &str = "wm_wallet_address";

/// Whether author wallets participate in resolution
pub const ENABLE_AUTHORS: &str = "wm_enable_authors";

/// Authors whose personal wallets are excluded (list of user ids)
pub const EXCLUDED_AUTHORS: &str = "wm_excluded_authors";

/// Resolution mode option ("one" or "all")
pub const MULTI_WALLETS_OPTION: &str = "wm_multi_wallets_option";

/// Per content-type wallet mappings
pub const POST_TYPE_SETTINGS: &str = "wm_post_type_settings";

/// Whether the frontend banner is shown
pub const BANNER_ENABLED: &str = "wm_banner_enabled";

/// Whether visitor-country overrides participate in resolution
pub const ENABLE_COUNTRY_WALLETS: &str = "wm_enable_country_wallets";

/// Country-code-keyed wallet overrides
pub const WALLET_ADDRESS_OVERRIDES: &str = "wm_wallet_address_overrides";

/// Post meta flag: monetization is off for this post
pub const POST_DISABLED: &str = "wm_disabled";

/// Suffix marking a field's wallet as interactively verified
pub const CONNECTED_SUFFIX: &str = "_connected";
