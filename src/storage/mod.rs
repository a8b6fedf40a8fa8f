//! Storage abstraction layer for monetization configuration
//!
//! The resolver and renderer never touch the host's options/meta storage
//! directly; they go through the [`ConfigStore`] and [`ContentStore`] traits
//! so that any host (or a test) can supply its own backend.

pub mod keys;
pub mod memory;
pub mod sanitize;
pub mod store_trait;

pub use memory::{MemoryConfigStore, MemoryContentStore, PostRecord};
pub use sanitize::{sanitize_country_overrides, sanitize_post_type_settings, sanitize_site_wallet};
pub use store_trait::{get_or_default, install_defaults, ConfigStore, ContentStore};
