//! Store trait definitions for configuration and content metadata
//!
//! [`ConfigStore`] stands in for the host's options storage,
//! [`ContentStore`] for its post/user metadata. Both are synchronous and
//! expected to be fast local lookups (cached configuration, not network
//! round-trips).

use serde_json::Value;

use crate::data_structures::{value_as_flag, PostId, UserId};

use super::keys;

/// Key-value configuration storage
///
/// Values are loosely typed (`serde_json::Value`); the provided readers
/// treat missing or malformed values as defaults rather than erroring, per
/// the rule that malformed persisted configuration is never fatal.
pub trait ConfigStore: Send + Sync {
    /// Read a raw stored value
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a raw value
    fn set(&mut self, key: &str, value: Value);

    /// Read a string value, falling back to `default`
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    /// Read a flag stored as bool, number, or "1"/"0" string
    fn get_flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => value_as_flag(&value),
            None => default,
        }
    }
}

/// Read a structured value, falling back to `T::default()` when the value
/// is absent or does not decode
///
/// A free function rather than a trait method: the type parameter would
/// make [`ConfigStore`] unusable as a trait object.
pub fn get_or_default<T>(store: &dyn ConfigStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    store
        .get(key)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// Content metadata storage: post records and post/user meta values
pub trait ContentStore: Send + Sync {
    /// The author of a post, `None` for an unknown post
    fn post_author(&self, post_id: PostId) -> Option<UserId>;

    /// The content type of a post, `None` for an unknown post
    fn post_type(&self, post_id: PostId) -> Option<String>;

    /// A post meta value
    fn post_meta(&self, post_id: PostId, key: &str) -> Option<String>;

    /// A user meta value
    fn user_meta(&self, user_id: UserId, key: &str) -> Option<String>;
}

/// Seed a configuration store with the activation defaults
///
/// Matches what the host writes when the feature is first enabled. Existing
/// values are left untouched.
pub fn install_defaults(store: &mut dyn ConfigStore) {
    let defaults: [(&str, Value); 8] = [
        (keys::ENABLED, Value::from(1)),
        (keys::WALLET_ADDRESS, Value::from("")),
        (keys::ENABLE_AUTHORS, Value::from(0)),
        (keys::MULTI_WALLETS_OPTION, Value::from("one")),
        (keys::POST_TYPE_SETTINGS, serde_json::json!({})),
        (keys::BANNER_ENABLED, Value::from(1)),
        (keys::EXCLUDED_AUTHORS, serde_json::json!([])),
        (keys::ENABLE_COUNTRY_WALLETS, Value::from(0)),
    ];
    for (key, value) in defaults {
        if store.get(key).is_none() {
            store.set(key, value);
        }
    }
    if store.get(keys::WALLET_ADDRESS_OVERRIDES).is_none() {
        store.set(keys::WALLET_ADDRESS_OVERRIDES, serde_json::json!({}));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryConfigStore;

    #[test]
    fn test_install_defaults_preserves_existing() {
        let mut store = MemoryConfigStore::new();
        store.set(keys::WALLET_ADDRESS, Value::from("https://ilp.example/site"));
        install_defaults(&mut store);

        assert_eq!(
            store.get_string(keys::WALLET_ADDRESS, ""),
            "https://ilp.example/site"
        );
        assert!(store.get_flag(keys::ENABLED, false));
        assert!(!store.get_flag(keys::ENABLE_COUNTRY_WALLETS, true));
        assert_eq!(store.get_string(keys::MULTI_WALLETS_OPTION, ""), "one");
    }

    #[test]
    fn test_malformed_values_decode_to_defaults() {
        let mut store = MemoryConfigStore::new();
        store.set(keys::EXCLUDED_AUTHORS, Value::from("not-an-array"));
        let excluded: Vec<u64> = get_or_default(&store, keys::EXCLUDED_AUTHORS);
        assert!(excluded.is_empty());

        store.set(keys::ENABLED, serde_json::json!({ "nested": true }));
        assert!(!store.get_flag(keys::ENABLED, false));
    }

    #[test]
    fn test_typed_readers_on_trait_object() {
        let mut mem = MemoryConfigStore::new();
        mem.set(keys::ENABLED, Value::from("1"));
        mem.set(keys::EXCLUDED_AUTHORS, serde_json::json!([3, 5]));

        let store: &dyn ConfigStore = &mem;
        assert!(store.get_flag(keys::ENABLED, false));
        assert_eq!(store.get_string(keys::MULTI_WALLETS_OPTION, "one"), "one");
        let excluded: Vec<u64> = get_or_default(store, keys::EXCLUDED_AUTHORS);
        assert_eq!(excluded, vec![3, 5]);
    }
}
