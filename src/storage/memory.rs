//! In-memory store implementations for tests and embedders
//!
//! These provide deterministic [`ConfigStore`]/[`ContentStore`] backends
//! without requiring a real host runtime.

use std::collections::HashMap;

use serde_json::Value;

use crate::data_structures::{PostId, UserId};

use super::store_trait::{ConfigStore, ContentStore};

/// In-memory key-value configuration store
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: HashMap<String, Value>,
}

impl MemoryConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from key/value pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Remove a stored value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// A content item known to a [`MemoryContentStore`]
#[derive(Debug, Clone)]
pub struct PostRecord {
    /// Author user id
    pub author: UserId,
    /// Content type name, e.g. "post" or "page"
    pub post_type: String,
    /// Post meta values
    pub meta: HashMap<String, String>,
}

impl PostRecord {
    /// Create a post record with no meta
    pub fn new(author: UserId, post_type: impl Into<String>) -> Self {
        Self {
            author,
            post_type: post_type.into(),
            meta: HashMap::new(),
        }
    }

    /// Attach a meta value
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// In-memory content metadata store
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    posts: HashMap<PostId, PostRecord>,
    user_meta: HashMap<(UserId, String), String>,
}

impl MemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a post
    pub fn insert_post(&mut self, post_id: PostId, record: PostRecord) {
        self.posts.insert(post_id, record);
    }

    /// Set a post meta value
    pub fn set_post_meta(&mut self, post_id: PostId, key: &str, value: &str) {
        if let Some(record) = self.posts.get_mut(&post_id) {
            record.meta.insert(key.to_string(), value.to_string());
        }
    }

    /// Set a user meta value
    pub fn set_user_meta(&mut self, user_id: UserId, key: &str, value: &str) {
        self.user_meta
            .insert((user_id, key.to_string()), value.to_string());
    }
}

impl ContentStore for MemoryContentStore {
    fn post_author(&self, post_id: PostId) -> Option<UserId> {
        self.posts.get(&post_id).map(|p| p.author)
    }

    fn post_type(&self, post_id: PostId) -> Option<String> {
        self.posts.get(&post_id).map(|p| p.post_type.clone())
    }

    fn post_meta(&self, post_id: PostId, key: &str) -> Option<String> {
        self.posts
            .get(&post_id)
            .and_then(|p| p.meta.get(key).cloned())
    }

    fn user_meta(&self, user_id: UserId, key: &str) -> Option<String> {
        self.user_meta.get(&(user_id, key.to_string())).cloned()
    }
}
