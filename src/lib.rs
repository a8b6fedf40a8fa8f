//! Wallet resolution and validation for Web Monetization
//!
//! This crate provides the core logic behind a Web Monetization
//! integration: deciding which wallet address(es) a page should advertise
//! via `<link rel="monetization">` tags, and validating/normalizing payment
//! pointers.
//!
//! ## Components
//!
//! - [`resolution`]: the wallet resolver — combines per-post, per-author,
//!   per-content-type, per-country, and site-wide configuration under a
//!   fixed priority order, in either first-match-wins or advertise-all mode
//! - [`validation`]: the canonical payment pointer validator and normalizer
//!   (`$` shorthand expansion, https-only, DNS hostname grammar, no
//!   query/fragment, concrete path)
//! - [`rendering`]: emits the `<link>`/`<atom:link>` tags for page heads,
//!   feed heads, and feed items
//! - [`verification`]: the interactive "verify wallet" flow against a
//!   wallet provider's address document endpoint (requires the `http`
//!   feature, enabled by default)
//! - [`storage`]: the `ConfigStore`/`ContentStore` seams a host implements
//!   over its own options/meta storage, plus in-memory implementations
//!
//! Both the resolver and the validator are pure functions over their inputs
//! and injected configuration lookups; nothing here performs blocking I/O.

pub mod data_structures;
pub mod errors;
pub mod rendering;
pub mod resolution;
pub mod storage;
pub mod validation;

#[cfg(feature = "http")]
pub mod verification;

pub use data_structures::*;
pub use errors::*;
pub use rendering::*;
pub use resolution::*;
pub use storage::*;
pub use validation::*;

#[cfg(feature = "http")]
pub use verification::*;
