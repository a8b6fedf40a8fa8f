//! Wallet resolution
//!
//! Computes which wallet addresses a page should advertise, combining
//! per-post, per-author, per-content-type, per-country, and site-wide
//! configuration under a fixed priority order.

pub mod country;
pub mod resolver;

pub use country::{
    CountryDetector, FixedCountryDetector, HeaderCountryDetector, RequestContext,
    CF_COUNTRY_HEADER,
};
pub use resolver::WalletResolver;
