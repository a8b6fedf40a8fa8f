//! Visitor country detection
//!
//! Country detection is an external collaborator: the resolver only consumes
//! a resolved [`CountryCode`]. The header-based detector covers the common
//! edge-network case where a CDN injects the visitor's country into a
//! request header.

use std::collections::HashMap;

use crate::data_structures::CountryCode;

/// The Cloudflare visitor-country header
pub const CF_COUNTRY_HEADER: &str = "cf-ipcountry";

/// Minimal view of an incoming request for country detection
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HashMap<String, String>,
}

impl RequestContext {
    /// Create an empty request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a header (names are case-insensitive)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_lowercase(), value.to_string());
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Resolves the visitor's country from a request context
pub trait CountryDetector: Send + Sync {
    /// Detect the visitor's country, `None` when unknown
    fn detect_country(&self, context: &RequestContext) -> Option<CountryCode>;
}

/// Detector reading a two-letter code from an edge-network header
#[derive(Debug, Clone)]
pub struct HeaderCountryDetector {
    header: String,
}

impl HeaderCountryDetector {
    /// Create a detector for a specific header name
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Detector for the Cloudflare `cf-ipcountry` header
    pub fn cloudflare() -> Self {
        Self::new(CF_COUNTRY_HEADER)
    }
}

impl Default for HeaderCountryDetector {
    fn default() -> Self {
        Self::cloudflare()
    }
}

impl CountryDetector for HeaderCountryDetector {
    fn detect_country(&self, context: &RequestContext) -> Option<CountryCode> {
        let value = context.header(&self.header)?;
        // Cloudflare sends XX for unknown and T1 for Tor exits
        if value.eq_ignore_ascii_case("xx") || value.eq_ignore_ascii_case("t1") {
            return None;
        }
        CountryCode::parse(value).ok()
    }
}

/// Detector that always answers with a fixed country, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedCountryDetector(pub CountryCode);

impl CountryDetector for FixedCountryDetector {
    fn detect_country(&self, _context: &RequestContext) -> Option<CountryCode> {
        Some(self.0)
    }
}
