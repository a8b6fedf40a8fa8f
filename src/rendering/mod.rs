//! Monetization link tag emission
//!
//! Turns resolved wallet candidates into `<link rel="monetization">` tags
//! for page heads, or `<atom:link>` equivalents for RSS/Atom feed heads and
//! items. Each per-post tag carries a `data-wm-source` attribute naming the
//! configuration tier the address came from.

use tracing::warn;

use crate::data_structures::{CountryCode, PostId, SiteConfig, WalletCandidate};
use crate::resolution::WalletResolver;
use crate::storage::{ConfigStore, ContentStore};
use crate::validation::{clean_wallet_address, normalize, split_pointers};

/// Output element flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFormat {
    /// `<link>` for HTML page heads
    Html,
    /// `<atom:link>` for feed heads and feed items
    Atom,
}

impl LinkFormat {
    /// The element name to emit
    pub fn element(&self) -> &'static str {
        match self {
            LinkFormat::Html => "link",
            LinkFormat::Atom => "atom:link",
        }
    }
}

/// Escape a value for use inside a double-quoted attribute
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_tag(format: LinkFormat, href: &str, source: Option<&str>) -> String {
    match source {
        Some(source) => format!(
            "<{} rel=\"monetization\" href=\"{}\" data-wm-source=\"{}\" />\n",
            format.element(),
            escape_attr(href),
            source
        ),
        None => format!(
            "<{} rel=\"monetization\" href=\"{}\" />\n",
            format.element(),
            escape_attr(href)
        ),
    }
}

/// Renders monetization link tags from resolved configuration
pub struct LinkRenderer<'a> {
    options: &'a dyn ConfigStore,
    content: &'a dyn ContentStore,
}

impl<'a> LinkRenderer<'a> {
    /// Create a renderer over configuration and content stores
    pub fn new(options: &'a dyn ConfigStore, content: &'a dyn ContentStore) -> Self {
        Self { options, content }
    }

    /// Render the link tags for a post
    ///
    /// `None` when monetization is globally disabled, the post is unknown
    /// or disabled, or no valid candidate exists. Otherwise one tag line per
    /// resolved candidate.
    pub fn links_for_post(
        &self,
        post_id: PostId,
        format: LinkFormat,
        visitor_country: Option<CountryCode>,
    ) -> Option<String> {
        let site = SiteConfig::load(self.options);
        if !site.enabled {
            return None;
        }

        let resolver = WalletResolver::new(self.options, self.content);
        let candidates = resolver.resolve(post_id, visitor_country);
        if candidates.is_empty() {
            return None;
        }

        Some(render_candidates(&candidates, format))
    }

    /// Render the site-wide fallback link, for front-page and archive
    /// contexts and for feed heads
    ///
    /// Multi-pointer site values expand to one tag per pointer. Site-level
    /// tags carry no `data-wm-source` attribute.
    pub fn site_link(&self, format: LinkFormat) -> Option<String> {
        let site = SiteConfig::load(self.options);
        if !site.enabled || site.wallet_address.is_empty() {
            return None;
        }

        let mut output = String::new();
        for token in split_pointers(&site.wallet_address) {
            match normalize(&clean_wallet_address(token)) {
                Ok(href) if !href.is_empty() => {
                    output.push_str(&format_tag(format, &href, None));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "skipping invalid site wallet address");
                }
            }
        }

        if output.is_empty() {
            None
        } else {
            Some(output)
        }
    }
}

/// Render tag lines for already-resolved candidates
pub fn render_candidates(candidates: &[WalletCandidate], format: LinkFormat) -> String {
    let mut output = String::new();
    for candidate in candidates {
        output.push_str(&format_tag(
            format,
            &candidate.address,
            Some(candidate.source.as_str()),
        ));
    }
    output
}
