//! Payment pointer syntax validation and normalization
//!
//! A payment pointer is an HTTPS URL identifying a wallet endpoint,
//! optionally written with the Interledger `$` shorthand
//! (`$ilp.example/alice` expands to `https://ilp.example/alice`).
//!
//! One canonical validator is shared by the interactive admin feedback path
//! and the server-side persistence path so the two can never diverge. The
//! rules are applied in order and the first failing rule rejects:
//!
//! 1. Empty input is valid (treated as "absent"); whitespace inside a single
//!    token is not.
//! 2. Every character must be in the conservative URL-safe set.
//! 3. After `$` expansion the input must parse as an `https` URL with a
//!    hostname passing DNS grammar, no port, no query, no fragment, and a
//!    non-trivial path (a bare domain is not a payment pointer).

use url::Url;

use crate::errors::ValidationError;

use super::hostname::is_valid_hostname;

/// Cap on accepted input length, to bound parsing cost
pub const MAX_POINTER_LENGTH: usize = 1000;

/// Which validation rules apply to a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletFieldKind {
    /// The site-wide wallet field, which accepts several
    /// whitespace-separated pointers
    MultiPointer,
    /// Every other field: exactly one pointer
    SinglePointer,
}

impl WalletFieldKind {
    /// Classify a field by its option/meta name
    ///
    /// Only the site-wide `wm_wallet_address` option accepts a
    /// multi-pointer value.
    pub fn for_field(field_name: &str) -> Self {
        if field_name == crate::storage::keys::WALLET_ADDRESS {
            WalletFieldKind::MultiPointer
        } else {
            WalletFieldKind::SinglePointer
        }
    }
}

/// Expand the `$` shorthand prefix to `https://`
pub fn expand_shorthand(pointer: &str) -> String {
    match pointer.strip_prefix('$') {
        Some(rest) => format!("https://{}", rest),
        None => pointer.to_string(),
    }
}

/// Split a raw field value into individual pointer tokens
pub fn split_pointers(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

/// Upgrade legacy address notation before validation or emission
///
/// Trims, rewrites a stray `http://` prefix to `https://`, and expands the
/// `$` shorthand. The result still has to pass the validator.
pub fn clean_wallet_address(wallet: &str) -> String {
    let wallet = wallet.trim();
    let wallet = match wallet.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => wallet.to_string(),
    };
    expand_shorthand(&wallet)
}

fn is_url_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | ':' | '/' | '?' | '#' | '[' | '@' | ']' | '!' | '$' | '&'
                | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%'
        )
}

/// Validate a single pointer token
///
/// The empty string is accepted and means "no wallet configured".
pub fn validate_pointer(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Ok(());
    }
    if raw.len() > MAX_POINTER_LENGTH {
        return Err(ValidationError::TooLong {
            max: MAX_POINTER_LENGTH,
        });
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmbeddedWhitespace);
    }
    if let Some(c) = raw.chars().find(|c| !is_url_safe_char(*c)) {
        return Err(ValidationError::ForbiddenCharacter(c));
    }

    let url = Url::parse(&expand_shorthand(raw)).map_err(|_| ValidationError::NotAUrl)?;

    if url.scheme() != "https" {
        return Err(ValidationError::InvalidScheme(url.scheme().to_string()));
    }
    let host = url.host_str().unwrap_or_default();
    if !is_valid_hostname(host) {
        return Err(ValidationError::InvalidHost(host.to_string()));
    }
    if url.port().is_some() {
        return Err(ValidationError::PortNotAllowed);
    }
    if url.query().is_some() {
        return Err(ValidationError::QueryNotAllowed);
    }
    if url.fragment().is_some() {
        return Err(ValidationError::FragmentNotAllowed);
    }
    // Url::parse yields "/" for an absent path; a pointer must name a
    // concrete resource, not a bare domain
    if url.path() == "/" || url.path().is_empty() {
        return Err(ValidationError::MissingPath);
    }

    Ok(())
}

/// Pure validity predicate for a single pointer token
pub fn is_valid(raw: &str) -> bool {
    validate_pointer(raw).is_ok()
}

/// Normalize a single pointer into canonical form
///
/// Expands the `$` shorthand and reduces the URL to scheme, host, and path
/// (query and fragment are forbidden so never reproduced). Idempotent:
/// `normalize(normalize(x)) == normalize(x)` for any valid `x`. The empty
/// string normalizes to itself.
pub fn normalize(raw: &str) -> Result<String, ValidationError> {
    validate_pointer(raw)?;
    if raw.is_empty() {
        return Ok(String::new());
    }
    let url = Url::parse(&expand_shorthand(raw)).map_err(|_| ValidationError::NotAUrl)?;
    let host = url.host_str().unwrap_or_default();
    Ok(format!("https://{}{}", host, url.path()))
}

/// Validate an entire field value according to its field kind
///
/// Multi-pointer fields are split on whitespace and every token must be
/// valid; single-pointer fields reject more than one token. Empty or
/// whitespace-only input is valid for either kind.
pub fn validate_field(kind: WalletFieldKind, raw: &str) -> Result<(), ValidationError> {
    let tokens = split_pointers(raw);
    if tokens.is_empty() {
        return Ok(());
    }
    if kind == WalletFieldKind::SinglePointer && tokens.len() > 1 {
        return Err(ValidationError::MultiplePointersNotAllowed);
    }
    for token in tokens {
        validate_pointer(token)?;
    }
    Ok(())
}

/// Normalize an entire field value, joining normalized tokens with spaces
pub fn normalize_field(kind: WalletFieldKind, raw: &str) -> Result<String, ValidationError> {
    validate_field(kind, raw)?;
    let normalized: Result<Vec<String>, ValidationError> =
        split_pointers(raw).into_iter().map(normalize).collect();
    Ok(normalized?.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid_as_absent() {
        assert!(is_valid(""));
        assert_eq!(normalize("").unwrap(), "");
    }

    #[test]
    fn test_shorthand_expansion() {
        assert_eq!(
            normalize("$ilp.example/alice").unwrap(),
            "https://ilp.example/alice"
        );
        assert!(is_valid("$ilp.example/alice"));
    }

    #[test]
    fn test_bare_domain_rejected() {
        assert_eq!(
            validate_pointer("https://ex.com"),
            Err(ValidationError::MissingPath)
        );
        assert_eq!(
            validate_pointer("https://ex.com/"),
            Err(ValidationError::MissingPath)
        );
        assert_eq!(
            validate_pointer("$ilp.example"),
            Err(ValidationError::MissingPath)
        );
    }

    #[test]
    fn test_query_and_fragment_rejected() {
        assert_eq!(
            validate_pointer("https://ex.com/a?x=1"),
            Err(ValidationError::QueryNotAllowed)
        );
        assert_eq!(
            validate_pointer("https://ex.com/a#frag"),
            Err(ValidationError::FragmentNotAllowed)
        );
    }

    #[test]
    fn test_scheme_must_be_https() {
        assert_eq!(
            validate_pointer("http://ex.com/a"),
            Err(ValidationError::InvalidScheme("http".to_string()))
        );
        assert!(matches!(
            validate_pointer("ftp://ex.com/a"),
            Err(ValidationError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_port_rejected() {
        assert_eq!(
            validate_pointer("https://ex.com:8443/a"),
            Err(ValidationError::PortNotAllowed)
        );
        // The default port is not "a port" after parsing
        assert!(is_valid("https://ex.com:443/a"));
    }

    #[test]
    fn test_whitespace_and_charset() {
        assert_eq!(
            validate_pointer("https://ex.com/a b"),
            Err(ValidationError::EmbeddedWhitespace)
        );
        assert_eq!(
            validate_pointer("https://ex.com/a\"b"),
            Err(ValidationError::ForbiddenCharacter('"'))
        );
        assert!(matches!(
            validate_pointer("https://ex.com/a<b>"),
            Err(ValidationError::ForbiddenCharacter('<'))
        ));
    }

    #[test]
    fn test_hostname_grammar_applied() {
        assert!(matches!(
            validate_pointer("https://-bad.example/a"),
            Err(ValidationError::InvalidHost(_))
        ));
        // The URL parser may reject the empty label itself; either way the
        // pointer is refused
        assert!(validate_pointer("https://ex..com/a").is_err());
    }

    #[test]
    fn test_length_cap() {
        let long = format!("https://ex.com/{}", "a".repeat(MAX_POINTER_LENGTH));
        assert_eq!(
            validate_pointer(&long),
            Err(ValidationError::TooLong {
                max: MAX_POINTER_LENGTH
            })
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            "$ilp.example/alice",
            "https://ilp.example/alice",
            "https://ILP.Example/alice",
        ] {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice);
            assert_eq!(is_valid(&once), is_valid(input));
        }
    }

    #[test]
    fn test_field_kind_rules() {
        let multi = "https://a.example/1 $b.example/2";
        assert!(validate_field(WalletFieldKind::MultiPointer, multi).is_ok());
        assert_eq!(
            validate_field(WalletFieldKind::SinglePointer, multi),
            Err(ValidationError::MultiplePointersNotAllowed)
        );
        // One bad token fails the whole field
        assert!(validate_field(WalletFieldKind::MultiPointer, "https://a.example/1 http://b.example/2").is_err());
        // Whitespace-only input is absent
        assert!(validate_field(WalletFieldKind::SinglePointer, "   ").is_ok());
    }

    #[test]
    fn test_normalize_field_joins_tokens() {
        assert_eq!(
            normalize_field(WalletFieldKind::MultiPointer, " $a.example/1   https://b.example/2 ").unwrap(),
            "https://a.example/1 https://b.example/2"
        );
    }

    #[test]
    fn test_clean_wallet_address() {
        assert_eq!(
            clean_wallet_address(" http://ilp.example/a "),
            "https://ilp.example/a"
        );
        assert_eq!(
            clean_wallet_address("$ilp.example/a"),
            "https://ilp.example/a"
        );
        assert_eq!(
            clean_wallet_address("https://ilp.example/a"),
            "https://ilp.example/a"
        );
    }

    #[test]
    fn test_field_kind_classification() {
        assert_eq!(
            WalletFieldKind::for_field("wm_wallet_address"),
            WalletFieldKind::MultiPointer
        );
        assert_eq!(
            WalletFieldKind::for_field("wm_post_type_settings[post][wallet]"),
            WalletFieldKind::SinglePointer
        );
    }
}
