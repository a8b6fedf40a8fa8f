//! DNS hostname grammar checks for payment pointer hosts

/// Maximum total hostname length in bytes
pub const MAX_HOSTNAME_LENGTH: usize = 253;

/// Maximum length of a single DNS label
pub const MAX_LABEL_LENGTH: usize = 63;

/// Check a host against conservative DNS hostname grammar
///
/// Labels must be 1-63 alphanumeric/hyphen characters with no leading or
/// trailing hyphen, joined by single dots (no empty labels), with a total
/// length of at most 253 bytes.
pub fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LENGTH {
        return false;
    }
    host.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
