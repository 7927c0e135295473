//! Wallet address helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"));

/// Whether `address` looks like a 20-byte hex account address.
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

/// Compare two addresses ignoring checksum casing.
pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Shorten an address for display, e.g. `0x7E5F...5Bdf`.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}...{}", head, tail),
        _ => address.to_string(),
    }
}
