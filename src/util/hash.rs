//! Stable object identifiers.

use sha2::{Digest, Sha256};

/// Length of an Xcode object identifier in hex digits.
pub const OBJECT_ID_LEN: usize = 24;

/// A 24-digit uppercase hex identifier derived from `parts`.
///
/// Parts are separated by NUL so that `["ab", "c"]` and `["a", "bc"]`
/// differ.
pub fn object_id<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"\0");
    }
    let mut id = hex::encode(hasher.finalize());
    id.truncate(OBJECT_ID_LEN);
    id.make_ascii_uppercase();
    id
}
