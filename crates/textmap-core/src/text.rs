//! UTF-16 helpers.
//!
//! Linear offsets and intra-node offsets are measured in UTF-16 code units,
//! which is what the DOM Selection API reports. Rust strings are UTF-8, so
//! every length that crosses the tree boundary goes through these.

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// The longest prefix of `s` spanning at most `units` UTF-16 code units.
///
/// An offset that falls between the halves of a surrogate pair rounds down
/// to the preceding char boundary. Offsets past the end return all of `s`.
pub fn utf16_prefix(s: &str, units: usize) -> &str {
    let mut count = 0;
    for (idx, ch) in s.char_indices() {
        let next = count + ch.len_utf16();
        if next > units {
            return &s[..idx];
        }
        count = next;
    }
    s
}
