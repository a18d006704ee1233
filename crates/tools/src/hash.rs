//! Short, deterministic string digests for styling identifiers.
//!
//! These are not cryptographic. The accumulator is the classic 32-bit
//! `h * 31 + unit` string hash over UTF-16 code units, so the same text yields
//! the same digest on every run and on every platform.

/// Width of a hex digest produced by [`hex_digest`].
pub const HEX_DIGEST_LEN: usize = 8;

/// 32-bit accumulator over the UTF-16 code units of `text`.
pub fn string_hash(text: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash as u32
}

/// Lower-case hex rendering of [`string_hash`], zero-padded to
/// [`HEX_DIGEST_LEN`] characters.
pub fn hex_digest(text: &str) -> String {
    format!("{:08x}", string_hash(text))
}

/// Murmur3 finalizer. Spreads every input bit over the whole word, so a
/// change in the last characters of a text reaches the leading hex digits.
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Like [`hex_digest`], but finalized with [`fmix32`]. Use this when only a
/// prefix of the digest is kept.
pub fn mixed_hex_digest(text: &str) -> String {
    format!("{:08x}", fmix32(string_hash(text)))
}

/// Base-36 rendering of [`string_hash`] (digits then lower-case letters).
pub fn base36_digest(text: &str) -> String {
    to_base36(string_hash(text))
}

pub fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(7);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    // Only ASCII digits and letters were pushed.
    buf.into_iter().map(char::from).collect()
}

/// Prefix of `digest` of at most `len` characters.
///
/// Digests are ASCII, so slicing by byte count is a character slice.
pub fn truncated(digest: &str, len: usize) -> &str {
    &digest[..digest.len().min(len)]
}
