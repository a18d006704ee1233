pub mod hash;

pub use hash::{base36_digest, fmix32, hex_digest, mixed_hex_digest, string_hash, truncated};
