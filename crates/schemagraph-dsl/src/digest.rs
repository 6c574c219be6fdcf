//! Schema digests (versioned).
//!
//! Assembled schema units need a stable identity for reproducible output and
//! for recording what was committed. We use a simple, deterministic,
//! non-cryptographic digest:
//!
//! - algorithm: **FNV-1a 64-bit**
//! - input: length-prefixed UTF-8 fields of a canonical encoding
//! - output: `"fnv1a64:<16 lowercase hex digits>"`
//!
//! This digest is **not** a security primitive.

/// Prefix used in serialized digests.
pub const SCHEMA_DIGEST_V1_PREFIX: &str = "fnv1a64:";

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001b3;

/// Incremental FNV-1a 64-bit hasher.
///
/// Fields fed through [`Fnv1a64::field`] are length-prefixed, so `("ab", "c")`
/// and `("a", "bc")` digest differently whatever bytes the text contains.
/// Variable-length lists are introduced with [`Fnv1a64::count`].
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a64 {
    hash: u64,
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self {
            hash: FNV_OFFSET_BASIS,
        }
    }
}

impl Fnv1a64 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.hash ^= u64::from(*b);
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    /// Feed a length or element count as 8 little-endian bytes.
    pub fn count(&mut self, n: usize) {
        self.update(&(n as u64).to_le_bytes());
    }

    pub fn field(&mut self, value: &str) {
        self.count(value.len());
        self.update(value.as_bytes());
    }

    pub fn finish(&self) -> u64 {
        self.hash
    }

    /// Render as `"fnv1a64:<hex>"`.
    pub fn digest(&self) -> String {
        format!("{SCHEMA_DIGEST_V1_PREFIX}{:016x}", self.hash)
    }
}
