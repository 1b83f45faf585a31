//! Digest decomposition into a bucket index and a rank value.
//!
//! A digest is split into its low `b` bits (the bucket index) and the
//! remaining `HASH_BITS - b` high bits (the remainder). The rank is the
//! 1-based position of the lowest set bit of the remainder. An all-zero
//! remainder has no defined rank; the two consumers of the decomposition
//! treat it differently:
//! - register updates saturate it to the maximum representable rank
//!   `HASH_BITS - b + 1` (see [`update_rank`]),
//! - distribution reporting keeps it as a distinct "undefined" outcome
//!   (see [`rho`] returning `None`).

/// Width in bits of the digests produced by the hash stage.
pub const HASH_BITS: u32 = 32;

/// Return the register index encoded in the low `b` bits of `digest`.
#[inline]
pub fn bucket(digest: u32, b: u32) -> usize {
    (digest & ((1 << b) - 1)) as usize
}

/// Return the rank bits left after removing the bucket index.
#[inline]
pub fn remainder(digest: u32, b: u32) -> u32 {
    digest >> b
}

/// 1-based position of the lowest set bit of `remainder`, or `None` when the
/// remainder is all zeros. The minimum defined rank is 1.
#[inline]
pub fn rho(remainder: u32) -> Option<u32> {
    if remainder == 0 {
        None
    } else {
        Some(remainder.trailing_zeros() + 1)
    }
}

/// Rank used for register updates: an all-zero remainder saturates to the
/// maximum representable rank `HASH_BITS - b + 1`.
#[inline]
pub fn update_rank(digest: u32, b: u32) -> u32 {
    rho(remainder(digest, b)).unwrap_or(HASH_BITS - b + 1)
}
