//! HyperLogLog sketch: register array, insertion, merge and the
//! bias-corrected cardinality estimator.

use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

use wyhash::WyHash;

use crate::decompose::{bucket, update_rank, HASH_BITS};
use crate::hash::{fold64, mix32};

/// Smallest supported bucket-index width (m = 16).
pub const MIN_PRECISION: u32 = 4;
/// Largest supported bucket-index width (m = 2^30).
pub const MAX_PRECISION: u32 = 30;

/// Sketch configuration and estimation errors.
#[derive(Debug, PartialEq, Eq)]
pub enum SketchError {
    /// Register count is not a power of two in the supported range.
    InvalidRegisterCount(usize),
    /// Merge attempted between sketches with different register counts.
    RegisterCountMismatch { lhs: usize, rhs: usize },
    /// Register state drove the raw estimate outside the domain of the
    /// large-range logarithmic correction.
    EstimateOutOfDomain,
}

impl std::fmt::Display for SketchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SketchError::InvalidRegisterCount(m) => write!(
                f,
                "invalid register count {m}: must be a power of two in [2^{MIN_PRECISION}, 2^{MAX_PRECISION}]"
            ),
            SketchError::RegisterCountMismatch { lhs, rhs } => {
                write!(f, "cannot merge sketches with {lhs} and {rhs} registers")
            }
            SketchError::EstimateOutOfDomain => {
                write!(f, "raw estimate exceeds the hash space; correction undefined")
            }
        }
    }
}

impl std::error::Error for SketchError {}

/// HyperLogLog sketch with `m = 2^b` registers, each holding the maximum
/// observed rank for its bucket.
///
/// A sketch is created with a fixed register count, accepts a stream of
/// insertions (no deletions) and can be queried or snapshotted at any point.
/// Registers only ever grow.
#[derive(Debug, Clone)]
pub struct Sketch {
    /// Bucket-index bit width, `log2(m)`.
    b: u32,
    /// Bias-correction constant, a pure function of `m` fixed at construction.
    alpha: f64,
    /// One rank-max per bucket, all zero for a fresh sketch.
    registers: Vec<u8>,
    /// Zero-sized build hasher for the generic insertion path.
    build_hasher: BuildHasherDefault<WyHash>,
}

impl Sketch {
    /// Creates a sketch with `m` registers.
    ///
    /// `m` must be a power of two with `log2(m)` in `[4, 30]`; anything else
    /// is a configuration error.
    pub fn new(m: usize) -> Result<Self, SketchError> {
        if !m.is_power_of_two() {
            return Err(SketchError::InvalidRegisterCount(m));
        }
        let b = m.trailing_zeros();
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&b) {
            return Err(SketchError::InvalidRegisterCount(m));
        }
        Ok(Self {
            b,
            alpha: alpha(m),
            registers: vec![0; m],
            build_hasher: BuildHasherDefault::default(),
        })
    }

    /// Number of registers.
    #[inline]
    pub fn m(&self) -> usize {
        self.registers.len()
    }

    /// Bucket-index bit width `log2(m)`.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.b
    }

    /// Insert a raw 32-bit value, mixing it through the hash stage first.
    #[inline]
    pub fn insert_value(&mut self, value: u32) {
        self.insert_digest(mix32(value));
    }

    /// Insert an already-hashed digest.
    ///
    /// Only the targeted register may change, and only upward.
    #[inline]
    pub fn insert_digest(&mut self, digest: u32) {
        let idx = bucket(digest, self.b);
        let rank = update_rank(digest, self.b) as u8;
        if rank > self.registers[idx] {
            self.registers[idx] = rank;
        }
    }

    /// Insert an arbitrary hashable item.
    ///
    /// The item is hashed to 64 bits with the fixed default hasher and folded
    /// into the 32-bit digest space, so this path is as deterministic as the
    /// raw-value one.
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        self.insert_digest(fold64(hasher.finish()));
    }

    /// Number of registers still at zero.
    #[inline]
    pub fn zero_registers(&self) -> usize {
        self.registers.iter().filter(|&&r| r == 0).count()
    }

    /// Registers in bucket-index order, reflecting the sketch at the moment
    /// of the call. Snapshotting has no side effect on the sketch.
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Merge another sketch of the same size into this one, register-wise max.
    ///
    /// Commutative, associative and idempotent: merging equals inserting both
    /// input streams into a single sketch.
    pub fn merge(&mut self, rhs: &Self) -> Result<(), SketchError> {
        if self.m() != rhs.m() {
            return Err(SketchError::RegisterCountMismatch {
                lhs: self.m(),
                rhs: rhs.m(),
            });
        }
        for (lhs_reg, &rhs_reg) in self.registers.iter_mut().zip(&rhs.registers) {
            if rhs_reg > *lhs_reg {
                *lhs_reg = rhs_reg;
            }
        }
        Ok(())
    }

    /// Cardinality estimate with range-dependent bias correction.
    ///
    /// The raw harmonic-mean estimate `alpha * m^2 / sum(2^-reg)` is replaced
    /// by linear counting over empty registers in the small range and by a
    /// logarithmic correction in the large range. The result is always
    /// non-negative; an empty sketch estimates exactly 0.
    pub fn estimate(&self) -> Result<f64, SketchError> {
        let m = self.m() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| 1.0 / (1u64 << r) as f64)
            .sum();
        let raw = self.alpha * m * m / sum;

        if raw <= 2.5 * m {
            let zeros = self.zero_registers();
            if zeros > 0 {
                return Ok(m * (m / zeros as f64).ln());
            }
            return Ok(raw);
        }

        let hash_space = (1u64 << HASH_BITS) as f64;
        if raw <= hash_space / 30.0 {
            return Ok(raw);
        }
        let ratio = raw / hash_space;
        if ratio >= 1.0 {
            // ln of a non-positive argument; cannot happen for registers that
            // went through the capping rule with b >= 5, but b = 4 admits it.
            return Err(SketchError::EstimateOutOfDomain);
        }
        Ok(-hash_space * (1.0 - ratio).ln())
    }
}

impl PartialEq for Sketch {
    fn eq(&self, rhs: &Self) -> bool {
        self.b == rhs.b && self.registers == rhs.registers
    }
}

/// Bias-correction constant `alpha_m`: closed forms for the three smallest
/// register counts, asymptotic formula otherwise.
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
