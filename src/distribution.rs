//! Empirical rank distribution over a batch of elements.
//!
//! Unlike register updates, the collector reports the remainder-only rank of
//! every element with no bucket-max reduction, and an all-zero remainder is
//! kept as a distinct "undefined" outcome instead of saturating to the
//! maximum rank.

use std::collections::BTreeMap;

use crate::decompose::{remainder, rho};
use crate::hash::mix32;

/// Frequency table of rank values observed across a batch of elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhoDistribution {
    /// Bucket-index width stripped off each digest before ranking.
    b: u32,
    /// Count per defined rank, keyed in ascending rank order.
    counts: BTreeMap<u32, u64>,
    /// Elements whose remainder had no set bit.
    undefined: u64,
}

impl RhoDistribution {
    /// Creates an empty collector for digests decomposed with width `b`.
    pub fn new(b: u32) -> Self {
        Self {
            b,
            counts: BTreeMap::new(),
            undefined: 0,
        }
    }

    /// Observe a raw 32-bit value, mixing it through the hash stage first.
    #[inline]
    pub fn observe_value(&mut self, value: u32) {
        self.observe_digest(mix32(value));
    }

    /// Observe an already-hashed digest.
    #[inline]
    pub fn observe_digest(&mut self, digest: u32) {
        match rho(remainder(digest, self.b)) {
            Some(rank) => *self.counts.entry(rank).or_insert(0) += 1,
            None => self.undefined += 1,
        }
    }

    /// Defined ranks and their counts, in ascending rank order.
    pub fn ranks(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(&rank, &count)| (rank, count))
    }

    /// Number of elements whose rank was undefined.
    #[inline]
    pub fn undefined(&self) -> u64 {
        self.undefined
    }

    /// Total number of observed elements, undefined ones included.
    pub fn total(&self) -> u64 {
        self.counts.values().sum::<u64>() + self.undefined
    }
}
