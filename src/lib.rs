//! `hll-estimator` is a HyperLogLog cardinality estimator: it approximates the
//! number of distinct elements in a batch of values using a fixed array of
//! rank registers instead of storing the elements themselves.
//!
//! The crate is split into the estimator core and a thin batch CLI:
//! - [`hash`] maps raw 32-bit inputs to uniformly distributed digests.
//! - [`decompose`] splits a digest into a bucket index and a rank value.
//! - [`sketch`] holds the register array and computes the bias-corrected
//!   estimate, including merge of same-sized sketches.
//! - [`distribution`] tallies the empirical rank distribution of a batch.
//! - [`protocol`] parses the count-prefixed stdin batch format.
//! - [`cli`] dispatches the `estimate`/`hll`, `rho-dist` and
//!   `registers-sample` modes exposed by the `hll` binary.
//!
//! All hashing is fixed and unseeded, so register snapshots and estimates are
//! reproducible byte-for-byte across runs.
pub mod cli;
pub mod decompose;
pub mod distribution;
pub mod hash;
pub mod protocol;
pub mod sketch;
