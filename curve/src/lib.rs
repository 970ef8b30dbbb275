//! Short-Weierstrass and twisted-Edwards point arithmetic.
//!
//! Short-Weierstrass points are carried in three representations
//! simultaneously, mirroring `primeorder`'s Affine/Projective split plus a
//! Jacobian sibling this workspace adds: affine at the boundary, projective
//! and Jacobian to avoid inversions while accumulating additions. Twisted
//! Edwards gets its own affine-only module with a unified, already-complete
//! addition law.
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod twisted_edwards;
pub mod weierstrass;

pub use field::CoreError;
