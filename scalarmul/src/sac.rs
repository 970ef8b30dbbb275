//! Sign-aligned-column (GLV-SAC) recoding of a decomposed scalar.
//!
//! Faz-Hernandez, Longa, Sanchez 2013. Peels mini-scalars from the bottom up
//! into columns that share a single sign bit (`b_{0,i}`) and, for the `M = 2`
//! case this workspace concretely supports, a single table-index bit
//! (`b_{1,i}`). Every loop runs a fixed number of iterations tied to the
//! modulus width, never to the values being recoded.
use crate::glv::Decomposed;
use bigint::BigInt;
use subtle::Choice;

/// Upper bound on recoded columns, mirroring `bigint`'s `MAX_LIMBS` scratch
/// bound (16 limbs * 64 bits + 1).
const MAX_COLUMNS: usize = 16 * 64 + 1;

/// A sign-aligned-column recoding of a decomposed scalar.
#[derive(Clone, Copy)]
pub struct Recoded {
    sign: [Choice; MAX_COLUMNS],
    index: [usize; MAX_COLUMNS],
    len: usize,
}

impl Recoded {
    /// Number of columns, from least to most significant.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no columns (never true in practice: `recode`
    /// always produces at least one).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The table index (`0` or `1` for the `M = 2` case) for column `i`.
    pub fn column_index(&self, i: usize) -> usize {
        self.index[i]
    }

    /// The sign bit for column `i`: `true` means the table entry should be
    /// negated before use.
    pub fn sign_bit(&self, i: usize) -> Choice {
        self.sign[i]
    }
}

fn bit_or_zero<const N: usize>(x: &BigInt<N>, i: usize) -> Choice {
    if i >= N * 64 {
        Choice::from(0u8)
    } else {
        x.bit(i)
    }
}

fn one_limbs<const N: usize>() -> [limbs::Word; N] {
    let mut out = [0u64; N];
    out[0] = 1;
    out
}

/// Recodes a decomposed scalar into sign-aligned columns.
///
/// `b_{0,i} = 1 - k0.bit(i+1)`; `b_{1,i} = lsb(k1)`, with
/// `k1 <- floor(k1/2) + (b_{1,i} & b_{0,i})` after each column, following the
/// overall digit sign `d_{0,i} = 2*b_{0,i} - 1` applied to every column in
/// lockstep (hence "sign-aligned").
pub fn recode<const N: usize>(decomposed: &Decomposed<N>) -> Recoded {
    let l = N * 64 + 1;
    debug_assert!(l <= MAX_COLUMNS);

    let k0 = decomposed.k0;
    let mut k1 = decomposed.k1;

    let mut sign = [Choice::from(0u8); MAX_COLUMNS];
    let mut index = [0usize; MAX_COLUMNS];

    for i in 0..l {
        let b0 = !bit_or_zero(&k0, i + 1);
        let b1 = k1.is_odd();

        // `b0` is the recoding digit's sign: the table entry for this column
        // is negated exactly when `b0` is set, so the column sign here is
        // `b0` itself, not its complement.
        sign[i] = b0;
        index[i] = usize::from(bool::from(b1));

        let (k1_half, _) = limbs::limbs_shr1(k1.as_limbs());
        let mut k1_inc = [0u64; N];
        limbs::limbs_add(&mut k1_inc, &k1_half, &one_limbs::<N>());
        let should_inc = b1 & b0;
        k1 = BigInt::conditional_select(&BigInt::new(k1_half), &BigInt::new(k1_inc), should_inc);
    }

    // The digit at the top row is always forced positive: there is no
    // row above it to borrow a sign from, and `bit_or_zero` returning zero
    // past the end of `k0`'s limbs must not be relied on to produce this by
    // coincidence when `l` exceeds `k0`'s bit width.
    sign[l - 1] = Choice::from(0u8);

    Recoded { sign, index, len: l }
}
