//! Fixed-width little-endian word arrays with explicit carry/borrow handling.
//!
//! This is the leaf layer of the arithmetic core: every routine here is a
//! bounded, branchless, straight-line function over `[u64; N]`. Nothing in
//! this crate allocates, and nothing here is aware of moduli, Montgomery
//! form, or curves — those live in `bigint`, `field`, and `curve`
//! respectively.
//!
//! Constant-time conditional operations (`cmov`, `cswap`) are built on
//! `subtle::Choice`, which the compiler cannot collapse into a branch: the
//! mask is carried as a data value from the first use to the last.
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A single machine word.
pub type Word = u64;

/// A carry or borrow bit, represented as a full word (0 or 1) so it chains
/// into the next `adc`/`sbb` without a branch.
pub type Carry = Word;

/// An `N`-limb little-endian word array (index 0 is the least significant word).
pub type Limbs<const N: usize> = [Word; N];

/// Computes `a + b + carry_in`, returning `(sum, carry_out)`.
///
/// `carry_out` is 0 or 1. Grounded in the teacher's `k256::arithmetic::util::adc`,
/// generalized from a fixed 4-word chain to arbitrary widths.
#[inline(always)]
pub const fn add_with_carry(a: Word, b: Word, carry_in: Carry) -> (Word, Carry) {
    let wide = (a as u128) + (b as u128) + (carry_in as u128);
    (wide as Word, (wide >> 64) as Carry)
}

/// Computes `a - (b + borrow_in)`, returning `(diff, borrow_out)`.
///
/// `borrow_out` is 0 or 1. Grounded in `k256::arithmetic::util::sbb`.
#[inline(always)]
pub const fn sub_with_borrow(a: Word, b: Word, borrow_in: Carry) -> (Word, Carry) {
    let wide = (a as i128) - (b as i128) - (borrow_in as i128);
    (wide as Word, (wide < 0) as Carry)
}

/// Computes `a + b*c + carry`, returning `(out, carry_out)`.
///
/// The "multiply-accumulate" primitive schoolbook multiplication is built from.
#[inline(always)]
pub const fn mac_with_carry(a: Word, b: Word, c: Word, carry: Word) -> (Word, Word) {
    let wide = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (wide as Word, (wide >> 64) as Word)
}

/// Full product of two words: `a * b = (hi, lo)`.
#[inline(always)]
pub const fn mul_wide(a: Word, b: Word) -> (Word, Word) {
    let wide = (a as u128) * (b as u128);
    (wide as Word, (wide >> 64) as Word)
}

/// `dst = a + b`, returning the final carry-out.
pub fn limbs_add<const N: usize>(dst: &mut Limbs<N>, a: &Limbs<N>, b: &Limbs<N>) -> Carry {
    let mut carry = 0;
    for i in 0..N {
        let (s, c) = add_with_carry(a[i], b[i], carry);
        dst[i] = s;
        carry = c;
    }
    carry
}

/// `dst = a - b`, returning the final borrow-out.
pub fn limbs_sub<const N: usize>(dst: &mut Limbs<N>, a: &Limbs<N>, b: &Limbs<N>) -> Carry {
    let mut borrow = 0;
    for i in 0..N {
        let (d, b_out) = sub_with_borrow(a[i], b[i], borrow);
        dst[i] = d;
        borrow = b_out;
    }
    borrow
}

/// Schoolbook multiplication of two `N`-limb operands into a caller-supplied
/// double-width destination: `dst = a * b`.
///
/// Grounded in `field_montgomery.rs::montgomery_mulmod`'s inner product loop,
/// stripped of the Montgomery reduction (that belongs to the `bigint` layer).
/// Takes slices rather than `Limbs<2*N>` because const-generic arithmetic in
/// array lengths is not available on stable Rust.
/// `2N`-limb destination slice. `dst.len()` must equal `2 * a.len()`.
pub fn limbs_mul_into(dst: &mut [Word], a: &[Word], b: &[Word]) {
    let n = a.len();
    debug_assert_eq!(b.len(), n);
    debug_assert_eq!(dst.len(), 2 * n);
    dst.fill(0);

    for i in 0..n {
        let mut carry = 0;
        for j in 0..n {
            let (out, c) = mac_with_carry(dst[i + j], a[i], b[j], carry);
            dst[i + j] = out;
            carry = c;
        }
        dst[i + n] = carry;
    }
}

/// Writes `src` into `dst` iff `choice` is true, without branching on `choice`.
pub fn limbs_cmov<const N: usize>(dst: &mut Limbs<N>, src: &Limbs<N>, choice: Choice) {
    for i in 0..N {
        dst[i] = Word::conditional_select(&dst[i], &src[i], choice);
    }
}

/// Conditionally swaps `a` and `b` iff `choice` is true, without branching.
pub fn limbs_cswap<const N: usize>(a: &mut Limbs<N>, b: &mut Limbs<N>, choice: Choice) {
    for i in 0..N {
        Word::conditional_swap(&mut a[i], &mut b[i], choice);
    }
}

/// Constant-time equality of two limb arrays.
pub fn limbs_ct_eq<const N: usize>(a: &Limbs<N>, b: &Limbs<N>) -> Choice {
    let mut acc = Choice::from(1u8);
    for i in 0..N {
        acc &= a[i].ct_eq(&b[i]);
    }
    acc
}

/// Constant-time zero test.
pub fn limbs_is_zero<const N: usize>(a: &Limbs<N>) -> Choice {
    limbs_ct_eq(a, &[0; N])
}

/// Variable-time `a < b`, used only on public inputs (e.g. range checks during parsing).
pub fn limbs_lt_vartime<const N: usize>(a: &Limbs<N>, b: &Limbs<N>) -> bool {
    for i in (0..N).rev() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

/// Extracts bit `i` (0 = least significant) of a limb array as a `Choice`.
pub fn limbs_bit<const N: usize>(a: &Limbs<N>, i: usize) -> Choice {
    let limb = i / 64;
    let offset = i % 64;
    if limb >= N {
        return Choice::from(0u8);
    }
    Choice::from(((a[limb] >> offset) & 1) as u8)
}

/// Shifts `a` right by one bit, returning `(shifted, bit_shifted_out)`.
pub fn limbs_shr1<const N: usize>(a: &Limbs<N>) -> (Limbs<N>, Carry) {
    let mut out = [0; N];
    let mut carry_in = 0;
    for i in (0..N).rev() {
        out[i] = (a[i] >> 1) | (carry_in << 63);
        carry_in = a[i] & 1;
    }
    (out, carry_in)
}

/// Shifts `a` left by one bit, returning `(shifted, bit_shifted_out)`.
pub fn limbs_shl1<const N: usize>(a: &Limbs<N>) -> (Limbs<N>, Carry) {
    let mut out = [0; N];
    let mut carry_out = 0;
    for i in 0..N {
        out[i] = (a[i] << 1) | carry_out;
        carry_out = a[i] >> 63;
    }
    (out, carry_out)
}

/// Zeroizes a limb array in place, for types that opt into `zeroize`.
#[cfg(feature = "zeroize")]
pub fn limbs_zeroize<const N: usize>(a: &mut Limbs<N>) {
    a.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_with_carry_basic() {
        assert_eq!(add_with_carry(1, 2, 0), (3, 0));
        assert_eq!(add_with_carry(Word::MAX, 1, 0), (0, 1));
        assert_eq!(add_with_carry(Word::MAX, Word::MAX, 1), (Word::MAX, 1));
    }

    #[test]
    fn sub_with_borrow_basic() {
        assert_eq!(sub_with_borrow(3, 2, 0), (1, 0));
        assert_eq!(sub_with_borrow(0, 1, 0), (Word::MAX, 1));
    }

    #[test]
    fn limbs_add_sub_roundtrip() {
        let a: Limbs<4> = [1, 2, 3, 4];
        let b: Limbs<4> = [5, 6, 7, 8];
        let mut sum = [0; 4];
        limbs_add(&mut sum, &a, &b);
        let mut back = [0; 4];
        limbs_sub(&mut back, &sum, &b);
        assert_eq!(back, a);
    }

    #[test]
    fn cmov_selects_correctly() {
        let mut dst: Limbs<4> = [1, 1, 1, 1];
        let src: Limbs<4> = [2, 2, 2, 2];
        limbs_cmov(&mut dst, &src, Choice::from(0u8));
        assert_eq!(dst, [1, 1, 1, 1]);
        limbs_cmov(&mut dst, &src, Choice::from(1u8));
        assert_eq!(dst, [2, 2, 2, 2]);
    }

    #[test]
    fn mul_wide_matches_u128() {
        let a = 0xFFFF_FFFF_FFFF_FFFFu64;
        let b = 0x1234_5678_9ABC_DEF0u64;
        let (lo, hi) = mul_wide(a, b);
        let expect = (a as u128) * (b as u128);
        assert_eq!(lo as u128 | ((hi as u128) << 64), expect);
    }

    #[test]
    fn limbs_mul_into_matches_schoolbook() {
        let a = [3u64, 0, 0, 0];
        let b = [5u64, 0, 0, 0];
        let mut dst = [0u64; 8];
        limbs_mul_into(&mut dst, &a, &b);
        assert_eq!(dst[0], 15);
        assert!(dst[1..].iter().all(|&w| w == 0));
    }

    #[test]
    fn shr1_shl1_are_inverse_on_even_values() {
        let a: Limbs<4> = [8, 0, 0, 0];
        let (shifted, carry) = limbs_shr1(&a);
        assert_eq!(carry, 0);
        let (back, carry2) = limbs_shl1(&shifted);
        assert_eq!(carry2, 0);
        assert_eq!(back, a);
    }

    proptest! {
        #[test]
        fn add_sub_roundtrip_random(a: [u64; 4], b: [u64; 4]) {
            let mut sum = [0; 4];
            let carry = limbs_add(&mut sum, &a, &b);
            let mut back = [0; 4];
            let borrow = limbs_sub(&mut back, &sum, &b);
            prop_assert_eq!(back, a);
            prop_assert_eq!(borrow, 0);
            let _ = carry;
        }

        #[test]
        fn bit_extraction_matches_shift(a: [u64; 4], i in 0usize..256) {
            let bit = limbs_bit(&a, i);
            let expect = (a[i / 64] >> (i % 64)) & 1;
            prop_assert_eq!(bool::from(bit), expect == 1);
        }
    }
}
