//! Limb abstraction
//!
//! A [`WideUint`](crate::WideUint) is two limbs of the same type. The native
//! `u64` is the smallest limb; every `WideUint` is itself a limb, so the
//! 256-bit type is built by nesting the 128-bit one and forwards all of its
//! half-width work through this trait.

use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, BitXor, Not};

/// Operations a type must provide to serve as one half of a `WideUint`.
///
/// All arithmetic is modulo `2^BITS`. Shifts by `BITS` or more yield zero
/// instead of panicking.
pub trait Limb:
    Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Width in bits
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Zero-extend a native value.
    fn from_u64(value: u64) -> Self;

    /// The least significant 64 bits.
    fn low_u64(self) -> u64;

    fn overflowing_add(self, rhs: Self) -> (Self, bool);

    fn overflowing_sub(self, rhs: Self) -> (Self, bool);

    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Full double-width product, returned as `(low, high)`.
    fn widening_mul(self, rhs: Self) -> (Self, Self);

    fn shl_bits(self, shift: u32) -> Self;

    fn shr_bits(self, shift: u32) -> Self;

    fn leading_zeros(self) -> u32;

    fn trailing_zeros(self) -> u32;

    fn count_ones(self) -> u32;

    #[inline(always)]
    fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    #[inline(always)]
    fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    #[inline(always)]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl Limb for u64 {
    const BITS: u32 = u64::BITS;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MAX: Self = u64::MAX;

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        value
    }

    #[inline(always)]
    fn low_u64(self) -> u64 {
        self
    }

    #[inline(always)]
    fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        u64::overflowing_add(self, rhs)
    }

    #[inline(always)]
    fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        u64::overflowing_sub(self, rhs)
    }

    #[inline(always)]
    fn wrapping_mul(self, rhs: Self) -> Self {
        u64::wrapping_mul(self, rhs)
    }

    #[inline(always)]
    fn widening_mul(self, rhs: Self) -> (Self, Self) {
        let product = (self as u128) * (rhs as u128);
        (product as u64, (product >> 64) as u64)
    }

    #[inline(always)]
    fn shl_bits(self, shift: u32) -> Self {
        self.checked_shl(shift).unwrap_or(0)
    }

    #[inline(always)]
    fn shr_bits(self, shift: u32) -> Self {
        self.checked_shr(shift).unwrap_or(0)
    }

    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        u64::leading_zeros(self)
    }

    #[inline(always)]
    fn trailing_zeros(self) -> u32 {
        u64::trailing_zeros(self)
    }

    #[inline(always)]
    fn count_ones(self) -> u32 {
        u64::count_ones(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Limb;

    #[test]
    fn test_u64_shifts_saturate_to_zero() {
        assert_eq!(Limb::shl_bits(1u64, 63), 1 << 63);
        assert_eq!(Limb::shl_bits(1u64, 64), 0);
        assert_eq!(Limb::shr_bits(u64::MAX, 64), 0);
        assert_eq!(Limb::shr_bits(u64::MAX, 200), 0);
    }

    #[test]
    fn test_u64_widening_mul() {
        let (lo, hi) = Limb::widening_mul(u64::MAX, u64::MAX);
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        assert_eq!(lo, 1);
        assert_eq!(hi, u64::MAX - 1);
    }
}
