//! Fixed-width unsigned integers built from two half-width limbs
//!
//! `value = high * 2^(BITS/2) + low`. Every arithmetic result is reduced
//! modulo `2^BITS`; wraparound is the contract, not an error.

use crate::error::{Error, Result};
use crate::limb::Limb;

/// An unsigned integer twice as wide as its limb type `L`.
///
/// Field order matters: the derived `Ord` compares `high` first, which is
/// the numeric order.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideUint<L> {
    high: L,
    low: L,
}

/// 128-bit unsigned integer (two `u64` limbs)
pub type U128 = WideUint<u64>;

/// 256-bit unsigned integer (two [`U128`] limbs)
pub type U256 = WideUint<U128>;

impl<L: Limb> WideUint<L> {
    /// Width in bits
    pub const BITS: u32 = 2 * L::BITS;

    pub const ZERO: Self = Self {
        high: L::ZERO,
        low: L::ZERO,
    };

    pub const ONE: Self = Self {
        high: L::ZERO,
        low: L::ONE,
    };

    pub const MAX: Self = Self {
        high: L::MAX,
        low: L::MAX,
    };

    /// Build from explicit halves.
    #[inline(always)]
    pub const fn from_parts(high: L, low: L) -> Self {
        Self { high, low }
    }

    /// Zero-extend a native value into the low limb.
    #[inline(always)]
    pub fn from_u64(value: u64) -> Self {
        Self {
            high: L::ZERO,
            low: L::from_u64(value),
        }
    }

    #[inline(always)]
    pub fn low_half(self) -> L {
        self.low
    }

    #[inline(always)]
    pub fn high_half(self) -> L {
        self.high
    }

    /// The least significant 64 bits (truncating).
    #[inline(always)]
    pub fn low_u64(self) -> u64 {
        self.low.low_u64()
    }

    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.high.is_zero() && self.low.is_zero()
    }

    #[inline(always)]
    pub fn is_odd(self) -> bool {
        self.low.low_u64() & 1 == 1
    }

    // ------------------------------------------------------------------
    // Addition / subtraction
    // ------------------------------------------------------------------

    /// Add with carry propagated from `low` into `high`; the returned flag
    /// is the carry out of `high`.
    #[inline]
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (low, carry) = self.low.overflowing_add(rhs.low);
        let (high, c1) = self.high.overflowing_add(rhs.high);
        let (high, c2) = high.overflowing_add(L::from_u64(carry as u64));
        (Self { high, low }, c1 || c2)
    }

    /// Subtract with borrow propagated from `low` into `high`; the returned
    /// flag is the borrow out of `high`.
    #[inline]
    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (low, borrow) = self.low.overflowing_sub(rhs.low);
        let (high, b1) = self.high.overflowing_sub(rhs.high);
        let (high, b2) = high.overflowing_sub(L::from_u64(borrow as u64));
        (Self { high, low }, b1 || b2)
    }

    #[inline]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    #[inline]
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.overflowing_add(rhs) {
            (sum, false) => Some(sum),
            (_, true) => None,
        }
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.overflowing_sub(rhs) {
            (diff, false) => Some(diff),
            (_, true) => None,
        }
    }

    // ------------------------------------------------------------------
    // Multiplication
    // ------------------------------------------------------------------

    /// Full `2 * BITS` product, returned as `(low, high)`.
    ///
    /// Each operand is split into its limbs (quarter width of the result),
    /// the four cross products are formed with the limb's own widening
    /// multiply, and the middle column is summed with explicit carries.
    pub fn widening_mul(self, rhs: Self) -> (Self, Self) {
        let (ll_lo, ll_hi) = self.low.widening_mul(rhs.low);
        let (lh_lo, lh_hi) = self.low.widening_mul(rhs.high);
        let (hl_lo, hl_hi) = self.high.widening_mul(rhs.low);
        let (hh_lo, hh_hi) = self.high.widening_mul(rhs.high);

        let (r1, c1) = ll_hi.overflowing_add(lh_lo);
        let (r1, c2) = r1.overflowing_add(hl_lo);
        let carry1 = c1 as u64 + c2 as u64;

        let (r2, c3) = lh_hi.overflowing_add(hl_hi);
        let (r2, c4) = r2.overflowing_add(hh_lo);
        let (r2, c5) = r2.overflowing_add(L::from_u64(carry1));
        let carry2 = c3 as u64 + c4 as u64 + c5 as u64;

        // The full product fits in four limbs, so this cannot wrap.
        let r3 = hh_hi.wrapping_add(L::from_u64(carry2));

        (
            Self {
                high: r1,
                low: ll_lo,
            },
            Self { high: r3, low: r2 },
        )
    }

    /// Low `BITS` of the product.
    ///
    /// Only `low * low` needs the full double-width product; the cross terms
    /// with the high limbs land entirely in the upper half (or beyond it)
    /// and are added with wraparound.
    #[inline]
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let (low, carry) = self.low.widening_mul(rhs.low);
        let high = carry
            .wrapping_add(self.high.wrapping_mul(rhs.low))
            .wrapping_add(self.low.wrapping_mul(rhs.high));
        Self { high, low }
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let (low, high) = self.widening_mul(rhs);
        if high.is_zero() { Some(low) } else { None }
    }

    /// `self^exp` modulo `2^BITS`.
    pub fn wrapping_pow(self, mut exp: u32) -> Self {
        let mut base = self;
        let mut acc = Self::ONE;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.wrapping_mul(base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.wrapping_mul(base);
            }
        }
        acc
    }

    // ------------------------------------------------------------------
    // Shifts and bit queries
    // ------------------------------------------------------------------

    /// Logical left shift; shifts of `BITS` or more give zero.
    pub fn shl_bits(self, shift: u32) -> Self {
        let half = L::BITS;
        if shift == 0 {
            self
        } else if shift >= Self::BITS {
            Self::ZERO
        } else if shift >= half {
            Self {
                high: self.low.shl_bits(shift - half),
                low: L::ZERO,
            }
        } else {
            Self {
                high: self.high.shl_bits(shift) | self.low.shr_bits(half - shift),
                low: self.low.shl_bits(shift),
            }
        }
    }

    /// Logical right shift; shifts of `BITS` or more give zero.
    pub fn shr_bits(self, shift: u32) -> Self {
        let half = L::BITS;
        if shift == 0 {
            self
        } else if shift >= Self::BITS {
            Self::ZERO
        } else if shift >= half {
            Self {
                high: L::ZERO,
                low: self.high.shr_bits(shift - half),
            }
        } else {
            Self {
                high: self.high.shr_bits(shift),
                low: self.low.shr_bits(shift) | self.high.shl_bits(half - shift),
            }
        }
    }

    pub fn leading_zeros(self) -> u32 {
        if self.high.is_zero() {
            L::BITS + self.low.leading_zeros()
        } else {
            self.high.leading_zeros()
        }
    }

    pub fn trailing_zeros(self) -> u32 {
        if self.low.is_zero() {
            L::BITS + self.high.trailing_zeros()
        } else {
            self.low.trailing_zeros()
        }
    }

    pub fn count_ones(self) -> u32 {
        self.high.count_ones() + self.low.count_ones()
    }

    /// Number of significant bits (zero for zero).
    pub fn bits(self) -> u32 {
        Self::BITS - self.leading_zeros()
    }

    /// Whether bit `index` is set; out-of-range indices read as zero.
    pub fn bit(self, index: u32) -> bool {
        if index >= Self::BITS {
            return false;
        }
        let half = L::BITS;
        let limb = if index >= half {
            self.high.shr_bits(index - half)
        } else {
            self.low.shr_bits(index)
        };
        limb.low_u64() & 1 == 1
    }

    // ------------------------------------------------------------------
    // Division
    // ------------------------------------------------------------------

    /// Binary long division.
    ///
    /// The divisor is aligned to the dividend's leading bit, then each step
    /// compares, conditionally subtracts, and shifts the divisor right by
    /// one, collecting one quotient bit per step.
    pub fn checked_div_rem(self, divisor: Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self < divisor {
            return Ok((Self::ZERO, self));
        }

        // self >= divisor > 0, so the dividend has at most as many leading
        // zeros as the divisor and the aligned divisor never overflows.
        let shift = divisor.leading_zeros() - self.leading_zeros();
        let mut aligned = divisor.shl_bits(shift);
        let mut remainder = self;
        let mut quotient = Self::ZERO;

        for _ in 0..=shift {
            quotient = quotient.shl_bits(1);
            if remainder >= aligned {
                remainder = remainder.wrapping_sub(aligned);
                quotient.low = quotient.low | L::ONE;
            }
            aligned = aligned.shr_bits(1);
        }

        Ok((quotient, remainder))
    }

    /// Quotient and remainder.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero, like the native integer operators.
    pub fn div_rem(self, divisor: Self) -> (Self, Self) {
        match self.checked_div_rem(divisor) {
            Ok(qr) => qr,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }

    pub fn checked_div(self, divisor: Self) -> Option<Self> {
        self.checked_div_rem(divisor).ok().map(|(q, _)| q)
    }

    pub fn checked_rem(self, divisor: Self) -> Option<Self> {
        self.checked_div_rem(divisor).ok().map(|(_, r)| r)
    }
}

// ----------------------------------------------------------------------
// Width-specific constructors (usable in const context)
// ----------------------------------------------------------------------

impl U128 {
    #[inline(always)]
    pub const fn from_u128(value: u128) -> Self {
        Self::from_parts((value >> 64) as u64, value as u64)
    }

    #[inline(always)]
    pub const fn as_u128(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }
}

impl U256 {
    /// Build from four 64-bit words, most significant first.
    pub const fn from_words(words: [u64; 4]) -> Self {
        Self::from_parts(
            U128::from_parts(words[0], words[1]),
            U128::from_parts(words[2], words[3]),
        )
    }

    /// The four 64-bit words, most significant first.
    pub const fn to_words(self) -> [u64; 4] {
        [self.high.high, self.high.low, self.low.high, self.low.low]
    }
}

// ----------------------------------------------------------------------
// Every WideUint is itself a limb
// ----------------------------------------------------------------------

impl<L: Limb> Limb for WideUint<L> {
    const BITS: u32 = 2 * L::BITS;
    const ZERO: Self = WideUint::<L>::ZERO;
    const ONE: Self = WideUint::<L>::ONE;
    const MAX: Self = WideUint::<L>::MAX;

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        WideUint::from_u64(value)
    }

    #[inline(always)]
    fn low_u64(self) -> u64 {
        WideUint::low_u64(self)
    }

    #[inline(always)]
    fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        WideUint::overflowing_add(self, rhs)
    }

    #[inline(always)]
    fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        WideUint::overflowing_sub(self, rhs)
    }

    #[inline(always)]
    fn wrapping_mul(self, rhs: Self) -> Self {
        WideUint::wrapping_mul(self, rhs)
    }

    #[inline(always)]
    fn widening_mul(self, rhs: Self) -> (Self, Self) {
        WideUint::widening_mul(self, rhs)
    }

    #[inline(always)]
    fn shl_bits(self, shift: u32) -> Self {
        WideUint::shl_bits(self, shift)
    }

    #[inline(always)]
    fn shr_bits(self, shift: u32) -> Self {
        WideUint::shr_bits(self, shift)
    }

    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        WideUint::leading_zeros(self)
    }

    #[inline(always)]
    fn trailing_zeros(self) -> u32 {
        WideUint::trailing_zeros(self)
    }

    #[inline(always)]
    fn count_ones(self) -> u32 {
        WideUint::count_ones(self)
    }

    #[inline(always)]
    fn is_zero(self) -> bool {
        WideUint::is_zero(self)
    }
}
