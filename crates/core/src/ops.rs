//! Operator overloads for [`WideUint`]
//!
//! Arithmetic and bitwise operators accept any right-hand side that
//! converts into the same width (`WideUint` itself or a native unsigned
//! integer), so `a + b` and `a + 7u64` go through one implementation.
//! All arithmetic wraps modulo `2^BITS`. `/` and `%` panic on a zero
//! divisor; use [`WideUint::checked_div_rem`] to get an error instead.

use core::cmp::Ordering;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use crate::limb::Limb;
use crate::wide::WideUint;

macro_rules! binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl<L: Limb, R: Into<WideUint<L>>> $trait<R> for WideUint<L> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: R) -> Self {
                let $a = self;
                let $b: WideUint<L> = rhs.into();
                $body
            }
        }

        impl<L: Limb, R: Into<WideUint<L>>> $assign_trait<R> for WideUint<L> {
            #[inline]
            fn $assign_method(&mut self, rhs: R) {
                *self = $trait::$method(*self, rhs);
            }
        }
    };
}

binary_op!(Add, add, AddAssign, add_assign, |a, b| a.wrapping_add(b));
binary_op!(Sub, sub, SubAssign, sub_assign, |a, b| a.wrapping_sub(b));
binary_op!(Mul, mul, MulAssign, mul_assign, |a, b| a.wrapping_mul(b));
binary_op!(Div, div, DivAssign, div_assign, |a, b| a.div_rem(b).0);
binary_op!(Rem, rem, RemAssign, rem_assign, |a, b| a.div_rem(b).1);
binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b| {
    WideUint::from_parts(a.high_half() & b.high_half(), a.low_half() & b.low_half())
});
binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b| {
    WideUint::from_parts(a.high_half() | b.high_half(), a.low_half() | b.low_half())
});
binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, |a, b| {
    WideUint::from_parts(a.high_half() ^ b.high_half(), a.low_half() ^ b.low_half())
});

impl<L: Limb> Not for WideUint<L> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        WideUint::from_parts(!self.high_half(), !self.low_half())
    }
}

impl<L: Limb> Shl<u32> for WideUint<L> {
    type Output = Self;

    #[inline]
    fn shl(self, shift: u32) -> Self {
        self.shl_bits(shift)
    }
}

impl<L: Limb> Shr<u32> for WideUint<L> {
    type Output = Self;

    #[inline]
    fn shr(self, shift: u32) -> Self {
        self.shr_bits(shift)
    }
}

impl<L: Limb> ShlAssign<u32> for WideUint<L> {
    #[inline]
    fn shl_assign(&mut self, shift: u32) {
        *self = self.shl_bits(shift);
    }
}

impl<L: Limb> ShrAssign<u32> for WideUint<L> {
    #[inline]
    fn shr_assign(&mut self, shift: u32) {
        *self = self.shr_bits(shift);
    }
}

// Native operand on the left: `7u64 * a`, `1u64 + a`, ...
macro_rules! native_lhs {
    ($($native:ty),*) => {
        $(
            impl<L: Limb> Add<WideUint<L>> for $native {
                type Output = WideUint<L>;

                fn add(self, rhs: WideUint<L>) -> WideUint<L> {
                    rhs + self
                }
            }

            impl<L: Limb> Sub<WideUint<L>> for $native {
                type Output = WideUint<L>;

                fn sub(self, rhs: WideUint<L>) -> WideUint<L> {
                    WideUint::from(self) - rhs
                }
            }

            impl<L: Limb> Mul<WideUint<L>> for $native {
                type Output = WideUint<L>;

                fn mul(self, rhs: WideUint<L>) -> WideUint<L> {
                    rhs * self
                }
            }

            impl<L: Limb> PartialEq<$native> for WideUint<L> {
                fn eq(&self, other: &$native) -> bool {
                    *self == WideUint::from(*other)
                }
            }

            impl<L: Limb> PartialOrd<$native> for WideUint<L> {
                fn partial_cmp(&self, other: &$native) -> Option<Ordering> {
                    Some(self.cmp(&WideUint::from(*other)))
                }
            }
        )*
    };
}

native_lhs!(u8, u16, u32, u64, u128);

#[cfg(test)]
mod tests {
    use crate::{U128, U256};

    #[test]
    fn test_mixed_operands() {
        let a = U128::from_u64(122);
        assert_eq!(a + 1u64, U128::from_u64(123));
        assert_eq!(1u64 + a, U128::from_u64(123));
        assert_eq!(a * 2u32, U128::from_u64(244));
        assert_eq!(200u64 - a, U128::from_u64(78));
        assert!(a > 100u64);
        assert!(a == 122u8);
    }

    #[test]
    fn test_assign_operators() {
        let mut x = U256::from_u64(10);
        x += 5u64;
        x *= U256::from_u64(3);
        x -= 1u64;
        x /= 4u64;
        x %= 7u64;
        x <<= 3;
        x >>= 1;
        // ((10 + 5) * 3 - 1) / 4 = 11, 11 % 7 = 4, (4 << 3) >> 1 = 16
        assert_eq!(x, 16u64);

        x |= 1u64;
        x &= 0x11u64;
        x ^= 0x10u64;
        assert_eq!(x, 1u64);
    }

    #[test]
    fn test_not_is_max_minus_self() {
        let a = U256::from_u64(0xdead_beef);
        assert_eq!(!a, U256::MAX - a);
        assert_eq!(!U128::ZERO, U128::MAX);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_div_operator_panics_on_zero() {
        let _ = U128::from_u64(1) / U128::ZERO;
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_rem_operator_panics_on_zero() {
        let _ = U256::from_u64(1) % 0u64;
    }
}
