//! Modular arithmetic over a [`WideUint`] modulus
//!
//! Every function here accepts operands of any size and reduces them first.
//! The modulus may be as large as `2^BITS - 1`; sums and products never rely
//! on spare headroom above the modulus.
//!
//! A zero modulus panics with a divide-by-zero message, matching the `%`
//! operator.

use crate::error::{Error, Result};
use crate::limb::Limb;
use crate::wide::WideUint;

/// `x mod m`
#[inline]
pub fn reduce<L: Limb>(x: WideUint<L>, m: WideUint<L>) -> WideUint<L> {
    x % m
}

/// `(a + b) mod m`
pub fn add_mod<L: Limb>(a: WideUint<L>, b: WideUint<L>, m: WideUint<L>) -> WideUint<L> {
    add_reduced(a % m, b % m, m)
}

/// `(a - b) mod m`
pub fn sub_mod<L: Limb>(a: WideUint<L>, b: WideUint<L>, m: WideUint<L>) -> WideUint<L> {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a.wrapping_sub(b)
    } else {
        m.wrapping_sub(b.wrapping_sub(a))
    }
}

/// `(a * b) mod m`
///
/// The true product can be twice as wide as the type, so it is built by
/// shift-and-add: scan `b` from its least significant bit, doubling a
/// running copy of `a` mod `m` and adding it in for every set bit.
pub fn mul_mod<L: Limb>(a: WideUint<L>, b: WideUint<L>, m: WideUint<L>) -> WideUint<L> {
    let mut addend = a % m;
    let mut scalar = b % m;
    let mut acc = WideUint::ZERO;

    while !scalar.is_zero() {
        if scalar.is_odd() {
            acc = add_reduced(acc, addend, m);
        }
        scalar = scalar.shr_bits(1);
        if !scalar.is_zero() {
            addend = add_reduced(addend, addend, m);
        }
    }
    acc
}

/// `base^exponent mod modulus` by square-and-multiply.
///
/// The exponent is scanned from its least significant bit; `base` is
/// squared every step and multiplied into the accumulator when the bit is
/// set. `exponent == 0` gives 1 for any base (including 0), except that
/// everything is 0 modulo 1.
pub fn mod_exp<L: Limb>(
    base: WideUint<L>,
    exponent: WideUint<L>,
    modulus: WideUint<L>,
) -> WideUint<L> {
    if modulus == WideUint::ONE {
        return WideUint::ZERO;
    }

    let mut base = base % modulus;
    let mut exponent = exponent;
    let mut acc = WideUint::ONE;

    while !exponent.is_zero() {
        if exponent.is_odd() {
            acc = mul_mod(acc, base, modulus);
        }
        exponent = exponent.shr_bits(1);
        if !exponent.is_zero() {
            base = mul_mod(base, base, modulus);
        }
    }
    acc
}

/// Modular inverse by Fermat's little theorem: `x^(p-2) mod p`.
///
/// Only meaningful when `p` is prime and `x` is not a multiple of `p`. Any
/// other input produces a value that is not an inverse; nothing is checked.
/// Use [`checked_mod_inverse`] when the preconditions are not guaranteed.
pub fn mod_inverse<L: Limb>(x: WideUint<L>, p: WideUint<L>) -> WideUint<L> {
    mod_exp(x, p.wrapping_sub(WideUint::from_u64(2)), p)
}

/// [`mod_inverse`] with its preconditions verified.
///
/// Fails with [`Error::InvalidModulus`] for `p < 2` and with
/// [`Error::NotInvertible`] when `x ≡ 0 (mod p)` or when the Fermat result
/// does not multiply back to one (which is what happens for most composite
/// moduli).
pub fn checked_mod_inverse<L: Limb>(x: WideUint<L>, p: WideUint<L>) -> Result<WideUint<L>> {
    if p < WideUint::from_u64(2) {
        return Err(Error::InvalidModulus);
    }
    if (x % p).is_zero() {
        return Err(Error::NotInvertible);
    }

    let inverse = mod_inverse(x, p);
    if mul_mod(x, inverse, p) == WideUint::ONE {
        Ok(inverse)
    } else {
        Err(Error::NotInvertible)
    }
}

/// `(a + b) mod m` for `a, b < m`.
///
/// If the sum carries out of the top limb the true sum is `sum + 2^BITS`,
/// which is still below `2m`, so one wrapping subtraction lands in range.
#[inline]
fn add_reduced<L: Limb>(a: WideUint<L>, b: WideUint<L>, m: WideUint<L>) -> WideUint<L> {
    let (sum, carry) = a.overflowing_add(b);
    if carry || sum >= m {
        sum.wrapping_sub(m)
    } else {
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{U128, U256};

    fn u(v: u64) -> U128 {
        U128::from_u64(v)
    }

    #[test]
    fn test_mod_exp_small() {
        assert_eq!(mod_exp(u(4), u(13), u(497)), 445u64);
        assert_eq!(mod_exp(u(2), u(10), u(1_000_000)), 1024u64);
        assert_eq!(mod_exp(u(7), u(0), u(13)), 1u64);
        assert_eq!(mod_exp(u(0), u(0), u(13)), 1u64);
        assert_eq!(mod_exp(u(0), u(5), u(13)), 0u64);
        assert_eq!(mod_exp(u(5), u(3), u(1)), 0u64);
        assert_eq!(mod_exp(u(5), u(0), u(1)), 0u64);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_mod_exp_zero_modulus_panics() {
        let _ = mod_exp(u(3), u(2), U128::ZERO);
    }

    #[test]
    fn test_fermat_small_primes() {
        for p in [3u64, 5, 7, 11, 13, 97, 65_537, 1_000_000_007] {
            for a in [1u64, 2, 3, 10, 12_345] {
                if a % p == 0 {
                    continue;
                }
                assert_eq!(mod_exp(u(a), u(p - 1), u(p)), 1u64, "a={} p={}", a, p);
            }
        }
    }

    #[test]
    fn test_fermat_mersenne_127() {
        // 2^127 - 1 is prime
        let p = U128::from_u128((1u128 << 127) - 1);
        for a in [2u64, 3, 0xdead_beef, u64::MAX] {
            assert_eq!(mod_exp(u(a), p - 1u64, p), 1u64);
        }
    }

    #[test]
    fn test_mul_mod_near_full_width() {
        // m = 2^256 - 189 (prime); (m - 1)^2 ≡ 1
        let m = U256::MAX - 188u64;
        let minus_one = m - 1u64;
        assert_eq!(mul_mod(minus_one, minus_one, m), 1u64);
        assert_eq!(mul_mod(minus_one, U256::from_u64(2), m), m - 2u64);
        assert_eq!(add_mod(minus_one, minus_one, m), m - 2u64);
        assert_eq!(sub_mod(U256::ONE, U256::from_u64(2), m), minus_one);
    }

    #[test]
    fn test_mul_mod_matches_native() {
        let m = 0xffff_ffff_ffff_ffc5u64; // largest 64-bit prime
        let pairs = [(3u64, 5u64), (u64::MAX, u64::MAX), (m - 1, m - 1), (1 << 63, 12345)];
        for (a, b) in pairs {
            let expected = ((a as u128 * b as u128) % m as u128) as u64;
            assert_eq!(mul_mod(u(a), u(b), u(m)), expected);
        }
    }

    #[test]
    fn test_sub_mod_wraps_into_range() {
        assert_eq!(sub_mod(u(3), u(5), u(7)), 5u64);
        assert_eq!(sub_mod(u(5), u(3), u(7)), 2u64);
        assert_eq!(sub_mod(u(10), u(3), u(7)), 0u64);
    }

    #[test]
    fn test_mod_inverse() {
        let p = u(97);
        for x in 1..97u64 {
            let inv = mod_inverse(u(x), p);
            assert_eq!(mul_mod(u(x), inv, p), 1u64);
        }
    }

    #[test]
    fn test_checked_mod_inverse() {
        assert_eq!(checked_mod_inverse(u(3), u(7)), Ok(u(5)));
        assert_eq!(checked_mod_inverse(u(14), u(7)), Err(Error::NotInvertible));
        assert_eq!(checked_mod_inverse(u(3), u(1)), Err(Error::InvalidModulus));
        assert_eq!(checked_mod_inverse(u(3), u(0)), Err(Error::InvalidModulus));
        // 15 is composite; Fermat does not give an inverse of 2 here.
        assert_eq!(checked_mod_inverse(u(2), u(15)), Err(Error::NotInvertible));
    }
}
