//! Named curve parameters
//!
//! Both curves have 256-bit coordinates ([`U256`]). P-192 only uses the low
//! 192 bits; secp256k1 has a prime within 2^32 of the type's maximum.

use crate::curve::{Curve, Point};
use crate::ecdh::CurveParameters;
use crate::wide::U256;

/// NIST P-192 field prime: 2^192 - 2^64 - 1
pub const P192_P: U256 = U256::from_words([
    0x0000000000000000,
    0xffffffffffffffff,
    0xfffffffffffffffe,
    0xffffffffffffffff,
]);

/// P-192 coefficient a = p - 3
pub const P192_A: U256 = U256::from_words([
    0x0000000000000000,
    0xffffffffffffffff,
    0xfffffffffffffffe,
    0xfffffffffffffffc,
]);

/// P-192 coefficient b
pub const P192_B: U256 = U256::from_words([
    0x0000000000000000,
    0x64210519e59c80e7,
    0x0fa7e9ab72243049,
    0xfeb8deecc146b9b1,
]);

pub const P192_GX: U256 = U256::from_words([
    0x0000000000000000,
    0x188da80eb03090f6,
    0x7cbf20eb43a18800,
    0xf4ff0afd82ff1012,
]);

pub const P192_GY: U256 = U256::from_words([
    0x0000000000000000,
    0x07192b95ffc8da78,
    0x631011ed6b24cdd5,
    0x73f977a11e794811,
]);

/// Order of the P-192 base point
pub const P192_N: U256 = U256::from_words([
    0x0000000000000000,
    0xffffffffffffffff,
    0xffffffff99def836,
    0x146bc9b1b4d22831,
]);

/// secp256k1 field prime: 2^256 - 2^32 - 977
pub const SECP256K1_P: U256 = U256::from_words([
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xfffffffefffffc2f,
]);

pub const SECP256K1_GX: U256 = U256::from_words([
    0x79be667ef9dcbbac,
    0x55a06295ce870b07,
    0x029bfcdb2dce28d9,
    0x59f2815b16f81798,
]);

pub const SECP256K1_GY: U256 = U256::from_words([
    0x483ada7726a3c465,
    0x5da4fbfc0e1108a8,
    0xfd17b448a6855419,
    0x9c47d08ffb10d4b8,
]);

/// Order of the secp256k1 base point
pub const SECP256K1_N: U256 = U256::from_words([
    0xffffffffffffffff,
    0xfffffffffffffffe,
    0xbaaedce6af48a03b,
    0xbfd25e8cd0364141,
]);

/// Names accepted by [`by_name`].
pub const CURVE_NAMES: &[&str] = &["p192", "secp256k1"];

/// NIST P-192 (secp192r1)
pub fn p192() -> CurveParameters {
    CurveParameters::new(
        Curve::new(P192_P, P192_A, P192_B),
        Point::new(P192_GX, P192_GY),
    )
    .with_order(P192_N)
}

/// secp256k1: y² = x³ + 7
pub fn secp256k1() -> CurveParameters {
    CurveParameters::new(
        Curve::new(SECP256K1_P, U256::ZERO, U256::from_words([0, 0, 0, 7])),
        Point::new(SECP256K1_GX, SECP256K1_GY),
    )
    .with_order(SECP256K1_N)
}

/// Look up a named curve (case-insensitive).
pub fn by_name(name: &str) -> Option<CurveParameters> {
    const P192_ALIASES: &[&str] = &["p192", "p-192", "secp192r1", "prime192v1"];

    if P192_ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(name)) {
        Some(p192())
    } else if "secp256k1".eq_ignore_ascii_case(name) {
        Some(secp256k1())
    } else {
        None
    }
}
