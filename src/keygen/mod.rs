//! Private key generation
//!
//! Scalars are drawn from the operating system's entropy source and
//! rejection-sampled into `[1, n - 1]`, where `n` is the generator order.
//! Curves without a known order fall back to `[1, p - 1]`.

use thiserror::Error;
use wideint_core::{CurveParameters, KeyPair, U256};

/// Rejected draws before giving up
const MAX_ATTEMPTS: usize = 1024;

#[derive(Error, Debug)]
pub enum KeygenError {
    #[error("Failed to read entropy: {0}")]
    Entropy(String),

    #[error("Scalar range is empty (bound must be at least 2)")]
    EmptyRange,

    #[error("No scalar accepted after {0} attempts")]
    Exhausted(usize),
}

/// Exclusive upper bound for private scalars
pub fn scalar_bound(params: &CurveParameters) -> U256 {
    params.order.unwrap_or(params.p())
}

/// Random private scalar in `[1, bound - 1]`
pub fn random_scalar(params: &CurveParameters) -> Result<U256, KeygenError> {
    sample_below(scalar_bound(params), |buf| {
        getrandom::getrandom(buf).map_err(|e| KeygenError::Entropy(e.to_string()))
    })
}

/// Random private scalar together with its public point
pub fn generate_keypair(params: &CurveParameters) -> Result<KeyPair, KeygenError> {
    let scalar = random_scalar(params)?;
    Ok(KeyPair::new(params, scalar))
}

/// Draw big-endian bytes covering the bound's bit length, mask off the
/// excess high bits and retry until the value lands in `[1, bound - 1]`.
fn sample_below<F>(bound: U256, mut fill: F) -> Result<U256, KeygenError>
where
    F: FnMut(&mut [u8]) -> Result<(), KeygenError>,
{
    if bound < 2u64 {
        return Err(KeygenError::EmptyRange);
    }

    let bits = bound.bits();
    let len = bits.div_ceil(8) as usize;
    let mask = U256::MAX >> (256 - bits);

    for attempt in 0..MAX_ATTEMPTS {
        let mut buf = [0u8; 32];
        fill(&mut buf[32 - len..])?;

        let mut candidate = U256::ZERO;
        for byte in buf {
            candidate = (candidate << 8) | U256::from(byte);
        }
        candidate &= mask;

        if !candidate.is_zero() && candidate < bound {
            log::trace!("scalar accepted after {} rejections", attempt);
            return Ok(candidate);
        }
    }

    Err(KeygenError::Exhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wideint_core::params;

    #[test]
    fn test_random_scalar_in_range() {
        let p192 = params::p192();
        let n = params::P192_N;
        for _ in 0..16 {
            let k = random_scalar(&p192).unwrap();
            assert!(!k.is_zero());
            assert!(k < n);
        }
    }

    #[test]
    fn test_bound_falls_back_to_prime() {
        let mut p192 = params::p192();
        p192.order = None;
        assert_eq!(scalar_bound(&p192), params::P192_P);
        assert_eq!(scalar_bound(&params::p192()), params::P192_N);
    }

    #[test]
    fn test_scalars_differ() {
        let k1 = params::secp256k1();
        let a = random_scalar(&k1).unwrap();
        let b = random_scalar(&k1).unwrap();
        assert_ne!(a, b, "two 256-bit draws should not collide");
    }

    #[test]
    fn test_sample_masks_high_bits() {
        // Bound 50 needs 6 bits; 0xff masks to 63, which is rejected,
        // then 0x2a masks to 42.
        let mut draws = vec![0xffu8, 0x2a].into_iter();
        let k = sample_below(U256::from_u64(50), |buf| {
            buf[0] = draws.next().unwrap();
            Ok(())
        })
        .unwrap();
        assert_eq!(k, U256::from_u64(42));
    }

    #[test]
    fn test_sample_rejects_zero() {
        let mut draws = vec![0u8, 0, 7].into_iter();
        let k = sample_below(U256::from_u64(97), |buf| {
            buf[0] = draws.next().unwrap();
            Ok(())
        })
        .unwrap();
        assert_eq!(k, U256::from_u64(7));
    }

    #[test]
    fn test_empty_range() {
        let result = sample_below(U256::ONE, |_| Ok(()));
        assert!(matches!(result, Err(KeygenError::EmptyRange)));
    }

    #[test]
    fn test_exhausted() {
        let result = sample_below(U256::from_u64(97), |buf| {
            buf.fill(0);
            Ok(())
        });
        assert!(matches!(result, Err(KeygenError::Exhausted(MAX_ATTEMPTS))));
    }

    #[test]
    fn test_keypair_matches_public_key() {
        let p192 = params::p192();
        let pair = generate_keypair(&p192).unwrap();
        assert!(p192.curve.is_on_curve(&pair.public_key()));
        assert!(!pair.public_key().is_infinity());
        // Debug output never contains the scalar
        assert!(format!("{:?}", pair).contains("redacted"));
    }
}
