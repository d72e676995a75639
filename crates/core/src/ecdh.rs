//! Elliptic-curve Diffie–Hellman between two parties
//!
//! Both parties hold the same [`CurveParameters`]. Each picks a private
//! scalar, publishes `scalar·G`, and multiplies the peer's public point by
//! its own scalar. Because `a·(b·G) = b·(a·G)` the two derived secrets are
//! the same point.
//!
//! [`public_key`] and [`shared_secret`] are the bare protocol steps and do
//! not validate anything. [`validate_private_scalar`] and
//! [`validate_public_key`] are the optional checks; [`Exchange`] drives a
//! full two-party run phase by phase.

use core::fmt;

use log::{debug, trace};

use crate::curve::{Curve, Point};
use crate::error::{Error, Result};
use crate::limb::Limb;
use crate::wide::{U128, WideUint};

/// Parameters both parties agree on before the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParameters<L: Limb = U128> {
    pub curve: Curve<L>,
    /// Base point G
    pub generator: Point<L>,
    /// Order of G, when known
    pub order: Option<WideUint<L>>,
}

impl<L: Limb> CurveParameters<L> {
    pub const fn new(curve: Curve<L>, generator: Point<L>) -> Self {
        Self {
            curve,
            generator,
            order: None,
        }
    }

    pub fn with_order(mut self, order: WideUint<L>) -> Self {
        self.order = Some(order);
        self
    }

    /// Field prime
    #[inline]
    pub fn p(&self) -> WideUint<L> {
        self.curve.p
    }
}

/// `private·G`
pub fn public_key<L: Limb>(params: &CurveParameters<L>, private: WideUint<L>) -> Point<L> {
    params.curve.scalar_mul(params.generator, private)
}

/// `private·peer_public`
pub fn shared_secret<L: Limb>(
    params: &CurveParameters<L>,
    private: WideUint<L>,
    peer_public: Point<L>,
) -> Point<L> {
    params.curve.scalar_mul(peer_public, private)
}

/// Require `1 <= private <= p - 1`.
pub fn validate_private_scalar<L: Limb>(
    params: &CurveParameters<L>,
    private: WideUint<L>,
) -> Result<()> {
    if private.is_zero() || private >= params.p() {
        return Err(Error::ScalarOutOfRange);
    }
    Ok(())
}

/// Require a finite point on the curve.
pub fn validate_public_key<L: Limb>(params: &CurveParameters<L>, public: &Point<L>) -> Result<()> {
    if public.is_infinity() {
        return Err(Error::InfinityPublicKey);
    }
    params.curve.validate_point(public)
}

/// One party's private scalar and the public point derived from it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeyPair<L: Limb = U128> {
    private: WideUint<L>,
    public: Point<L>,
}

impl<L: Limb> KeyPair<L> {
    pub fn new(params: &CurveParameters<L>, private: WideUint<L>) -> Self {
        Self {
            private,
            public: public_key(params, private),
        }
    }

    /// Like [`KeyPair::new`], rejecting scalars outside `[1, p - 1]`.
    pub fn new_checked(params: &CurveParameters<L>, private: WideUint<L>) -> Result<Self> {
        validate_private_scalar(params, private)?;
        Ok(Self::new(params, private))
    }

    pub fn public_key(&self) -> Point<L> {
        self.public
    }

    /// Combine the private scalar with a peer's public point.
    pub fn diffie_hellman(&self, params: &CurveParameters<L>, peer_public: Point<L>) -> Point<L> {
        shared_secret(params, self.private, peer_public)
    }
}

impl<L: Limb> fmt::Debug for KeyPair<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// Exchange phases, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Setup,
    KeyGeneration,
    PublicExchange,
    SecretDerivation,
    Done,
}

/// Everything observable from a finished exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transcript<L: Limb = U128> {
    pub alice_public: Point<L>,
    pub bob_public: Point<L>,
    pub alice_secret: Point<L>,
    pub bob_secret: Point<L>,
}

impl<L: Limb> Transcript<L> {
    /// Whether both parties derived the same secret.
    pub fn agreed(&self) -> bool {
        self.alice_secret == self.bob_secret
    }
}

#[derive(Clone, Copy, Debug)]
struct Party<L: Limb> {
    keys: KeyPair<L>,
    peer_public: Option<Point<L>>,
    secret: Option<Point<L>>,
}

impl<L: Limb> Party<L> {
    fn new(keys: KeyPair<L>) -> Self {
        Self {
            keys,
            peer_public: None,
            secret: None,
        }
    }

    fn derive(&self, params: &CurveParameters<L>) -> Option<Point<L>> {
        self.peer_public
            .map(|peer| self.keys.diffie_hellman(params, peer))
    }
}

/// Two-party exchange driver.
///
/// [`Exchange::phase`] reports the last completed phase. Each step
/// requires the previous one; calling out of order returns
/// [`Error::Protocol`] and leaves the exchange unchanged.
#[derive(Debug)]
pub struct Exchange<L: Limb = U128> {
    params: CurveParameters<L>,
    phase: Phase,
    parties: Option<(Party<L>, Party<L>)>,
}

impl<L: Limb> Exchange<L> {
    /// Setup: fix the shared parameters.
    pub fn new(params: CurveParameters<L>) -> Self {
        debug!("exchange setup over {}-bit field", WideUint::<L>::BITS);
        Self {
            params,
            phase: Phase::Setup,
            parties: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn params(&self) -> &CurveParameters<L> {
        &self.params
    }

    /// Public keys of both parties, once generated.
    pub fn public_keys(&self) -> Option<(Point<L>, Point<L>)> {
        self.parties
            .as_ref()
            .map(|(alice, bob)| (alice.keys.public_key(), bob.keys.public_key()))
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::Protocol {
                expected,
                found: self.phase,
            })
        }
    }

    /// Each party derives its public point from its own private scalar.
    pub fn generate_keys(&mut self, alice_private: WideUint<L>, bob_private: WideUint<L>) -> Result<()> {
        self.expect_phase(Phase::Setup)?;

        let params = self.params;
        let (alice, bob) = join(
            || KeyPair::new(&params, alice_private),
            || KeyPair::new(&params, bob_private),
        );
        trace!("alice public key {}", alice.public_key());
        trace!("bob public key {}", bob.public_key());

        self.parties = Some((Party::new(alice), Party::new(bob)));
        self.phase = Phase::KeyGeneration;
        debug!("key generation complete");
        Ok(())
    }

    /// Hand each party the other's public point.
    pub fn exchange_public_keys(&mut self) -> Result<()> {
        self.expect_phase(Phase::KeyGeneration)?;

        if let Some((alice, bob)) = self.parties.as_mut() {
            alice.peer_public = Some(bob.keys.public_key());
            bob.peer_public = Some(alice.keys.public_key());
        }
        self.phase = Phase::PublicExchange;
        debug!("public keys exchanged");
        Ok(())
    }

    /// Each party multiplies the received point by its own scalar.
    pub fn derive_secrets(&mut self) -> Result<()> {
        self.expect_phase(Phase::PublicExchange)?;

        let params = self.params;
        if let Some((alice, bob)) = self.parties.as_mut() {
            let (snapshot_a, snapshot_b) = (*alice, *bob);
            let (a, b) = join(|| snapshot_a.derive(&params), || snapshot_b.derive(&params));
            alice.secret = a;
            bob.secret = b;
        }
        self.phase = Phase::SecretDerivation;
        debug!("shared secrets derived");
        Ok(())
    }

    /// Collect the results.
    pub fn finish(&mut self) -> Result<Transcript<L>> {
        self.expect_phase(Phase::SecretDerivation)?;

        let (alice, bob) = self.parties.as_ref().ok_or(Error::Protocol {
            expected: Phase::SecretDerivation,
            found: Phase::Setup,
        })?;
        let transcript = Transcript {
            alice_public: alice.keys.public_key(),
            bob_public: bob.keys.public_key(),
            alice_secret: alice.secret.unwrap_or(Point::Infinity),
            bob_secret: bob.secret.unwrap_or(Point::Infinity),
        };

        self.phase = Phase::Done;
        debug!("exchange done, secrets agree: {}", transcript.agreed());
        Ok(transcript)
    }

    /// Run every phase in order.
    pub fn run(
        params: CurveParameters<L>,
        alice_private: WideUint<L>,
        bob_private: WideUint<L>,
    ) -> Result<Transcript<L>> {
        let mut exchange = Self::new(params);
        exchange.generate_keys(alice_private, bob_private)?;
        exchange.exchange_public_keys()?;
        exchange.derive_secrets()?;
        exchange.finish()
    }
}

/// Run both parties' independent computations.
#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

/// Run both parties' independent computations (sequential fallback).
#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (a(), b())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// y² = x³ + 2x + 3 over GF(97), G = (0, 10) of order 50
    fn toy_params() -> CurveParameters<u64> {
        let curve = Curve::new(U128::from_u64(97), U128::from_u64(2), U128::from_u64(3));
        CurveParameters::new(curve, Point::new(U128::ZERO, U128::from_u64(10)))
            .with_order(U128::from_u64(50))
    }

    #[test]
    fn test_secrets_agree_for_all_small_scalars() {
        let params = toy_params();
        for a in 1..30u64 {
            for b in (1..30u64).step_by(3) {
                let (a, b) = (U128::from_u64(a), U128::from_u64(b));
                let pa = public_key(&params, a);
                let pb = public_key(&params, b);
                assert_eq!(shared_secret(&params, a, pb), shared_secret(&params, b, pa));
            }
        }
    }

    #[test]
    fn test_generator_order() {
        let params = toy_params();
        let n = params.order.unwrap();
        assert_eq!(public_key(&params, n), Point::Infinity);
        assert_ne!(public_key(&params, n / 2u64), Point::Infinity);
        assert_eq!(public_key(&params, n + 1u64), params.generator);
    }

    #[test]
    fn test_exchange_phases() {
        let mut exchange = Exchange::new(toy_params());
        assert_eq!(exchange.phase(), Phase::Setup);
        assert!(exchange.public_keys().is_none());

        exchange.generate_keys(U128::from_u64(7), U128::from_u64(11)).unwrap();
        assert_eq!(exchange.phase(), Phase::KeyGeneration);
        assert!(exchange.public_keys().is_some());

        exchange.exchange_public_keys().unwrap();
        exchange.derive_secrets().unwrap();
        let transcript = exchange.finish().unwrap();
        assert_eq!(exchange.phase(), Phase::Done);
        assert!(transcript.agreed());

        let params = toy_params();
        let expected = params.curve.scalar_mul(params.generator, U128::from_u64(77));
        assert_eq!(transcript.alice_secret, expected);
    }

    #[test]
    fn test_exchange_rejects_out_of_order_steps() {
        let mut exchange = Exchange::new(toy_params());
        assert_eq!(
            exchange.derive_secrets(),
            Err(Error::Protocol {
                expected: Phase::PublicExchange,
                found: Phase::Setup,
            })
        );
        assert!(exchange.finish().is_err());

        exchange.generate_keys(U128::ONE, U128::from_u64(2)).unwrap();
        assert_eq!(
            exchange.generate_keys(U128::ONE, U128::from_u64(2)),
            Err(Error::Protocol {
                expected: Phase::Setup,
                found: Phase::KeyGeneration,
            })
        );
        assert_eq!(exchange.phase(), Phase::KeyGeneration);
    }

    #[test]
    fn test_validate_private_scalar() {
        let params = toy_params();
        assert_eq!(validate_private_scalar(&params, U128::ZERO), Err(Error::ScalarOutOfRange));
        assert_eq!(
            validate_private_scalar(&params, U128::from_u64(97)),
            Err(Error::ScalarOutOfRange)
        );
        assert!(validate_private_scalar(&params, U128::ONE).is_ok());
        assert!(validate_private_scalar(&params, U128::from_u64(96)).is_ok());
        assert!(KeyPair::new_checked(&params, U128::from_u64(200)).is_err());
    }

    #[test]
    fn test_validate_public_key() {
        let params = toy_params();
        let good = public_key(&params, U128::from_u64(5));
        assert!(validate_public_key(&params, &good).is_ok());
        assert_eq!(
            validate_public_key(&params, &Point::Infinity),
            Err(Error::InfinityPublicKey)
        );
        assert_eq!(
            validate_public_key(&params, &Point::new(U128::from_u64(3), U128::from_u64(7))),
            Err(Error::PointNotOnCurve)
        );
    }

    #[test]
    fn test_keypair_debug_hides_private_scalar() {
        use alloc::format;
        let keys = KeyPair::new(&toy_params(), U128::from_u64(0x2a));
        let rendered = format!("{:?}", keys);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("0x2a"));
    }
}
