//! # WideInt Core
//!
//! Fixed-width unsigned integers and the elliptic-curve Diffie–Hellman
//! exchange built on them.
//!
//! ## Layers
//!
//! - **Integers**: [`WideUint<L>`] is two limbs of type `L`. [`U128`] uses
//!   `u64` limbs and [`U256`] uses `U128` limbs; the same generic code
//!   serves both. Arithmetic wraps modulo `2^BITS`.
//! - **Modular arithmetic**: [`modular::mod_exp`] (square-and-multiply) and
//!   [`modular::mod_inverse`] (Fermat) over any modulus that fits the type.
//! - **Curve group**: [`Curve`] and [`Point`] for `y² = x³ + ax + b` over
//!   `GF(p)`, with double-and-add [`Curve::scalar_mul`].
//! - **Key exchange**: [`ecdh::public_key`], [`ecdh::shared_secret`] and the
//!   phase-by-phase [`Exchange`] driver.
//!
//! Correctness is the only goal: nothing here is constant-time.
//!
//! ## Example
//!
//! ```rust
//! use wideint_core::{U256, Exchange, params};
//!
//! let curve = params::p192();
//! let alice: U256 = "1863057198451078255086943063078133078831752240818134503".parse().unwrap();
//! let bob: U256 = "5684341886080801483496218260349564865441085341978530127".parse().unwrap();
//!
//! let transcript = Exchange::run(curve, alice, bob).unwrap();
//! assert!(transcript.agreed());
//! ```
//!
//! ## no_std Support
//!
//! The crate needs only `alloc` (for string rendering):
//!
//! ```toml
//! [dependencies]
//! wideint-core = { version = "0.2", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod convert;
mod error;
mod fmt;
mod limb;
mod ops;
mod wide;

pub mod curve;
pub mod ecdh;
pub mod modular;
pub mod params;

pub use curve::{Curve, Point};
pub use ecdh::{CurveParameters, Exchange, KeyPair, Phase, Transcript};
pub use error::{Error, Result};
pub use limb::Limb;
pub use wide::{U128, U256, WideUint};
