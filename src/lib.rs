//! WideInt ECDH Toolkit
//!
//! Fixed-width 128/256-bit integers and elliptic-curve Diffie–Hellman on
//! top of them, plus the pieces a command-line front end needs.
//!
//! # Overview
//!
//! The arithmetic lives in `wideint-core` and is re-exported here as
//! [`arith`]. This crate adds:
//!
//! - **Curve configuration**: named curves and JSON curve files ([`config`])
//! - **Key generation**: random private scalars from the OS ([`keygen`])
//!
//! # Example
//!
//! ```rust
//! use wideint::config::CurveConfig;
//! use wideint::keygen::generate_keypair;
//!
//! let params = CurveConfig::named("p192").unwrap().to_params().unwrap();
//! let alice = generate_keypair(&params).unwrap();
//! let bob = generate_keypair(&params).unwrap();
//!
//! let a = alice.diffie_hellman(&params, bob.public_key());
//! let b = bob.diffie_hellman(&params, alice.public_key());
//! assert_eq!(a, b);
//! ```

// Re-export the core arithmetic
pub use wideint_core as arith;

pub mod config;
pub mod keygen;

// Convenience re-exports
pub use arith::{CurveParameters, Exchange, Point, U128, U256};
