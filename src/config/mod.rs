//! Curve configuration
//!
//! A curve is either one of the built-in named curves or a JSON file:
//!
//! ```json
//! {
//!   "name": "toy97",
//!   "p": "97",
//!   "a": "2",
//!   "b": "3",
//!   "gx": "0",
//!   "gy": "10",
//!   "order": "50"
//! }
//! ```
//!
//! Numbers are strings, decimal or `0x`-prefixed hex, so 256-bit values
//! survive JSON untouched.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use wideint_core::{params, Curve, CurveParameters, Point, U256};

/// Curve used when neither a name nor a file is given
pub const DEFAULT_CURVE: &str = "p192";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown curve '{0}' (known: {known})", known = params::CURVE_NAMES.join(", "))]
    UnknownCurve(String),

    #[error("Invalid value for '{field}': {source}")]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: wideint_core::Error,
    },

    #[error("Field prime must be at least 3")]
    InvalidPrime,

    #[error("Generator is not on the curve")]
    GeneratorNotOnCurve,

    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid curve file: {0}")]
    InvalidFormat(#[from] serde_json::Error),
}

/// Curve description as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Display name
    pub name: String,
    /// Field prime
    pub p: String,
    pub a: String,
    pub b: String,
    /// Generator x coordinate
    pub gx: String,
    /// Generator y coordinate
    pub gy: String,
    /// Order of the generator, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl CurveConfig {
    /// Configuration for a built-in curve
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        let params =
            params::by_name(name).ok_or_else(|| ConfigError::UnknownCurve(name.to_string()))?;
        Ok(Self::from_params(name, &params))
    }

    /// Describe existing parameters. Numbers are written as hex.
    pub fn from_params(name: &str, params: &CurveParameters) -> Self {
        let (gx, gy) = match params.generator {
            Point::Finite { x, y } => (x.to_hex_string(), y.to_hex_string()),
            Point::Infinity => ("0x0".to_string(), "0x0".to_string()),
        };
        Self {
            name: name.to_string(),
            p: params.curve.p.to_hex_string(),
            a: params.curve.a.to_hex_string(),
            b: params.curve.b.to_hex_string(),
            gx,
            gy,
            order: params.order.map(|n| n.to_hex_string()),
        }
    }

    /// Load from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Parse the numbers and check the generator lies on the curve.
    pub fn to_params(&self) -> Result<CurveParameters, ConfigError> {
        let p = parse_field("p", &self.p)?;
        if p < 3u64 {
            return Err(ConfigError::InvalidPrime);
        }

        let curve = Curve::new(p, parse_field("a", &self.a)?, parse_field("b", &self.b)?);
        let generator = Point::new(parse_field("gx", &self.gx)?, parse_field("gy", &self.gy)?);
        if !curve.is_on_curve(&generator) {
            return Err(ConfigError::GeneratorNotOnCurve);
        }

        let mut params = CurveParameters::new(curve, generator);
        if let Some(order) = &self.order {
            params = params.with_order(parse_field("order", order)?);
        }
        log::debug!("loaded curve '{}' ({}-bit prime)", self.name, p.bits());
        Ok(params)
    }
}

/// Resolve the curve for a command: a file wins over a name, and the
/// default curve applies when neither is given.
pub fn resolve(
    name: Option<&str>,
    file: Option<&Path>,
) -> Result<(String, CurveParameters), ConfigError> {
    let config = match (file, name) {
        (Some(path), _) => CurveConfig::load_from_file(path)?,
        (None, Some(name)) => CurveConfig::named(name)?,
        (None, None) => CurveConfig::named(DEFAULT_CURVE)?,
    };
    let params = config.to_params()?;
    Ok((config.name, params))
}

fn parse_field(field: &'static str, value: &str) -> Result<U256, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { field, source })
}
