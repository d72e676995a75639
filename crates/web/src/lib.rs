use wasm_bindgen::prelude::*;
use wideint_core::ecdh::{self, validate_public_key};
use wideint_core::{CurveParameters, Point, U256, params};

fn curve_by_name(name: &str) -> Result<CurveParameters, JsValue> {
    params::by_name(name).ok_or_else(|| {
        JsValue::from_str(&format!(
            "unknown curve '{}', expected one of: {}",
            name,
            params::CURVE_NAMES.join(", ")
        ))
    })
}

fn parse_scalar(what: &str, s: &str) -> Result<U256, JsValue> {
    s.trim()
        .parse::<U256>()
        .map_err(|e| JsValue::from_str(&format!("invalid {}: {}", what, e)))
}

fn point_json(point: &Point) -> String {
    match point {
        Point::Infinity => r#"{"infinity":true}"#.to_string(),
        Point::Finite { x, y } => format!(
            r#"{{"infinity":false,"x":"{}","y":"{}"}}"#,
            x.to_decimal_string(),
            y.to_decimal_string()
        ),
    }
}

/// Public key for a private scalar on a named curve.
/// Returns JSON: `{"infinity":false,"x":"...","y":"..."}`
#[wasm_bindgen]
pub fn public_key(curve: &str, scalar: &str) -> Result<String, JsValue> {
    let params = curve_by_name(curve)?;
    let scalar = parse_scalar("scalar", scalar)?;
    Ok(point_json(&ecdh::public_key(&params, scalar)))
}

/// Shared secret with a peer's public key. The peer key must be a finite
/// point on the curve.
#[wasm_bindgen]
pub fn shared_secret(
    curve: &str,
    scalar: &str,
    peer_x: &str,
    peer_y: &str,
) -> Result<String, JsValue> {
    let params = curve_by_name(curve)?;
    let scalar = parse_scalar("scalar", scalar)?;
    let peer = Point::new(parse_scalar("peer x", peer_x)?, parse_scalar("peer y", peer_y)?);

    validate_public_key(&params, &peer).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(point_json(&ecdh::shared_secret(&params, scalar, peer)))
}

/// Fresh private scalar in `[1, n - 1]` as a 0x-prefixed hex string.
#[wasm_bindgen]
pub fn random_scalar(curve: &str) -> Result<String, JsValue> {
    let params = curve_by_name(curve)?;
    let bound = params.order.unwrap_or(params.p());
    let bytes = bound.bits().div_ceil(8) as usize;

    // Rejection sampling over the byte length of the bound
    loop {
        let mut buf = [0u8; 32];
        getrandom::fill(&mut buf[32 - bytes..])
            .map_err(|e| JsValue::from_str(&format!("entropy unavailable: {}", e)))?;
        let candidate = U256::from_be_slice(&buf).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if !candidate.is_zero() && candidate < bound {
            return Ok(format!("0x{}", hex::encode(candidate.to_be_bytes())));
        }
    }
}

/// Times scalar multiplications of the generator.
#[wasm_bindgen]
pub struct Benchmark {
    params: CurveParameters,
}

#[wasm_bindgen]
impl Benchmark {
    #[wasm_bindgen(constructor)]
    pub fn new(curve: &str) -> Result<Benchmark, JsValue> {
        Ok(Self {
            params: curve_by_name(curve)?,
        })
    }

    /// Run `count` scalar multiplications. Returns operations per second.
    #[wasm_bindgen]
    pub fn run(&self, count: u32) -> Result<f64, JsValue> {
        let performance = web_sys::window()
            .and_then(|w| w.performance())
            .ok_or_else(|| JsValue::from_str("performance timer unavailable"))?;

        let base = self.params.order.unwrap_or(self.params.p()) >> 1;
        let start = performance.now();
        for i in 0..count {
            let _ = ecdh::public_key(&self.params, base - i);
        }
        let elapsed_s = (performance.now() - start) / 1000.0;

        Ok(count as f64 / elapsed_s)
    }

    /// Curve parameters as JSON string
    #[wasm_bindgen]
    pub fn get_params(&self) -> String {
        let order = match self.params.order {
            Some(n) => format!(r#""{}""#, n.to_decimal_string()),
            None => "null".to_string(),
        };
        format!(
            r#"{{"p":"{}","a":"{}","b":"{}","generator":{},"order":{}}}"#,
            self.params.curve.p.to_decimal_string(),
            self.params.curve.a.to_decimal_string(),
            self.params.curve.b.to_decimal_string(),
            point_json(&self.params.generator),
            order
        )
    }
}
