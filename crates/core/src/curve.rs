//! Short-Weierstrass curve group `y² = x³ + ax + b` over `GF(p)`
//!
//! Points use affine coordinates; every addition pays for one modular
//! inverse. The point at infinity is its own variant and can never collide
//! with a finite coordinate pair.

use core::fmt;

use crate::error::{Error, Result};
use crate::limb::Limb;
use crate::modular::{add_mod, mod_inverse, mul_mod, sub_mod};
use crate::wide::{U128, WideUint};

/// A curve point. The default limb makes this a point with 256-bit
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Point<L: Limb = U128> {
    /// Group identity
    Infinity,
    Finite { x: WideUint<L>, y: WideUint<L> },
}

impl<L: Limb> Point<L> {
    pub const fn infinity() -> Self {
        Point::Infinity
    }

    /// Finite point. Not checked against any curve; see
    /// [`Curve::validate_point`].
    pub const fn new(x: WideUint<L>, y: WideUint<L>) -> Self {
        Point::Finite { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    pub fn x(&self) -> Option<WideUint<L>> {
        match self {
            Point::Infinity => None,
            Point::Finite { x, .. } => Some(*x),
        }
    }

    pub fn y(&self) -> Option<WideUint<L>> {
        match self {
            Point::Infinity => None,
            Point::Finite { y, .. } => Some(*y),
        }
    }
}

impl<L: Limb> fmt::Display for Point<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "(infinity)"),
            Point::Finite { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

/// Curve coefficients and field prime.
///
/// Only `p` and `a` take part in the group law; `b` is needed solely to
/// decide whether a point lies on the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Curve<L: Limb = U128> {
    pub p: WideUint<L>,
    pub a: WideUint<L>,
    pub b: WideUint<L>,
}

impl<L: Limb> Curve<L> {
    pub const fn new(p: WideUint<L>, a: WideUint<L>, b: WideUint<L>) -> Self {
        Self { p, a, b }
    }

    /// Group addition.
    ///
    /// Distinct x uses the chord slope, equal points the tangent slope.
    /// A vertical chord or a tangent at `y = 0` gives the identity.
    pub fn add(&self, lhs: Point<L>, rhs: Point<L>) -> Point<L> {
        let (x1, y1, x2, y2) = match (lhs, rhs) {
            (Point::Infinity, _) => return rhs,
            (_, Point::Infinity) => return lhs,
            (Point::Finite { x: x1, y: y1 }, Point::Finite { x: x2, y: y2 }) => {
                (x1 % self.p, y1 % self.p, x2 % self.p, y2 % self.p)
            }
        };
        let p = self.p;

        let lambda = if x1 == x2 {
            if y1 != y2 || y1.is_zero() {
                return Point::Infinity;
            }
            // (3x² + a) / 2y
            let x_sq = mul_mod(x1, x1, p);
            let numerator = add_mod(mul_mod(WideUint::from_u64(3), x_sq, p), self.a, p);
            let denominator = add_mod(y1, y1, p);
            mul_mod(numerator, mod_inverse(denominator, p), p)
        } else {
            // (y2 - y1) / (x2 - x1)
            let numerator = sub_mod(y2, y1, p);
            let denominator = sub_mod(x2, x1, p);
            mul_mod(numerator, mod_inverse(denominator, p), p)
        };

        let x3 = sub_mod(sub_mod(mul_mod(lambda, lambda, p), x1, p), x2, p);
        let y3 = sub_mod(mul_mod(lambda, sub_mod(x1, x3, p), p), y1, p);
        Point::Finite { x: x3, y: y3 }
    }

    #[inline]
    pub fn double(&self, point: Point<L>) -> Point<L> {
        self.add(point, point)
    }

    /// Additive inverse `(x, -y)`.
    pub fn neg(&self, point: Point<L>) -> Point<L> {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Finite { x, y } => Point::Finite {
                x: x % self.p,
                y: sub_mod(WideUint::ZERO, y, self.p),
            },
        }
    }

    /// `k·P` by double-and-add.
    ///
    /// The scalar is consumed one bit per step from the least significant
    /// end: a set bit adds the running multiple into the accumulator, then
    /// the running multiple is doubled. The accumulator starts at the
    /// identity, so `k = 0` yields infinity.
    pub fn scalar_mul(&self, point: Point<L>, k: WideUint<L>) -> Point<L> {
        let mut acc = Point::Infinity;
        let mut running = point;
        let steps = k.bits();

        for i in 0..steps {
            if k.bit(i) {
                acc = self.add(acc, running);
            }
            if i + 1 < steps {
                running = self.double(running);
            }
        }
        acc
    }

    /// Whether `point` satisfies the curve equation with reduced
    /// coordinates. Infinity is on every curve.
    pub fn is_on_curve(&self, point: &Point<L>) -> bool {
        match *point {
            Point::Infinity => true,
            Point::Finite { x, y } => {
                if x >= self.p || y >= self.p {
                    return false;
                }
                let p = self.p;
                let lhs = mul_mod(y, y, p);
                let x_cubed = mul_mod(mul_mod(x, x, p), x, p);
                let rhs = add_mod(add_mod(x_cubed, mul_mod(self.a, x, p), p), self.b, p);
                lhs == rhs
            }
        }
    }

    pub fn validate_point(&self, point: &Point<L>) -> Result<()> {
        if self.is_on_curve(point) {
            Ok(())
        } else {
            Err(Error::PointNotOnCurve)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// y² = x³ + 2x + 3 over GF(97)
    fn toy_curve() -> Curve<u64> {
        Curve::new(U128::from_u64(97), U128::from_u64(2), U128::from_u64(3))
    }

    fn pt(x: u64, y: u64) -> Point<u64> {
        Point::new(U128::from_u64(x), U128::from_u64(y))
    }

    /// Every finite point of the toy curve, by brute force.
    fn toy_points() -> alloc::vec::Vec<Point<u64>> {
        let curve = toy_curve();
        let mut points = alloc::vec::Vec::new();
        for x in 0..97u64 {
            for y in 0..97u64 {
                let candidate = pt(x, y);
                if curve.is_on_curve(&candidate) {
                    points.push(candidate);
                }
            }
        }
        points
    }

    #[test]
    fn test_identity_rules() {
        let curve = toy_curve();
        let p = pt(3, 6);
        assert!(curve.is_on_curve(&p));
        assert_eq!(curve.add(Point::infinity(), p), p);
        assert_eq!(curve.add(p, Point::infinity()), p);
        assert_eq!(curve.add(Point::infinity(), Point::infinity()), Point::Infinity);
    }

    #[test]
    fn test_known_sums() {
        let curve = toy_curve();
        // Worked by hand over GF(97): 2·(3, 6) = (80, 10), (3, 6) + (80, 10) = (80, 87)
        assert_eq!(curve.double(pt(3, 6)), pt(80, 10));
        assert_eq!(curve.add(pt(3, 6), pt(80, 10)), pt(80, 87));
    }

    #[test]
    fn test_vertical_line_gives_infinity() {
        let curve = toy_curve();
        let p = pt(3, 6);
        let minus_p = curve.neg(p);
        assert_eq!(minus_p, pt(3, 91));
        assert_eq!(curve.add(p, minus_p), Point::Infinity);
    }

    #[test]
    fn test_tangent_at_zero_y_gives_infinity() {
        // y² = x³ + 1 over GF(97) has (96, 0) = (-1, 0), a point of order 2.
        let curve = Curve::new(U128::from_u64(97), U128::ZERO, U128::ONE);
        let p = pt(96, 0);
        assert!(curve.is_on_curve(&p));
        assert_eq!(curve.double(p), Point::Infinity);
        assert_eq!(curve.scalar_mul(p, U128::from_u64(2)), Point::Infinity);
        assert_eq!(curve.scalar_mul(p, U128::from_u64(3)), p);
    }

    #[test]
    fn test_group_laws_on_toy_curve() {
        let curve = toy_curve();
        let points = toy_points();
        assert!(!points.is_empty());

        for (i, &p) in points.iter().enumerate().step_by(7) {
            for &q in points.iter().skip(i).step_by(11) {
                let sum = curve.add(p, q);
                assert!(curve.is_on_curve(&sum));
                assert_eq!(sum, curve.add(q, p));
                assert_eq!(curve.add(sum, curve.neg(q)), p);
            }
        }
    }

    #[test]
    fn test_scalar_mul_matches_repeated_addition() {
        let curve = toy_curve();
        let g = pt(3, 6);
        let mut expected = Point::Infinity;
        for k in 0..40u64 {
            assert_eq!(curve.scalar_mul(g, U128::from_u64(k)), expected, "k = {}", k);
            expected = curve.add(expected, g);
        }
    }

    #[test]
    fn test_scalar_mul_by_group_order() {
        let curve = toy_curve();
        // Finite points plus infinity; 100 for this curve.
        let order = toy_points().len() as u64 + 1;
        for &p in toy_points().iter().step_by(9) {
            assert_eq!(curve.scalar_mul(p, U128::from_u64(order)), Point::Infinity);
        }
    }

    #[test]
    fn test_validation() {
        let curve = toy_curve();
        assert!(curve.validate_point(&pt(3, 6)).is_ok());
        assert_eq!(curve.validate_point(&pt(3, 7)), Err(Error::PointNotOnCurve));
        // Unreduced coordinates are rejected even if congruent.
        assert_eq!(curve.validate_point(&pt(100, 6)), Err(Error::PointNotOnCurve));
        assert!(curve.validate_point(&Point::infinity()).is_ok());
    }

    #[test]
    fn test_display() {
        use alloc::string::ToString;
        assert_eq!(pt(3, 6).to_string(), "(3, 6)");
        assert_eq!(Point::<u64>::Infinity.to_string(), "(infinity)");
    }
}
