use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point in the complex plane, `re + im·i`.
///
/// Immutable `Copy` value: every operation returns a new point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `re² + im²`. Compared against squared thresholds so no square root
    /// is taken per step.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// One escape-time step: `self² + c`.
    #[inline]
    pub fn step(self, c: Self) -> Self {
        self * self + c
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    /// `(a + bi)(c + di) = (ac − bd) + (ad + bc)i`
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{} - {}i", self.re, -self.im)
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn close(a: Complex, re: f64, im: f64) -> bool {
        (a.re - re).abs() < EPSILON && (a.im - im).abs() < EPSILON
    }

    #[test]
    fn zero_is_default() {
        assert_eq!(Complex::default(), Complex::ZERO);
        assert_eq!(Complex::ZERO.norm_sq(), 0.0);
    }

    #[test]
    fn add_and_sub() {
        let a = Complex::new(1.5, -2.0);
        let b = Complex::new(0.5, 4.0);
        assert!(close(a + b, 2.0, 2.0));
        assert!(close(a - b, 1.0, -6.0));
    }

    #[test]
    fn multiplication_follows_complex_rules() {
        // (2 + 3i)(4 − i) = 8 − 2i + 12i − 3i² = 11 + 10i
        let p = Complex::new(2.0, 3.0) * Complex::new(4.0, -1.0);
        assert!(close(p, 11.0, 10.0));
    }

    #[test]
    fn i_squared_is_minus_one() {
        let i = Complex::new(0.0, 1.0);
        assert!(close(i * i, -1.0, 0.0));
    }

    #[test]
    fn norm_sq_skips_the_root() {
        assert!((Complex::new(-3.0, 4.0).norm_sq() - 25.0).abs() < EPSILON);
    }

    #[test]
    fn step_squares_then_adds() {
        let c = Complex::new(2.0, 0.0);
        let z1 = Complex::ZERO.step(c);
        let z2 = z1.step(c);
        assert!(close(z1, 2.0, 0.0));
        assert!(close(z2, 6.0, 0.0));
    }

    #[test]
    fn display_signs() {
        assert_eq!(Complex::new(1.0, 2.0).to_string(), "1 + 2i");
        assert_eq!(Complex::new(1.0, -2.0).to_string(), "1 - 2i");
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&Complex::new(-0.75, 0.1)).unwrap();
        assert_eq!(json, r#"{"re":-0.75,"im":0.1}"#);
    }
}
