use std::{ops::{Sub, Mul, Add, Div, Neg}, fmt::{Display, Formatter, self}};
use approx::{AbsDiffEq, RelativeEq};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct R2<D> {
    pub x: D,
    pub y: D,
}

impl<D: Display> Display for R2<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl R2<f64> {
    /// Point at distance `r` from the origin, at angle `theta` (radians).
    pub fn polar(r: f64, theta: f64) -> Self {
        R2 { x: r * theta.cos(), y: r * theta.sin() }
    }
    pub fn norm2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }
    /// Angle from the positive x-axis, in radians (`atan2`).
    pub fn theta(&self) -> f64 {
        self.y.atan2(self.x)
    }
    pub fn distance(&self, o: &R2<f64>) -> f64 {
        (*o - *self).norm()
    }
    pub fn midpoint(&self, o: &R2<f64>) -> R2<f64> {
        R2 {
            x: (self.x + o.x) / 2.,
            y: (self.y + o.y) / 2.,
        }
    }
}

impl AbsDiffEq for R2<f64> {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for R2<f64> {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl<D: Add<Output = D>> Add for R2<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<D: Sub<Output = D>> Sub for R2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<D: Neg<Output = D>> Neg for R2<D> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        R2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<D: Mul<D, Output = D> + Clone> Mul<D> for R2<D> {
    type Output = Self;
    fn mul(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x * rhs.clone(),
            y: self.y * rhs,
        }
    }
}

impl<D: Div<D, Output = D> + Clone> Div<D> for R2<D> {
    type Output = Self;
    fn div(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x / rhs.clone(),
            y: self.y / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn polar_and_theta() {
        let p = R2::polar(2., PI / 3.);
        assert_relative_eq!(p.norm(), 2., epsilon = 1e-12);
        assert_relative_eq!(p.theta(), PI / 3., epsilon = 1e-12);
        assert_relative_eq!(p, R2 { x: 1., y: 3_f64.sqrt() }, epsilon = 1e-12);
    }

    #[test]
    fn midpoint() {
        let a = R2 { x: 1., y: -2. };
        let b = R2 { x: 5., y: 4. };
        assert_eq!(a.midpoint(&b), R2 { x: 3., y: 1. });
        assert_eq!(a.midpoint(&b), b.midpoint(&a));
    }

    #[test]
    fn distance() {
        let a = R2 { x: 400., y: 300. };
        let b = R2 { x: 403., y: 304. };
        assert_eq!(a.distance(&b), 5.);
        assert_eq!(b - a, R2 { x: 3., y: 4. });
        assert_eq!((b - a) * 2., R2 { x: 6., y: 8. });
        assert_eq!(-(b - a) / 2., R2 { x: -1.5, y: -2. });
    }
}
