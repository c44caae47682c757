use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Circle<D> {
    pub c: R2<D>,
    pub r: D,
}

impl Circle<f64> {
    pub fn new(c: R2<f64>, r: f64) -> Self {
        Circle { c, r }
    }
    /// Closed-disk containment: points on the boundary are inside.
    pub fn contains(&self, p: &R2<f64>) -> bool {
        (*p - self.c).norm2() <= self.r * self.r
    }
    /// Whether the two disks share interior area (tangency doesn't count).
    pub fn overlaps(&self, o: &Circle<f64>) -> bool {
        self.c.distance(&o.c) < self.r + o.r
    }
}

impl<D: Display> Display for Circle<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C({:.3}, {:.3}, {:.3})", self.c.x, self.c.y, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains() {
        let c = Circle::new(R2 { x: 0., y: 0. }, 2.);
        assert!(c.contains(&R2 { x: 0., y: 0. }));
        assert!(c.contains(&R2 { x: 2., y: 0. }));
        assert!(c.contains(&R2 { x: 1., y: 1. }));
        assert!(!c.contains(&R2 { x: 1.5, y: 1.5 }));
    }

    #[test]
    fn overlaps() {
        let c0 = Circle::new(R2 { x: 0., y: 0. }, 2.);
        let c1 = Circle::new(R2 { x: 3., y: 0. }, 2.);
        let c2 = Circle::new(R2 { x: 4., y: 0. }, 2.);
        let c3 = Circle::new(R2 { x: 5., y: 0. }, 2.);
        assert!(c0.overlaps(&c1));
        assert!(c1.overlaps(&c0));
        // tangent
        assert!(!c0.overlaps(&c2));
        assert!(!c0.overlaps(&c3));
    }

    #[test]
    fn display() {
        let c = Circle::new(R2 { x: 400., y: 167.2 }, 130.);
        assert_eq!(format!("{}", c), "C(400.000, 167.200, 130.000)");
    }
}
