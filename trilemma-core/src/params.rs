//! User-adjustable geometry parameters and the ranges the UI exposes for them.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{deg::Deg, error::LayoutError};

/// Closed interval a slider can move within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Clamp `v` into the range; `None` for NaN or infinite input.
    pub fn clamp(&self, v: f64) -> Option<f64> {
        if v.is_finite() {
            Some(v.clamp(self.min, self.max))
        } else {
            None
        }
    }
}

pub const RADIUS_RANGE: Range = Range { min: 80., max: 180. };
pub const SEPARATION_RANGE: Range = Range { min: 100., max: 350. };
pub const ROTATION_RANGE: Range = Range { min: 0., max: 360. };

/// Factor the UI shows for the void threshold ("gap appears when separation > ⌊r·1.732⌋").
pub const GAP_HINT_FACTOR: f64 = 1.732;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct GeometryParameters {
    pub radius: f64,
    /// Edge length of the equilateral triangle through the three centers.
    pub separation: f64,
    /// Degrees; any real value.
    pub rotation: f64,
}

impl Default for GeometryParameters {
    /// Reference configuration; leaves a visible central void.
    fn default() -> Self {
        GeometryParameters { radius: 130., separation: 230., rotation: 0. }
    }
}

impl GeometryParameters {
    pub fn new(radius: f64, separation: f64, rotation: f64) -> Self {
        GeometryParameters { radius, separation, rotation }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.radius.is_finite() && self.radius > 0.) {
            return Err(LayoutError::InvalidRadius(self.radius));
        }
        if !(self.separation.is_finite() && self.separation > 0.) {
            return Err(LayoutError::InvalidSeparation(self.separation));
        }
        if !self.rotation.is_finite() {
            return Err(LayoutError::InvalidRotation(self.rotation));
        }
        Ok(())
    }

    /// Clamp radius and separation into their UI ranges and wrap rotation into
    /// `[0, 360)`. Non-finite fields fall back to the default.
    pub fn clamped(&self) -> Self {
        let defaults = GeometryParameters::default();
        GeometryParameters {
            radius: RADIUS_RANGE.clamp(self.radius).unwrap_or(defaults.radius),
            separation: SEPARATION_RANGE.clamp(self.separation).unwrap_or(defaults.separation),
            rotation: if self.rotation.is_finite() { self.rotation.wrap_deg() } else { defaults.rotation },
        }
    }

    /// Distance from the centroid to each circle center (circumradius of the triangle).
    pub fn centroid_distance(&self) -> f64 {
        self.separation / 3_f64.sqrt()
    }

    pub fn ratio(&self) -> f64 {
        self.separation / self.radius
    }

    /// Largest separation that still leaves the centroid covered.
    pub fn void_threshold(&self) -> f64 {
        self.radius * 3_f64.sqrt()
    }

    pub fn gap_hint(&self) -> u32 {
        (self.radius * GAP_HINT_FACTOR).floor() as u32
    }

    pub fn display_rotation(&self) -> f64 {
        self.rotation.wrap_deg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = GeometryParameters::default();
        assert_eq!(p, GeometryParameters::new(130., 230., 0.));
        assert!(p.validate().is_ok());
        assert_eq!(p.clamped(), p);
        assert_eq!(p.gap_hint(), 225);
        assert!(p.separation > p.void_threshold());
        assert_eq!(p.centroid_distance(), 230. / 3_f64.sqrt());
    }

    #[test]
    fn validate() {
        assert_eq!(GeometryParameters::new(0., 100., 0.).validate(), Err(LayoutError::InvalidRadius(0.)));
        assert_eq!(GeometryParameters::new(-5., 100., 0.).validate(), Err(LayoutError::InvalidRadius(-5.)));
        assert_eq!(GeometryParameters::new(10., 0., 0.).validate(), Err(LayoutError::InvalidSeparation(0.)));
        assert_eq!(
            GeometryParameters::new(10., f64::INFINITY, 0.).validate(),
            Err(LayoutError::InvalidSeparation(f64::INFINITY)),
        );
        assert!(matches!(
            GeometryParameters::new(f64::NAN, 100., 0.).validate(),
            Err(LayoutError::InvalidRadius(r)) if r.is_nan()
        ));
        assert!(matches!(
            GeometryParameters::new(10., 100., f64::NAN).validate(),
            Err(LayoutError::InvalidRotation(_))
        ));
        // The engine itself is unbounded
        assert!(GeometryParameters::new(1e-6, 1e6, -1234.5).validate().is_ok());
    }

    #[test]
    fn clamped() {
        let p = GeometryParameters::new(10., 1000., 400.).clamped();
        assert_eq!(p, GeometryParameters::new(80., 350., 40.));
        let p = GeometryParameters::new(120., 120., -5.).clamped();
        assert_eq!(p, GeometryParameters::new(120., 120., 355.));
        let p = GeometryParameters::new(f64::NAN, 120., f64::INFINITY).clamped();
        assert_eq!(p, GeometryParameters::new(130., 120., 0.));
    }

    #[test]
    fn ranges() {
        assert_eq!(RADIUS_RANGE.clamp(200.), Some(180.));
        assert_eq!(SEPARATION_RANGE.clamp(99.), Some(100.));
        assert_eq!(ROTATION_RANGE.clamp(f64::NEG_INFINITY), None);
    }

    #[test]
    fn display_rotation() {
        assert_eq!(GeometryParameters::new(100., 100., 450.).display_rotation(), 90.);
        assert_eq!(GeometryParameters::new(100., 100., -30.).display_rotation(), 330.);
    }
}
