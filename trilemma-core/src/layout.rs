//! Places the three constraint circles on an equilateral triangle and classifies
//! whether they share a common central region.
//!
//! Given a separation `s` (the triangle's edge length), each center sits at the
//! circumradius `d = s / √3` from the centroid, at base angles `-90°`, `30°`,
//! `150°` offset by the rotation. The three circles have a common overlap iff
//! the centroid is covered, i.e. `d ≤ r`.

use derive_more::Display;
use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    circle::Circle,
    constraint::{Constraint, Pair},
    deg::Deg,
    error::LayoutError,
    params::GeometryParameters,
    r2::R2,
};

/// Logical canvas the layout is drawn on.
pub const CANVAS_WIDTH: f64 = 800.;
pub const CANVAS_HEIGHT: f64 = 600.;
pub const CENTROID: R2<f64> = R2 { x: CANVAS_WIDTH / 2., y: CANVAS_HEIGHT / 2. };

/// Relative tolerance on `d ≤ r`; `(r·√3)/√3` can land a couple of ULPs above `r`.
const BOUNDARY_SLACK: f64 = 4. * f64::EPSILON;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub enum IntersectionState {
    #[display(fmt = "Utopia")]
    CommonOverlap,
    #[display(fmt = "IMPOSSIBLE")]
    CentralVoid,
}

impl IntersectionState {
    /// `d` is the centroid-to-center distance. Boundary (`d == radius`) counts as
    /// overlap, including a few ULPs of rounding from `separation / √3`.
    pub fn classify(d: f64, radius: f64) -> Self {
        if d <= radius * (1. + BOUNDARY_SLACK) {
            IntersectionState::CommonOverlap
        } else {
            IntersectionState::CentralVoid
        }
    }
    pub fn is_common_overlap(&self) -> bool {
        matches!(self, IntersectionState::CommonOverlap)
    }
    /// Status badge shown next to the controls.
    pub fn badge(&self) -> &'static str {
        match self {
            IntersectionState::CommonOverlap => "STATUS: UTOPIA (Center Overlap)",
            IntersectionState::CentralVoid => "STATUS: IMPOSSIBLE (Center Void)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct ConstraintCircle {
    pub constraint: Constraint,
    pub circle: Circle<f64>,
    pub label: String,
    pub description: String,
    /// Info-panel blurb
    pub summary: String,
    pub color: String,
}

impl ConstraintCircle {
    fn new(constraint: Constraint, c: R2<f64>, r: f64) -> Self {
        ConstraintCircle {
            constraint,
            circle: Circle::new(c, r),
            label: constraint.glyph().to_string(),
            description: constraint.description().to_string(),
            summary: constraint.summary().to_string(),
            color: constraint.color().to_string(),
        }
    }
    pub fn center(&self) -> R2<f64> {
        self.circle.c
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct PairwiseLabel {
    pub pair: Pair,
    pub text: String,
    pub description: String,
    pub position: R2<f64>,
    /// Informational only; never feeds into [`IntersectionState`].
    pub overlaps: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Layout {
    pub params: GeometryParameters,
    pub centroid: R2<f64>,
    /// Centroid-to-center distance, `separation / √3`.
    pub distance: f64,
    pub circles: [ConstraintCircle; 3],
    pub labels: [PairwiseLabel; 3],
    pub state: IntersectionState,
}

/// Compute the layout for the given parameters around `centroid`.
pub fn compute_layout(radius: f64, separation: f64, rotation: f64, centroid: R2<f64>) -> Result<Layout, LayoutError> {
    Layout::new(GeometryParameters::new(radius, separation, rotation), centroid)
}

impl Layout {
    pub fn new(params: GeometryParameters, centroid: R2<f64>) -> Result<Layout, LayoutError> {
        params.validate()?;
        if !(centroid.x.is_finite() && centroid.y.is_finite()) {
            return Err(LayoutError::InvalidCentroid(centroid.x, centroid.y));
        }
        Ok(Layout::from_valid(params, centroid))
    }

    /// Callers guarantee `params.validate()` passes.
    pub(crate) fn from_valid(params: GeometryParameters, centroid: R2<f64>) -> Layout {
        let GeometryParameters { radius, separation, rotation } = params;
        let distance = params.centroid_distance();
        let circles = Constraint::ALL.map(|constraint| {
            let theta = (constraint.base_angle() + rotation).rad();
            ConstraintCircle::new(constraint, centroid + R2::polar(distance, theta), radius)
        });
        let labels = Pair::ALL.map(|pair| {
            let (a, b) = pair.members();
            let (a, b) = (&circles[a.idx()].circle, &circles[b.idx()].circle);
            PairwiseLabel {
                pair,
                text: pair.text().to_string(),
                description: pair.description(),
                position: a.c.midpoint(&b.c),
                overlaps: a.overlaps(b),
            }
        });
        let state = IntersectionState::classify(distance, radius);
        debug!(
            "layout r={} s={} t={}: d={:.3}, {:?}",
            radius, separation, rotation, distance, state,
        );
        Layout { params, centroid, distance, circles, labels, state }
    }

    pub fn circle(&self, constraint: Constraint) -> &ConstraintCircle {
        &self.circles[constraint.idx()]
    }

    pub fn label(&self, pair: Pair) -> &PairwiseLabel {
        &self.labels[pair.idx()]
    }

    /// Whether the centroid lies inside all three circles. Agrees with
    /// [`IntersectionState`] except within float rounding of the boundary.
    pub fn covers_centroid(&self) -> bool {
        self.circles.iter().all(|c| c.circle.contains(&self.centroid))
    }

    /// `d - r`: positive means the centroid is that far outside every circle.
    pub fn gap(&self) -> f64 {
        self.distance - self.params.radius
    }

    /// Angle of each center around the centroid, in degrees.
    pub fn center_angles(&self) -> [f64; 3] {
        self.circles.clone().map(|c| (c.center() - self.centroid).theta().deg())
    }
}
