//! The three competing constraints and the trade-off named by each pair.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum Constraint {
    Speed,
    Quality,
    Cost,
}

impl Constraint {
    /// Fixed vertex order: top, lower-right, lower-left.
    pub const ALL: [Constraint; 3] = [Constraint::Speed, Constraint::Quality, Constraint::Cost];

    pub fn idx(&self) -> usize {
        match self {
            Constraint::Speed => 0,
            Constraint::Quality => 1,
            Constraint::Cost => 2,
        }
    }
    pub fn id(&self) -> &'static str {
        match self {
            Constraint::Speed => "fast",
            Constraint::Quality => "accurate",
            Constraint::Cost => "cheap",
        }
    }
    /// Unrotated vertex angle in degrees, measured clockwise on a y-down canvas.
    pub fn base_angle(&self) -> f64 {
        match self {
            Constraint::Speed => -90.,
            Constraint::Quality => 30.,
            Constraint::Cost => 150.,
        }
    }
    /// Single-glyph label drawn at the circle's center.
    pub fn glyph(&self) -> &'static str {
        match self {
            Constraint::Speed => "快",
            Constraint::Quality => "准",
            Constraint::Cost => "省",
        }
    }
    pub fn description(&self) -> &'static str {
        match self {
            Constraint::Speed => "Fast (Speed)",
            Constraint::Quality => "Accurate (Quality)",
            Constraint::Cost => "Cheap (Cost)",
        }
    }
    /// First word of the description, drawn under the glyph.
    pub fn caption(&self) -> &'static str {
        let description = self.description();
        description.split(' ').next().unwrap_or(description)
    }
    pub fn color(&self) -> &'static str {
        match self {
            Constraint::Speed => "rgba(6, 182, 212, 0.6)",
            Constraint::Quality => "rgba(236, 72, 153, 0.6)",
            Constraint::Cost => "rgba(234, 179, 8, 0.6)",
        }
    }
    /// Longer blurb for the info panel.
    pub fn summary(&self) -> &'static str {
        match self {
            Constraint::Speed => "Time to market, delivery speed, responsiveness. Focusing here often requires sacrificing deep testing or low cost.",
            Constraint::Quality => "Quality, scope, precision, reliability. High quality usually takes time or costs significant money.",
            Constraint::Cost => "Budget, resource efficiency, low cost. Saving money often means cutting corners on quality or speed.",
        }
    }
}

/// An unordered pair of constraints; labelled by what you give up to get it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum Pair {
    SpeedQuality,
    QualityCost,
    SpeedCost,
}

impl Pair {
    pub const ALL: [Pair; 3] = [Pair::SpeedQuality, Pair::QualityCost, Pair::SpeedCost];

    pub fn idx(&self) -> usize {
        match self {
            Pair::SpeedQuality => 0,
            Pair::QualityCost => 1,
            Pair::SpeedCost => 2,
        }
    }

    pub fn members(&self) -> (Constraint, Constraint) {
        match self {
            Pair::SpeedQuality => (Constraint::Speed, Constraint::Quality),
            Pair::QualityCost => (Constraint::Quality, Constraint::Cost),
            Pair::SpeedCost => (Constraint::Speed, Constraint::Cost),
        }
    }
    /// The constraint left out of this pair.
    pub fn sacrificed(&self) -> Constraint {
        match self {
            Pair::SpeedQuality => Constraint::Cost,
            Pair::QualityCost => Constraint::Speed,
            Pair::SpeedCost => Constraint::Quality,
        }
    }
    pub fn text(&self) -> &'static str {
        match self.sacrificed() {
            Constraint::Cost => "Expensive",
            Constraint::Speed => "Slow",
            Constraint::Quality => "Low Quality",
        }
    }
    pub fn description(&self) -> String {
        let (a, b) = self.members();
        format!("{} + {}", a.caption(), b.caption())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captions() {
        assert_eq!(Constraint::Speed.caption(), "Fast");
        assert_eq!(Constraint::Quality.caption(), "Accurate");
        assert_eq!(Constraint::Cost.caption(), "Cheap");
    }

    #[test]
    fn vertex_order() {
        for (idx, constraint) in Constraint::ALL.iter().enumerate() {
            assert_eq!(constraint.idx(), idx);
        }
        let angles: Vec<f64> = Constraint::ALL.iter().map(|c| c.base_angle()).collect();
        assert_eq!(angles, vec![-90., 30., 150.]);
    }

    #[test]
    fn pairs() {
        let texts: Vec<(&str, String)> = Pair::ALL.iter().map(|p| (p.text(), p.description())).collect();
        assert_eq!(
            texts,
            vec![
                ("Expensive", "Fast + Accurate".to_string()),
                ("Slow", "Accurate + Cheap".to_string()),
                ("Low Quality", "Fast + Cheap".to_string()),
            ]
        );
        for pair in Pair::ALL {
            let (a, b) = pair.members();
            let third = pair.sacrificed();
            assert_ne!(a, b);
            assert_ne!(a, third);
            assert_ne!(b, third);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Constraint::Quality.to_string(), "Quality");
    }
}
