//! Geometry and analysis state for the speed/quality/cost trade-off triangle.
//!
//! Three equal circles sit on the vertices of an equilateral triangle; whether
//! they share a common central region depends only on the radius and the
//! triangle's edge length. [`layout`] computes the placement, [`shell`] owns the
//! adjustable state plus the request lifecycle for a generated explanation.

#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod analysis;
pub mod circle;
pub mod constraint;
pub mod deg;
pub mod error;
pub mod generate;
pub mod layout;
pub mod params;
pub mod prompt;
pub mod r2;
pub mod shell;

// Re-export key types for external use
pub use analysis::{Analysis, AnalysisState, AnalysisStatus, Outcome, Request};
pub use circle::Circle;
pub use constraint::{Constraint, Pair};
pub use error::{GenerateError, LayoutError};
pub use generate::TextGenerator;
pub use layout::{compute_layout, IntersectionState, Layout, CENTROID};
pub use params::GeometryParameters;
pub use r2::R2;
pub use shell::Shell;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, error::LogLevelError> {
    match level {
        Some("off") => Ok(log::LevelFilter::Off),
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(error::LogLevelError::Invalid(level.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level(None), Ok(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("")), Ok(log::LevelFilter::Info));
        assert_eq!(parse_log_level(Some("trace")), Ok(log::LevelFilter::Trace));
        assert_eq!(
            parse_log_level(Some("loud")),
            Err(error::LogLevelError::Invalid("loud".to_string())),
        );
    }
}
