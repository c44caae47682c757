use std::f64::consts::PI;

/// Degree/radian helpers for `f64` angles.
pub trait Deg {
    /// Radians → degrees.
    fn deg(&self) -> Self;
    /// Degrees → radians.
    fn rad(&self) -> Self;
    /// Degrees reduced into `[0, 360)`.
    fn wrap_deg(&self) -> Self;
    fn deg_str(&self) -> String;
}

impl Deg for f64 {
    fn deg(&self) -> f64 {
        self * 180.0 / PI
    }
    fn rad(&self) -> f64 {
        self * (PI / 180.0)
    }
    fn wrap_deg(&self) -> f64 {
        let wrapped = self.rem_euclid(360.);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360. { 0. } else { wrapped }
    }
    fn deg_str(&self) -> String {
        format!("{:.1}°", self)
    }
}
