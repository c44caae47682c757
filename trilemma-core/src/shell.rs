//! Interaction shell: owns the mutable geometry parameters and the analysis
//! lifecycle, and keeps the derived [`Layout`] in step with the parameters.

use log::{debug, warn};

use crate::{
    analysis::{Analysis, AnalysisState, Outcome, Request},
    error::LayoutError,
    generate::TextGenerator,
    layout::{Layout, CENTROID},
    deg::Deg,
    params::{GeometryParameters, RADIUS_RANGE, SEPARATION_RANGE},
    r2::R2,
};

#[derive(Debug, Clone)]
pub struct Shell {
    params: GeometryParameters,
    centroid: R2<f64>,
    layout: Layout,
    analysis: Analysis,
}

impl Default for Shell {
    fn default() -> Self {
        let params = GeometryParameters::default();
        Shell {
            params,
            centroid: CENTROID,
            layout: Layout::from_valid(params, CENTROID),
            analysis: Analysis::new(),
        }
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `params`, clamped to the UI ranges.
    pub fn with_params(params: GeometryParameters, centroid: R2<f64>) -> Result<Self, LayoutError> {
        let params = params.clamped();
        let layout = Layout::new(params, centroid)?;
        Ok(Shell { params, centroid, layout, analysis: Analysis::new() })
    }

    pub fn params(&self) -> &GeometryParameters {
        &self.params
    }
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn set_radius(&mut self, radius: f64) -> &Layout {
        self.adjust("radius", RADIUS_RANGE.clamp(radius), radius, |p, v| p.radius = v)
    }
    pub fn set_separation(&mut self, separation: f64) -> &Layout {
        self.adjust("separation", SEPARATION_RANGE.clamp(separation), separation, |p, v| p.separation = v)
    }
    /// Rotation is reduced mod 360 rather than clamped.
    pub fn set_rotation(&mut self, rotation: f64) -> &Layout {
        let wrapped = rotation.is_finite().then(|| rotation.wrap_deg());
        self.adjust("rotation", wrapped, rotation, |p, v| p.rotation = v)
    }

    /// Store the normalized value and recompute synchronously. `None` (from
    /// non-finite input) leaves everything unchanged.
    fn adjust(&mut self, name: &str, normalized: Option<f64>, value: f64, set: impl FnOnce(&mut GeometryParameters, f64)) -> &Layout {
        match normalized {
            Some(v) => {
                debug!("{} -> {}", name, v);
                set(&mut self.params, v);
                // Clamped ranges are strictly positive, so the params stay valid
                self.layout = Layout::from_valid(self.params, self.centroid);
            }
            None => warn!("ignoring non-finite {}: {}", name, value),
        }
        &self.layout
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.analysis.set_context(context)
    }

    /// See [`Analysis::submit`].
    pub fn submit(&mut self) -> Option<Request> {
        self.analysis.submit()
    }

    /// See [`Analysis::resolve`].
    pub fn resolve(&mut self, outcome: Outcome) -> bool {
        self.analysis.resolve(outcome)
    }

    /// Submit, await the generator, and resolve in one go.
    ///
    /// Holds `&mut self` across the await; event loops that must keep taking
    /// geometry input should use [`Shell::submit`] / [`Shell::resolve`] instead.
    pub async fn analyze<G: TextGenerator + ?Sized>(&mut self, generator: &G) -> &AnalysisState {
        if let Some(request) = self.submit() {
            let outcome = request.dispatch(generator).await;
            self.resolve(outcome);
        }
        self.analysis.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{tests::Scripted, AnalysisStatus, FAILURE_MESSAGE},
        layout::IntersectionState,
    };
    use test_log::test;

    #[test]
    fn starts_with_reference_layout() {
        let shell = Shell::new();
        assert_eq!(shell.params(), &GeometryParameters::new(130., 230., 0.));
        assert_eq!(shell.layout().state, IntersectionState::CentralVoid);
        assert_eq!(shell.layout().centroid, CENTROID);
        assert_eq!(shell.analysis().status(), AnalysisStatus::Idle);
    }

    #[test]
    fn adjustments_recompute() {
        let mut shell = Shell::new();
        let state = shell.set_separation(150.).state;
        assert_eq!(state, IntersectionState::CommonOverlap);
        assert_eq!(shell.layout().params.separation, 150.);
        assert_eq!(shell.layout(), &Layout::new(*shell.params(), CENTROID).unwrap());

        shell.set_radius(80.);
        assert_eq!(shell.layout().state, IntersectionState::CentralVoid);
        assert!(shell.layout().circles.iter().all(|c| c.circle.r == 80.));

        let before = shell.layout().clone();
        shell.set_rotation(45.);
        assert_eq!(shell.layout().state, before.state);
        assert_eq!(shell.layout().distance, before.distance);
        assert_ne!(shell.layout().circles[0].circle.c, before.circles[0].circle.c);
    }

    #[test]
    fn adjustments_clamp() {
        let mut shell = Shell::new();
        shell.set_radius(1000.);
        shell.set_separation(-3.);
        shell.set_rotation(720.);
        assert_eq!(shell.params(), &GeometryParameters::new(180., 100., 0.));
        assert_eq!(shell.layout().params, *shell.params());
    }

    #[test]
    fn rotation_wraps() {
        let mut shell = Shell::new();
        shell.set_rotation(400.);
        assert_eq!(shell.params().rotation, 40.);
        let at_40 = shell.layout().clone();
        shell.set_rotation(-320.);
        assert_eq!(shell.params().rotation, 40.);
        assert_eq!(shell.layout(), &at_40);
        shell.set_rotation(359.5);
        assert_eq!(shell.params().rotation, 359.5);
    }

    #[test]
    fn non_finite_adjustments_are_ignored() {
        let mut shell = Shell::new();
        let before = shell.layout().clone();
        shell.set_radius(f64::NAN);
        shell.set_separation(f64::INFINITY);
        assert_eq!(shell.layout(), &before);
    }

    #[test]
    fn with_params_clamps() {
        let shell = Shell::with_params(GeometryParameters::new(10., 500., 30.), R2 { x: 0., y: 0. }).unwrap();
        assert_eq!(shell.params(), &GeometryParameters::new(80., 350., 30.));
        assert!(Shell::with_params(GeometryParameters::default(), R2 { x: f64::NAN, y: 0. }).is_err());
    }

    #[test(tokio::test)]
    async fn empty_context_never_calls_service() {
        let generator = Scripted::ok("Hello");
        let mut shell = Shell::new();
        shell.set_context("  ");
        assert_eq!(shell.analyze(&generator).await, &AnalysisState::Idle);
        assert_eq!(generator.calls(), 0);
    }

    #[test(tokio::test)]
    async fn analyze_success_and_failure() {
        let mut shell = Shell::new();
        shell.set_context("Developing a new mobile game");
        let state = shell.analyze(&Scripted::ok("Hello")).await;
        assert_eq!(state, &AnalysisState::Success { text: "Hello".to_string() });

        let state = shell.analyze(&Scripted::failing()).await.clone();
        assert_eq!(state, AnalysisState::Error { message: FAILURE_MESSAGE.to_string() });
        assert_eq!(shell.analysis().result_text(), FAILURE_MESSAGE);
    }

    #[test(tokio::test)]
    async fn geometry_stays_live_while_loading() {
        let generator = Scripted::ok("Hello");
        let mut shell = Shell::new();
        shell.set_context("Cooking a gourmet dinner");
        let request = shell.submit().unwrap();
        assert_eq!(shell.analysis().status(), AnalysisStatus::Loading);

        // Sliders keep working while the request is pending
        shell.set_separation(120.);
        assert_eq!(shell.layout().state, IntersectionState::CommonOverlap);
        assert!(shell.submit().is_none());

        let outcome = request.dispatch(&generator).await;
        assert!(shell.resolve(outcome));
        assert_eq!(shell.analysis().result_text(), "Hello");
        assert_eq!(shell.params().separation, 120.);
    }
}
