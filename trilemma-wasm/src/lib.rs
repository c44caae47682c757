//! WASM bindings for the trade-off triangle.
//!
//! Exposes the layout computation and an interaction [`Shell`] to a browser
//! front end. The browser performs the text-generation fetch itself and hands
//! the result back via `resolveSuccess` / `resolveFailure`.

use log::{info, error};
use serde::Serialize;
use trilemma_core::{
    analysis::Outcome,
    params::{Range, GAP_HINT_FACTOR, RADIUS_RANGE, ROTATION_RANGE, SEPARATION_RANGE},
    GenerateError, GeometryParameters, Shell, R2, CENTROID,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "off", "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsError> {
    let level: Option<String> = serde_wasm_bindgen::from_value(level).unwrap();
    let level = trilemma_core::parse_log_level(level.as_deref())?;
    log::set_max_level(level);
    Ok(())
}

#[derive(Serialize)]
struct Ranges {
    radius: Range,
    separation: Range,
    rotation: Range,
    gap_hint_factor: f64,
}

/// Slider ranges the UI should expose.
#[wasm_bindgen]
pub fn ranges() -> JsValue {
    let ranges = Ranges {
        radius: RADIUS_RANGE,
        separation: SEPARATION_RANGE,
        rotation: ROTATION_RANGE,
        gap_hint_factor: GAP_HINT_FACTOR,
    };
    serde_wasm_bindgen::to_value(&ranges).unwrap()
}

/// Reference parameters (radius 130, separation 230, rotation 0).
#[wasm_bindgen]
pub fn default_params() -> JsValue {
    serde_wasm_bindgen::to_value(&GeometryParameters::default()).unwrap()
}

/// Computes circle placement, pair labels and the intersection state.
///
/// # Arguments
/// * `radius` - Shared circle radius; must be positive.
/// * `separation` - Edge length of the triangle through the centers; must be positive.
/// * `rotation` - Degrees; any finite value.
///
/// # Returns
/// A `Layout` centered on the 800×600 canvas, or an error for invalid input.
#[wasm_bindgen]
pub fn compute_layout(radius: f64, separation: f64, rotation: f64) -> Result<JsValue, JsError> {
    compute_layout_at(radius, separation, rotation, CENTROID.x, CENTROID.y)
}

/// Same as [`compute_layout`], around an arbitrary centroid.
#[wasm_bindgen]
pub fn compute_layout_at(radius: f64, separation: f64, rotation: f64, cx: f64, cy: f64) -> Result<JsValue, JsError> {
    let layout = trilemma_core::compute_layout(radius, separation, rotation, R2 { x: cx, y: cy })?;
    Ok(serde_wasm_bindgen::to_value(&layout).unwrap())
}

/// Prompt the shell would send for `context`.
#[wasm_bindgen]
pub fn build_prompt(context: &str) -> String {
    trilemma_core::prompt::build_prompt(context)
}

#[derive(Serialize)]
struct PendingRequest {
    ticket: u64,
    prompt: String,
}

/// Interaction shell: geometry parameters plus the analysis lifecycle.
#[wasm_bindgen(js_name = Shell)]
pub struct JsShell {
    inner: Shell,
}

#[wasm_bindgen(js_class = Shell)]
impl JsShell {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsShell {
        JsShell { inner: Shell::new() }
    }

    pub fn params(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.params()).unwrap()
    }

    pub fn layout(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.layout()).unwrap()
    }

    /// Each setter clamps to its slider range and returns the fresh layout.
    #[wasm_bindgen(js_name = setRadius)]
    pub fn set_radius(&mut self, radius: f64) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.set_radius(radius)).unwrap()
    }

    #[wasm_bindgen(js_name = setSeparation)]
    pub fn set_separation(&mut self, separation: f64) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.set_separation(separation)).unwrap()
    }

    #[wasm_bindgen(js_name = setRotation)]
    pub fn set_rotation(&mut self, rotation: f64) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.set_rotation(rotation)).unwrap()
    }

    #[wasm_bindgen(js_name = setContext)]
    pub fn set_context(&mut self, context: String) {
        self.inner.set_context(context)
    }

    pub fn context(&self) -> String {
        self.inner.analysis().context().to_string()
    }

    #[wasm_bindgen(js_name = canSubmit)]
    pub fn can_submit(&self) -> bool {
        self.inner.analysis().can_submit()
    }

    /// Enters `LOADING` and returns `{ ticket, prompt }`, or `null` if the
    /// context is blank or a request is already in flight.
    pub fn submit(&mut self) -> JsValue {
        match self.inner.submit() {
            Some(request) => {
                let pending = PendingRequest { ticket: request.ticket, prompt: request.prompt };
                serde_wasm_bindgen::to_value(&pending).unwrap()
            }
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = resolveSuccess)]
    pub fn resolve_success(&mut self, ticket: u64, text: String) -> bool {
        self.inner.resolve(Outcome { ticket, result: Ok(text) })
    }

    /// `reason` is logged only; the visible message is always the generic one.
    #[wasm_bindgen(js_name = resolveFailure)]
    pub fn resolve_failure(&mut self, ticket: u64, reason: String) -> bool {
        let result = Err(GenerateError::Transport(reason.into()));
        self.inner.resolve(Outcome { ticket, result })
    }

    /// Current `AnalysisState` (`{ status: "IDLE" | "LOADING" | "SUCCESS" | "ERROR", ... }`).
    pub fn analysis(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.analysis().state()).unwrap()
    }
}

impl Default for JsShell {
    fn default() -> Self {
        Self::new()
    }
}
