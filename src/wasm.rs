//! WASM bindings for microchip-circuit.
//!
//! Exposes `render` and `renderWithOptions` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{RenderConfig, parse_state, render_circuit};

/// Render a CircuitState JSON document to SVG with default settings.
#[wasm_bindgen]
pub fn render(state_json: &str) -> Result<String, JsError> {
    let state = parse_state(state_json).map_err(|e| JsError::new(&e.to_string()))?;
    render_circuit(state.as_ref(), &RenderConfig::default(), &[])
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Render with full control over options.
///
/// - `width`, `height`: viewport size in pixels
/// - `open_ids`: path-ids of the nested chips to show expanded
#[wasm_bindgen(js_name = "renderWithOptions")]
pub fn render_with_options(
    state_json: &str,
    width: f64,
    height: f64,
    open_ids: Vec<String>,
) -> Result<String, JsError> {
    let state = parse_state(state_json).map_err(|e| JsError::new(&e.to_string()))?;
    let config = RenderConfig::new().with_size(width, height);
    render_circuit(state.as_ref(), &config, &open_ids).map_err(|e| JsError::new(&e.to_string()))
}
