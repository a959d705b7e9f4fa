//! microchip-circuit: layout and SVG rendering for hierarchical digital
//! circuits (gates composed into chips, chips nested inside chips).
//!
//! Public API: `render_circuit()` for one-shot rendering, `CircuitView` for
//! interactive use (expand/collapse, pan/zoom).
//!
//! Pipeline:
//!   CircuitState → validate → definitions (ascending id) → root instance
//!   (open chips laid out by hop-distance layering) → view → SVG

pub mod circuit;
pub mod config;
pub mod definition;
pub mod error;
pub mod geometry;
pub mod instance;
pub mod layout;
pub mod openness;
pub mod pins;
pub mod renderers;
pub mod scene;
pub mod view;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
#[path = "../tests/rust/fixtures.rs"]
pub(crate) mod fixtures;

pub use circuit::{CircuitState, Component, ComponentId, Connection, PinRef};
pub use config::{DisplaySettings, RenderConfig, RenderContext};
pub use error::{CircuitError, LayoutError, Result, StorageError};
pub use openness::{
    JsonFileStorage, MemoryStorage, OPEN_SUBCOMPONENT_IDS_KEY, OpennessStorage, OpennessStore,
};
pub use view::CircuitView;

/// Parse a `CircuitState` JSON document. `null` means "no circuit".
pub fn parse_state(src: &str) -> Result<Option<CircuitState>> {
    Ok(serde_json::from_str(src)?)
}

/// Render a circuit (or the empty placeholder for `None`) to an SVG string
/// with the given chip occurrences expanded.
pub fn render_circuit(
    state: Option<&CircuitState>,
    config: &RenderConfig,
    open_ids: &[String],
) -> Result<String> {
    let storage = MemoryStorage::with_ids(OPEN_SUBCOMPONENT_IDS_KEY, open_ids);
    let view = CircuitView::mount(
        state.cloned(),
        Box::new(storage),
        OPEN_SUBCOMPONENT_IDS_KEY,
        RenderContext::new(config.clone()),
    )?;
    view.render_svg()
}
