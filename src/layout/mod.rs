//! Interior layout of open chips.
//!
//! Pipeline: hop-distance layering → column placement → wire routing.

pub mod layering;
pub mod placement;
pub mod routing;
pub mod types;

pub use layering::assign_columns;
pub use placement::place_columns;
pub use routing::{PinResolver, PlacedSubcomponent, route, route_wires};
pub use types::{ColumnAssignment, InteriorLayout, SubcomponentSummary, WIRE_START_OFFSET};

use crate::circuit::Connection;
use crate::config::Graphics;
use crate::error::LayoutError;
use crate::pins::{OPEN_PIN_PITCH, Presentation, pin_positions};

/// Lay out one chip interior: positions for every subcomponent, the chip's
/// own boundary pins, and a path for every connection.
pub fn layout_interior(
    subcomponents: &[SubcomponentSummary],
    connections: &[Connection],
    n_inputs: usize,
    n_outputs: usize,
    graphics: &Graphics,
) -> Result<InteriorLayout, LayoutError> {
    let assignment = assign_columns(subcomponents.len(), connections)?;

    let min_height = n_inputs.max(n_outputs) as f64 * OPEN_PIN_PITCH + 2.0 * graphics.row_padding;
    let (positions, size) = place_columns(subcomponents, &assignment, graphics, min_height);

    let input_pins = pin_positions(Presentation::Open, n_inputs, 0.0, 0.0, size.height);
    let output_pins = pin_positions(Presentation::Open, n_outputs, size.width, 0.0, size.height);

    let placed: Vec<PlacedSubcomponent> = subcomponents
        .iter()
        .zip(&positions)
        .map(|(s, p)| PlacedSubcomponent {
            position: *p,
            size: s.size(),
            n_inputs: s.n_inputs,
            n_outputs: s.n_outputs,
            presentation: s.presentation(),
        })
        .collect();
    let resolver = PinResolver {
        subcomponents: &placed,
        input_pins: &input_pins,
        output_pins: &output_pins,
    };
    let wires = route_wires(&resolver, connections);

    Ok(InteriorLayout {
        assignment,
        positions,
        size,
        input_pins,
        output_pins,
        wires,
    })
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout.rs"]
mod tests;
