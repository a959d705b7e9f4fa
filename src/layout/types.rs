//! Layout types: subcomponent summaries in, positions and wire paths out.

use crate::geometry::{Point, Size};
use crate::pins::Presentation;

/// Horizontal distance a wire runs straight out of a pin before bending.
pub const WIRE_START_OFFSET: f64 = 20.0;

/// What the layout engine needs to know about one subcomponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubcomponentSummary {
    pub width: f64,
    pub height: f64,
    pub n_inputs: usize,
    pub n_outputs: usize,
    pub is_open: bool,
}

impl SubcomponentSummary {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn presentation(&self) -> Presentation {
        if self.is_open {
            Presentation::Open
        } else {
            Presentation::Closed
        }
    }
}

/// Column assignment produced by hop-distance layering.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment {
    /// Column of each subcomponent, in declaration order.
    pub columns: Vec<usize>,
    pub n_columns: usize,
    /// Longest hop distance from the boundary inputs (`None` = unreachable).
    pub left_hops: Vec<Option<usize>>,
    /// Longest hop distance from the boundary outputs, walking backwards.
    pub right_hops: Vec<Option<usize>>,
}

/// Fully laid-out interior of one open chip.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorLayout {
    pub assignment: ColumnAssignment,
    /// Top-left corner of each subcomponent.
    pub positions: Vec<Point>,
    pub size: Size,
    /// The chip's own input pins along the left edge.
    pub input_pins: Vec<Point>,
    /// The chip's own output pins along the right edge.
    pub output_pins: Vec<Point>,
    /// One point sequence per connection; empty when both ends are null.
    pub wires: Vec<Vec<Point>>,
}
