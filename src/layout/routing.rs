//! Orthogonal wire routing between resolved pin coordinates.

use super::types::WIRE_START_OFFSET;
use crate::circuit::{BoundaryPin, Connection, PinRef, PinTarget};
use crate::geometry::{Point, Size};
use crate::pins::{Presentation, pin_y};

/// A subcomponent with its final position, as seen by the router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSubcomponent {
    pub position: Point,
    pub size: Size,
    pub n_inputs: usize,
    pub n_outputs: usize,
    pub presentation: Presentation,
}

impl PlacedSubcomponent {
    /// Output pins sit on the right edge.
    pub fn output_pin(&self, pin: usize) -> Point {
        Point::new(
            self.position.x + self.size.width,
            pin_y(
                self.presentation,
                pin,
                self.n_outputs,
                self.position.y,
                self.position.y + self.size.height,
            ),
        )
    }

    /// Input pins sit on the left edge.
    pub fn input_pin(&self, pin: usize) -> Point {
        Point::new(
            self.position.x,
            pin_y(
                self.presentation,
                pin,
                self.n_inputs,
                self.position.y,
                self.position.y + self.size.height,
            ),
        )
    }
}

/// Pin coordinates a chip interior's wires attach to.
pub struct PinResolver<'a> {
    pub subcomponents: &'a [PlacedSubcomponent],
    pub input_pins: &'a [Point],
    pub output_pins: &'a [Point],
}

impl PinResolver<'_> {
    /// Coordinate of a source end (an output of whatever it names).
    pub fn source(&self, end: &PinRef) -> Option<Point> {
        let pin = end.pin?;
        match end.component? {
            PinTarget::Boundary(BoundaryPin::Input) => self.input_pins.get(pin).copied(),
            PinTarget::Boundary(BoundaryPin::Output) => self.output_pins.get(pin).copied(),
            PinTarget::Subcomponent(i) => self.subcomponents.get(i).map(|s| s.output_pin(pin)),
        }
    }

    /// Coordinate of a destination end (an input of whatever it names).
    pub fn destination(&self, end: &PinRef) -> Option<Point> {
        let pin = end.pin?;
        match end.component? {
            PinTarget::Boundary(BoundaryPin::Input) => self.input_pins.get(pin).copied(),
            PinTarget::Boundary(BoundaryPin::Output) => self.output_pins.get(pin).copied(),
            PinTarget::Subcomponent(i) => self.subcomponents.get(i).map(|s| s.input_pin(pin)),
        }
    }
}

/// Route one wire between two resolved ends.
///
/// Both ends present: straight when level, otherwise a staircase through the
/// midpoint x, or an S-shaped detour through the midpoint y when the
/// destination lies left of the source (feedback wires). One end missing: a
/// short stub out of the end that exists.
pub fn route(source: Option<Point>, destination: Option<Point>) -> Vec<Point> {
    match (source, destination) {
        (Some(s), Some(d)) => {
            if (s.y - d.y).abs() < f64::EPSILON {
                return vec![s, d];
            }
            let start = s.offset(WIRE_START_OFFSET, 0.0);
            let end = d.offset(-WIRE_START_OFFSET, 0.0);
            let mut path = vec![s, start];
            if end.x - start.x < 0.0 {
                let split_y = (start.y + end.y) / 2.0;
                path.push(Point::new(start.x, split_y));
                path.push(Point::new(end.x, split_y));
            } else {
                let split_x = (start.x + end.x) / 2.0;
                path.push(Point::new(split_x, start.y));
                path.push(Point::new(split_x, end.y));
            }
            path.push(end);
            path.push(d);
            path
        }
        (Some(s), None) => vec![s, s.offset(WIRE_START_OFFSET, 0.0)],
        (None, Some(d)) => vec![d.offset(-WIRE_START_OFFSET, 0.0), d],
        (None, None) => Vec::new(),
    }
}

/// Route every connection of one chip interior.
pub fn route_wires(resolver: &PinResolver<'_>, connections: &[Connection]) -> Vec<Vec<Point>> {
    connections
        .iter()
        .map(|c| route(resolver.source(&c.source), resolver.destination(&c.destination)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_routing.rs"]
mod tests;
