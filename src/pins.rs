//! Pin placement along component edges and the viewport loopback pin glyph.

use crate::geometry::{Point, path_data};
use crate::scene::Element;

pub const CLOSED_PIN_RADIUS: f64 = 5.0;
pub const OPEN_PIN_RADIUS: f64 = 6.0;
pub const VIEWBOX_PIN_RADIUS: f64 = 9.0;

pub const PIN_PADDING: f64 = 1.0;
pub const VIEWBOX_PIN_RECT_PADDING: f64 = 3.0;
/// Height of the loopback glyph below its viewport pin.
pub const LOOPBACK_PADDING: f64 = VIEWBOX_PIN_RADIUS + VIEWBOX_PIN_RECT_PADDING + 10.0;

/// Vertical room one closed pin needs.
pub const CLOSED_PIN_PITCH: f64 = CLOSED_PIN_RADIUS * 2.0 + PIN_PADDING * 2.0;
/// Vertical room one open (boundary) pin needs.
pub const OPEN_PIN_PITCH: f64 = OPEN_PIN_RADIUS * 2.0 + PIN_PADDING * 2.0;

/// Which edge a pin row sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinSide {
    Input,
    Output,
}

impl PinSide {
    pub fn as_str(self) -> &'static str {
        match self {
            PinSide::Input => "input",
            PinSide::Output => "output",
        }
    }
}

/// Whether the owning component is drawn collapsed or expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Presentation {
    Closed,
    Open,
}

impl Presentation {
    pub fn as_str(self) -> &'static str {
        match self {
            Presentation::Closed => "closed",
            Presentation::Open => "open",
        }
    }
}

pub fn pin_id_attr(idx: usize, side: PinSide) -> String {
    format!("{}-{idx}", side.as_str())
}

/// Pin y on a collapsed component: evenly spread between the top and bottom
/// pin centres, a single pin centred.
pub fn closed_pin_y(pin: usize, total: usize, y0: f64, y1: f64) -> f64 {
    let y0 = y0 + PIN_PADDING + CLOSED_PIN_RADIUS;
    let y1 = y1 - PIN_PADDING - CLOSED_PIN_RADIUS;
    let t = if total > 1 {
        pin as f64 / (total - 1) as f64
    } else {
        0.5
    };
    y0 + t * (y1 - y0)
}

/// Pin y on an expanded component: `total` pins split the edge into
/// `total + 1` equal gaps.
pub fn open_pin_y(pin: usize, total: usize, y0: f64, y1: f64) -> f64 {
    y0 + ((pin + 1) as f64 / (total + 1) as f64) * (y1 - y0)
}

pub fn pin_y(presentation: Presentation, pin: usize, total: usize, y0: f64, y1: f64) -> f64 {
    match presentation {
        Presentation::Closed => closed_pin_y(pin, total, y0, y1),
        Presentation::Open => open_pin_y(pin, total, y0, y1),
    }
}

/// Positions of every pin on one edge at `x`, spanning `[y0, y1]`.
pub fn pin_positions(
    presentation: Presentation,
    total: usize,
    x: f64,
    y0: f64,
    y1: f64,
) -> Vec<Point> {
    (0..total)
        .map(|i| Point::new(x, pin_y(presentation, i, total, y0, y1)))
        .collect()
}

/// Build an `input-pins` / `output-pins` group of pin circles.
pub fn render_pins(
    side: PinSide,
    presentation: Presentation,
    names: &[Option<&str>],
    x: f64,
    y_range: (f64, f64),
) -> Element {
    let radius = match presentation {
        Presentation::Open => OPEN_PIN_RADIUS,
        Presentation::Closed => CLOSED_PIN_RADIUS,
    };
    let positions = pin_positions(presentation, names.len(), x, y_range.0, y_range.1);
    let mut group = Element::group().class(&format!("{}-pins", side.as_str()));
    for (idx, (p, name)) in positions.iter().zip(names).enumerate() {
        let mut pin = Element::new("circle")
            .id(pin_id_attr(idx, side))
            .class("pin")
            .attr("r", radius)
            .attr("cx", crate::geometry::fmt_num(p.x))
            .attr("cy", crate::geometry::fmt_num(p.y));
        if let Some(name) = name {
            pin = pin.child(Element::new("title").text(*name));
        }
        group.children.push(pin);
    }
    group
}

/// Move an existing pin row to new positions (used when an interior layout
/// is fixed after the pins were created).
pub fn reposition_pins(group: &mut Element, positions: &[Point]) {
    for (pin, p) in group.children.iter_mut().zip(positions) {
        pin.set_attr("cx", crate::geometry::fmt_num(p.x));
        pin.set_attr("cy", crate::geometry::fmt_num(p.y));
    }
}

/// Points of the loopback glyph path, relative to the viewport pin centre.
/// Inputs loop out to the right, outputs to the left.
pub fn loopback_glyph_points(side: PinSide) -> Vec<Point> {
    let rect_radius = VIEWBOX_PIN_RADIUS + VIEWBOX_PIN_RECT_PADDING;
    let dir = match side {
        PinSide::Input => 1.0,
        PinSide::Output => -1.0,
    };
    vec![
        Point::new(dir * rect_radius, 0.0),
        Point::new(dir * (rect_radius + LOOPBACK_PADDING), 0.0),
        Point::new(dir * (rect_radius + LOOPBACK_PADDING), LOOPBACK_PADDING),
        Point::new(0.0, LOOPBACK_PADDING),
    ]
}

/// Viewport-edge pin glyph: a framed pin with a short loop of wire below it.
/// The loop ends `LOOPBACK_PADDING` below the pin centre, which is where the
/// loopback wire to the root component starts.
pub fn viewbox_pin(idx: usize, side: PinSide) -> Element {
    let rect_radius = VIEWBOX_PIN_RADIUS + VIEWBOX_PIN_RECT_PADDING;
    Element::group()
        .id(pin_id_attr(idx, side))
        .class("viewbox-pin")
        .child(
            Element::new("rect")
                .class("viewbox-pin-rect")
                .attr("width", rect_radius * 2.0)
                .attr("height", rect_radius * 2.0)
                .attr("x", -rect_radius)
                .attr("y", -rect_radius),
        )
        .child(Element::new("circle").class("pin").attr("r", VIEWBOX_PIN_RADIUS))
        .child(
            Element::new("path")
                .class("wire")
                .attr("d", path_data(&loopback_glyph_points(side))),
        )
}

#[cfg(test)]
#[path = "../tests/rust/test_pins.rs"]
mod tests;
