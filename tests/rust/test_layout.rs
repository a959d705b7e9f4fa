use super::*;
use crate::fixtures::{half_adder_connections, input, output, sub, wire};
use crate::geometry::Point;

fn gate() -> SubcomponentSummary {
    SubcomponentSummary {
        width: 40.0,
        height: 30.0,
        n_inputs: 2,
        n_outputs: 1,
        is_open: false,
    }
}

#[test]
fn test_half_adder_interior() {
    let layout =
        layout_interior(&[gate(); 4], &half_adder_connections(), 2, 2, &Graphics::default())
            .unwrap();
    assert_eq!(layout.assignment.n_columns, 2);
    assert_eq!(layout.positions.len(), 4);
    assert_eq!(layout.wires.len(), 10);
    // 40 + 40 + 40 + 40 + 40
    assert_eq!(layout.size.width, 200.0);
    // Two per column: 20 + 30 + 20 + 30 + 20
    assert_eq!(layout.size.height, 120.0);
}

#[test]
fn test_boundary_pins_on_interior_edges() {
    let layout =
        layout_interior(&[gate(); 4], &half_adder_connections(), 2, 2, &Graphics::default())
            .unwrap();
    assert_eq!(layout.input_pins, vec![Point::new(0.0, 40.0), Point::new(0.0, 80.0)]);
    assert_eq!(
        layout.output_pins,
        vec![Point::new(200.0, 40.0), Point::new(200.0, 80.0)]
    );
}

#[test]
fn test_wire_endpoints_touch_pins() {
    let conns = half_adder_connections();
    let layout = layout_interior(&[gate(); 4], &conns, 2, 2, &Graphics::default()).unwrap();
    // input 0 → AND.0
    assert_eq!(layout.wires[0][0], layout.input_pins[0]);
    assert_eq!(layout.wires[0].last().unwrap().x, layout.positions[0].x);
    // OR → output 0
    assert_eq!(*layout.wires[8].last().unwrap(), layout.output_pins[0]);
    assert_eq!(layout.wires[8][0].x, layout.positions[2].x + 40.0);
}

#[test]
fn test_height_fits_boundary_pins() {
    let conns: Vec<_> = (0..6).map(|i| wire(input(i), output(i))).collect();
    let layout = layout_interior(&[], &conns, 6, 6, &Graphics::default()).unwrap();
    assert!(layout.size.height >= 6.0 * crate::pins::OPEN_PIN_PITCH);
}

#[test]
fn test_layout_error_propagates() {
    let conns = vec![wire(input(0), sub(0, 0)), wire(sub(0, 0), output(0))];
    let err = layout_interior(&[gate(); 2], &conns, 1, 1, &Graphics::default()).unwrap_err();
    assert_eq!(err, LayoutError::UnplacedSubcomponent { index: 1 });
}
