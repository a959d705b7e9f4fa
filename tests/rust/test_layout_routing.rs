use super::*;
use crate::fixtures::{input, output, sub, wire};

fn placed(x: f64, y: f64, presentation: Presentation) -> PlacedSubcomponent {
    PlacedSubcomponent {
        position: Point::new(x, y),
        size: Size::new(40.0, 30.0),
        n_inputs: 2,
        n_outputs: 1,
        presentation,
    }
}

// ── Single routes ────────────────────────────────────────────────────────

#[test]
fn test_level_pins_route_straight() {
    let path = route(Some(Point::new(0.0, 10.0)), Some(Point::new(90.0, 10.0)));
    assert_eq!(path, vec![Point::new(0.0, 10.0), Point::new(90.0, 10.0)]);
}

#[test]
fn test_staircase_through_midpoint_x() {
    let path = route(Some(Point::new(0.0, 10.0)), Some(Point::new(100.0, 50.0)));
    assert_eq!(
        path,
        vec![
            Point::new(0.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(50.0, 10.0),
            Point::new(50.0, 50.0),
            Point::new(80.0, 50.0),
            Point::new(100.0, 50.0),
        ]
    );
}

#[test]
fn test_feedback_wire_detours_through_midpoint_y() {
    let path = route(Some(Point::new(100.0, 10.0)), Some(Point::new(0.0, 50.0)));
    assert_eq!(
        path,
        vec![
            Point::new(100.0, 10.0),
            Point::new(120.0, 10.0),
            Point::new(120.0, 30.0),
            Point::new(-20.0, 30.0),
            Point::new(-20.0, 50.0),
            Point::new(0.0, 50.0),
        ]
    );
}

#[test]
fn test_routes_are_orthogonal() {
    for (s, d) in [
        (Point::new(0.0, 0.0), Point::new(100.0, 60.0)),
        (Point::new(80.0, 60.0), Point::new(10.0, 0.0)),
        (Point::new(30.0, 5.0), Point::new(35.0, 9.0)),
    ] {
        let path = route(Some(s), Some(d));
        for seg in path.windows(2) {
            assert!(seg[0].x == seg[1].x || seg[0].y == seg[1].y, "{seg:?}");
        }
    }
}

#[test]
fn test_null_destination_yields_stub() {
    let s = Point::new(10.0, 10.0);
    assert_eq!(route(Some(s), None), vec![s, Point::new(30.0, 10.0)]);
}

#[test]
fn test_null_source_yields_stub() {
    let d = Point::new(50.0, 10.0);
    assert_eq!(route(None, Some(d)), vec![Point::new(30.0, 10.0), d]);
}

#[test]
fn test_both_null_is_empty() {
    assert!(route(None, None).is_empty());
}

// ── Endpoint fidelity ────────────────────────────────────────────────────

#[test]
fn test_endpoints_match_resolved_pins() {
    let subs = vec![
        placed(40.0, 20.0, Presentation::Closed),
        placed(120.0, 60.0, Presentation::Open),
    ];
    let inputs = vec![Point::new(0.0, 40.0), Point::new(0.0, 80.0)];
    let outputs = vec![Point::new(200.0, 60.0)];
    let resolver = PinResolver {
        subcomponents: &subs,
        input_pins: &inputs,
        output_pins: &outputs,
    };
    let conns = vec![
        wire(input(1), sub(0, 1)),
        wire(sub(0, 0), sub(1, 0)),
        wire(sub(1, 0), output(0)),
    ];
    let paths = route_wires(&resolver, &conns);
    assert_eq!(paths.len(), 3);

    assert_eq!(paths[0][0], inputs[1]);
    assert_eq!(*paths[0].last().unwrap(), subs[0].input_pin(1));

    let from = subs[0].output_pin(0);
    assert_eq!(from.x, 80.0);
    assert_eq!(paths[1][0], from);
    assert_eq!(*paths[1].last().unwrap(), subs[1].input_pin(0));

    assert_eq!(*paths[2].last().unwrap(), outputs[0]);
}

#[test]
fn test_subcomponent_pins_follow_presentation() {
    let closed = placed(0.0, 0.0, Presentation::Closed);
    let open = placed(0.0, 0.0, Presentation::Open);
    // Closed pins keep a margin, open pins split the edge evenly.
    assert_eq!(closed.input_pin(0).y, 6.0);
    assert_eq!(open.input_pin(0).y, 10.0);
    assert_eq!(closed.output_pin(0).y, 15.0);
    assert_eq!(open.output_pin(0).x, 40.0);
}

#[test]
fn test_unresolvable_end_becomes_stub() {
    let resolver = PinResolver {
        subcomponents: &[],
        input_pins: &[Point::new(0.0, 5.0)],
        output_pins: &[],
    };
    let paths = route_wires(&resolver, &[wire(input(0), sub(7, 0))]);
    assert_eq!(paths[0], vec![Point::new(0.0, 5.0), Point::new(20.0, 5.0)]);
}
