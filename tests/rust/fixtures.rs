//! Circuits shared by the unit tests.

use std::collections::BTreeMap;

use crate::circuit::{CircuitState, Component, ComponentId, Connection, PinRef, Style};

pub fn state(root: ComponentId, components: Vec<(ComponentId, Component)>) -> CircuitState {
    CircuitState {
        root_component: root,
        component_registry: components.into_iter().collect::<BTreeMap<_, _>>(),
    }
}

pub fn wire(source: PinRef, destination: PinRef) -> Connection {
    Connection::new(source, destination)
}

pub fn sub(index: usize, pin: usize) -> PinRef {
    PinRef::subcomponent(index, pin)
}

pub fn input(pin: usize) -> PinRef {
    PinRef::boundary_input(pin)
}

pub fn output(pin: usize) -> PinRef {
    PinRef::boundary_output(pin)
}

/// Four gates in two columns:
///
/// ```text
/// a,b → AND ─┐
///            OR  → out0
/// a,b → NAND ┤
///      a ──  AND → out1
/// ```
pub fn half_adder_connections() -> Vec<Connection> {
    vec![
        wire(input(0), sub(0, 0)),
        wire(input(1), sub(0, 1)),
        wire(input(0), sub(1, 0)),
        wire(input(1), sub(1, 1)),
        wire(sub(0, 0), sub(2, 0)),
        wire(sub(1, 0), sub(2, 1)),
        wire(input(0), sub(3, 0)),
        wire(sub(1, 0), sub(3, 1)),
        wire(sub(2, 0), output(0)),
        wire(sub(3, 0), output(1)),
    ]
}

/// Root chip 3 over the gates AND (0), NAND (1) and OR (2).
pub fn half_adder() -> CircuitState {
    state(
        3,
        vec![
            (0, Component::gate("and", 2, 1)),
            (1, Component::gate("nand", 2, 1)),
            (2, Component::gate("or", 2, 1)),
            (
                3,
                Component::chip(2, 2, vec![0, 1, 2, 0], half_adder_connections()).with_style(
                    Style {
                        name: Some("half adder".to_string()),
                        ..Style::default()
                    },
                ),
            ),
        ],
    )
}

/// Two levels of nesting: root chip 3 holds two NAND chips (2) around an
/// AND gate; each NAND chip is an AND followed by a NOT.
///
/// Chip occurrences: `"0"` and `"2"`. `"1"` is a gate.
pub fn nested() -> CircuitState {
    state(
        3,
        vec![
            (0, Component::gate("and", 2, 1)),
            (1, Component::gate("not", 1, 1)),
            (
                2,
                Component::chip(
                    2,
                    1,
                    vec![0, 1],
                    vec![
                        wire(input(0), sub(0, 0)),
                        wire(input(1), sub(0, 1)),
                        wire(sub(0, 0), sub(1, 0)),
                        wire(sub(1, 0), output(0)),
                    ],
                )
                .with_style(Style {
                    name: Some("nand".to_string()),
                    color: Some("#e53935".to_string()),
                    ..Style::default()
                }),
            ),
            (
                3,
                Component::chip(
                    2,
                    1,
                    vec![2, 0, 2],
                    vec![
                        wire(input(0), sub(0, 0)),
                        wire(input(1), sub(0, 1)),
                        wire(input(0), sub(1, 0)),
                        wire(input(1), sub(1, 1)),
                        wire(sub(0, 0), sub(2, 0)),
                        wire(sub(1, 0), sub(2, 1)),
                        wire(sub(2, 0), output(0)),
                    ],
                ),
            ),
        ],
    )
}

/// Three levels: chip 4 wraps a single nested chip 3 from [`nested`].
pub fn deeply_nested() -> CircuitState {
    let mut s = nested();
    s.component_registry.insert(
        4,
        Component::chip(
            2,
            1,
            vec![3],
            vec![
                wire(input(0), sub(0, 0)),
                wire(input(1), sub(0, 1)),
                wire(sub(0, 0), output(0)),
            ],
        ),
    );
    s.root_component = 4;
    s
}

/// A chip whose only subcomponent is wired to nothing; the boundary input
/// feeds the output directly.
pub fn isolated() -> CircuitState {
    state(
        1,
        vec![
            (0, Component::gate("not", 1, 1)),
            (1, Component::chip(1, 1, vec![0], vec![wire(input(0), output(0))])),
        ],
    )
}

pub const HALF_ADDER_JSON: &str = r##"{
  "rootComponent": 3,
  "componentRegistry": {
    "0": { "nInputs": 2, "nOutputs": 1, "state": "and", "style": {} },
    "1": { "nInputs": 2, "nOutputs": 1, "state": "nand" },
    "2": { "nInputs": 2, "nOutputs": 1, "state": "or", "style": { "color": "#43a047" } },
    "3": {
      "nInputs": 2, "nOutputs": 2,
      "style": { "name": "half adder", "inputNames": ["a", "b"] },
      "state": {
        "components": [0, 1, 2, 0],
        "connections": [
          { "source": { "component": "input", "pin": 0 }, "destination": { "component": 0, "pin": 0 } },
          { "source": { "component": "input", "pin": 1 }, "destination": { "component": 0, "pin": 1 } },
          { "source": { "component": "input", "pin": 0 }, "destination": { "component": 1, "pin": 0 } },
          { "source": { "component": "boundary-input", "pin": 1 }, "destination": { "component": 1, "pin": 1 } },
          { "source": { "component": 0, "pin": 0 }, "destination": { "component": 2, "pin": 0 } },
          { "source": { "component": 1, "pin": 0 }, "destination": { "component": 2, "pin": 1 } },
          { "source": { "component": "input", "pin": 0 }, "destination": { "component": 3, "pin": 0 } },
          { "source": { "component": 1, "pin": 0 }, "destination": { "component": 3, "pin": 1 } },
          { "source": { "component": 2, "pin": 0 }, "destination": { "component": "output", "pin": 0 } },
          { "source": { "component": 3, "pin": 0 }, "destination": { "component": "output", "pin": 1 } }
        ]
      }
    }
  }
}"##;
