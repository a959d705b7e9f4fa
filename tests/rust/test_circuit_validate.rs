use super::*;
use crate::circuit::types::{Component, Connection, PinRef};
use crate::fixtures::{half_adder, input, isolated, nested, output, state, sub, wire};

fn single_chip(chip: Component) -> CircuitState {
    state(
        2,
        vec![
            (0, Component::gate("and", 2, 1)),
            (1, Component::gate("not", 1, 1)),
            (2, chip),
        ],
    )
}

#[test]
fn test_valid_circuits_pass() {
    assert!(validate(&half_adder()).is_ok());
    assert!(validate(&nested()).is_ok());
}

#[test]
fn test_isolated_subcomponent_passes_validation() {
    // Reported later as a layout error.
    assert!(validate(&isolated()).is_ok());
}

#[test]
fn test_empty_registry() {
    let s = state(0, Vec::new());
    assert!(matches!(validate(&s), Err(CircuitError::EmptyRegistry)));
}

#[test]
fn test_unknown_root() {
    let s = state(9, vec![(0, Component::gate("and", 2, 1))]);
    assert!(matches!(validate(&s), Err(CircuitError::UnknownRoot(9))));
}

#[test]
fn test_unknown_subcomponent_id() {
    let s = state(2, vec![(2, Component::chip(0, 0, vec![1], Vec::new()))]);
    assert!(matches!(
        validate(&s),
        Err(CircuitError::UnknownComponent { chip: 2, missing: 1 })
    ));
}

#[test]
fn test_definition_order_violation() {
    let s = state(
        1,
        vec![
            (1, Component::chip(0, 0, vec![2], Vec::new())),
            (2, Component::gate("not", 1, 1)),
        ],
    );
    assert!(matches!(
        validate(&s),
        Err(CircuitError::DefinitionOrder { chip: 1, subcomponent: 2 })
    ));
}

#[test]
fn test_subcomponent_index_out_of_range() {
    let chip = Component::chip(1, 1, vec![1], vec![wire(input(0), sub(3, 0))]);
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::UnknownSubcomponent { index: 3, count: 1, .. })
    ));
}

#[test]
fn test_pin_out_of_range() {
    let chip = Component::chip(
        1,
        1,
        vec![1],
        vec![wire(input(0), sub(0, 0)), wire(sub(0, 1), output(0))],
    );
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::PinOutOfRange { pin: 1, available: 1, .. })
    ));
}

#[test]
fn test_boundary_pin_out_of_range() {
    let chip = Component::chip(1, 1, vec![1], vec![wire(input(2), sub(0, 0))]);
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::PinOutOfRange { pin: 2, .. })
    ));
}

#[test]
fn test_missing_pin_index() {
    let dangling = PinRef {
        component: Some(PinTarget::Subcomponent(0)),
        pin: None,
    };
    let chip = Component::chip(1, 1, vec![1], vec![Connection::new(input(0), dangling)]);
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::MissingPin { connection: 0, .. })
    ));
}

#[test]
fn test_wrong_direction_boundary() {
    let chip = Component::chip(1, 1, vec![1], vec![wire(output(0), sub(0, 0))]);
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::WrongDirection { end: "source", .. })
    ));
}

#[test]
fn test_undriven_input_pin() {
    // AND with only one of its two inputs wired.
    let chip = Component::chip(
        1,
        1,
        vec![0],
        vec![wire(input(0), sub(0, 0)), wire(sub(0, 0), output(0))],
    );
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::PinDriverCount { pin: 1, drivers: 0, .. })
    ));
}

#[test]
fn test_doubly_driven_input_pin() {
    let chip = Component::chip(
        2,
        1,
        vec![1],
        vec![
            wire(input(0), sub(0, 0)),
            wire(input(1), sub(0, 0)),
            wire(sub(0, 0), output(0)),
        ],
    );
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::PinDriverCount { pin: 0, drivers: 2, .. })
    ));
}

#[test]
fn test_doubly_driven_chip_output() {
    let chip = Component::chip(
        1,
        1,
        vec![1],
        vec![
            wire(input(0), sub(0, 0)),
            wire(sub(0, 0), output(0)),
            wire(input(0), output(0)),
        ],
    );
    let err = validate(&single_chip(chip)).unwrap_err();
    assert!(err.to_string().contains("boundary output"));
}

#[test]
fn test_unconnected_end_is_allowed() {
    let chip = Component::chip(
        1,
        1,
        vec![1],
        vec![
            wire(input(0), sub(0, 0)),
            wire(sub(0, 0), PinRef::unconnected()),
            wire(PinRef::unconnected(), output(0)),
        ],
    );
    assert!(validate(&single_chip(chip)).is_ok());
}

#[test]
fn test_undriven_boundary_output() {
    let chip = Component::chip(
        1,
        2,
        vec![1],
        vec![wire(input(0), sub(0, 0)), wire(sub(0, 0), output(0))],
    );
    assert!(matches!(
        validate(&single_chip(chip)),
        Err(CircuitError::PinDriverCount { pin: 1, drivers: 0, .. })
    ));
}
