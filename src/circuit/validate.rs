//! Structural checks run before any definition is built.
//!
//! A malformed circuit aborts rendering instead of producing a misleading
//! diagram, so every check returns the first violation it finds.

use log::debug;

use super::types::{BoundaryPin, CircuitState, Component, ComponentId, PinRef, PinTarget};
use crate::error::{CircuitError, Result};

/// Which end of a connection a `PinRef` sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Destination,
}

impl End {
    fn name(self) -> &'static str {
        match self {
            End::Source => "source",
            End::Destination => "destination",
        }
    }
}

/// Validate the whole circuit.
pub fn validate(state: &CircuitState) -> Result<()> {
    if state.component_registry.is_empty() {
        return Err(CircuitError::EmptyRegistry);
    }
    if !state.component_registry.contains_key(&state.root_component) {
        return Err(CircuitError::UnknownRoot(state.root_component));
    }
    for (&id, component) in &state.component_registry {
        if component.is_chip() {
            validate_chip(state, id, component)?;
        }
    }
    debug!(
        "validated circuit: {} components, root {}",
        state.component_registry.len(),
        state.root_component
    );
    Ok(())
}

fn validate_chip(state: &CircuitState, id: ComponentId, chip: &Component) -> Result<()> {
    let Some(interior) = chip.interior() else {
        return Ok(());
    };

    let mut subcomponents: Vec<&Component> = Vec::with_capacity(interior.subcomponents.len());
    for &sub_id in &interior.subcomponents {
        let Some(sub) = state.component(sub_id) else {
            return Err(CircuitError::UnknownComponent {
                chip: id,
                missing: sub_id,
            });
        };
        if sub_id >= id {
            return Err(CircuitError::DefinitionOrder {
                chip: id,
                subcomponent: sub_id,
            });
        }
        subcomponents.push(sub);
    }

    // drivers[i][p] = number of connections driving input pin p of subcomponent i
    let mut drivers: Vec<Vec<usize>> = subcomponents.iter().map(|s| vec![0; s.n_inputs]).collect();
    let mut touched = vec![false; subcomponents.len()];
    let mut output_drivers = vec![0usize; chip.n_outputs];

    for (ci, connection) in interior.connections.iter().enumerate() {
        for (end, pin_ref) in [
            (End::Source, &connection.source),
            (End::Destination, &connection.destination),
        ] {
            let Some((target, pin)) = check_end(id, chip, &subcomponents, ci, end, pin_ref)? else {
                continue;
            };
            match (end, target) {
                (End::Source, PinTarget::Subcomponent(idx)) => touched[idx] = true,
                (End::Destination, PinTarget::Subcomponent(idx)) => {
                    touched[idx] = true;
                    drivers[idx][pin] += 1;
                }
                (End::Destination, PinTarget::Boundary(_)) => output_drivers[pin] += 1,
                (End::Source, PinTarget::Boundary(_)) => {}
            }
        }
    }

    for (idx, pins) in drivers.iter().enumerate() {
        // An isolated subcomponent is a layout failure, reported when its
        // chip is laid out.
        if !touched[idx] {
            continue;
        }
        if let Some((pin, &count)) = pins.iter().enumerate().find(|(_, c)| **c != 1) {
            return Err(CircuitError::PinDriverCount {
                chip: id,
                target: format!("subcomponent {idx}"),
                pin,
                drivers: count,
            });
        }
    }
    // An explicit unconnected source still counts as the output's one
    // connection.
    if let Some((pin, &count)) = output_drivers.iter().enumerate().find(|(_, c)| **c != 1) {
        return Err(CircuitError::PinDriverCount {
            chip: id,
            target: "boundary output".to_string(),
            pin,
            drivers: count,
        });
    }
    Ok(())
}

/// Check one connection end; returns the resolved target and pin, or `None`
/// for a deliberately unconnected end.
fn check_end(
    chip_id: ComponentId,
    chip: &Component,
    subcomponents: &[&Component],
    connection: usize,
    end: End,
    pin_ref: &PinRef,
) -> Result<Option<(PinTarget, usize)>> {
    let Some(target) = pin_ref.component else {
        return Ok(None);
    };
    let Some(pin) = pin_ref.pin else {
        return Err(CircuitError::MissingPin {
            chip: chip_id,
            connection,
        });
    };

    let (label, available) = match (end, target) {
        (_, PinTarget::Subcomponent(idx)) => {
            let Some(sub) = subcomponents.get(idx) else {
                return Err(CircuitError::UnknownSubcomponent {
                    chip: chip_id,
                    connection,
                    index: idx,
                    count: subcomponents.len(),
                });
            };
            let available = match end {
                End::Source => sub.n_outputs,
                End::Destination => sub.n_inputs,
            };
            (format!("subcomponent {idx}"), available)
        }
        (End::Source, PinTarget::Boundary(BoundaryPin::Input)) => {
            ("boundary input".to_string(), chip.n_inputs)
        }
        (End::Destination, PinTarget::Boundary(BoundaryPin::Output)) => {
            ("boundary output".to_string(), chip.n_outputs)
        }
        (_, PinTarget::Boundary(boundary)) => {
            return Err(CircuitError::WrongDirection {
                chip: chip_id,
                connection,
                end: end.name(),
                target: match boundary {
                    BoundaryPin::Input => "boundary input".to_string(),
                    BoundaryPin::Output => "boundary output".to_string(),
                },
            });
        }
    };

    if pin >= available {
        return Err(CircuitError::PinOutOfRange {
            chip: chip_id,
            connection,
            target: label,
            pin,
            available,
        });
    }
    Ok(Some((target, pin)))
}

#[cfg(test)]
#[path = "../../tests/rust/test_circuit_validate.rs"]
mod tests;
