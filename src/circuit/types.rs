//! Circuit description types: the `CircuitState` handed over by the
//! external circuit compiler.
//!
//! The serde shape matches the compiler's JSON output: a gate carries its
//! primitive name as a string `state`, a chip carries an object `state` with
//! `components` and `connections`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Registry key of a component, assigned by the circuit compiler.
pub type ComponentId = u32;

/// Index into a chip's ordered `subcomponents` list.
pub type SubcomponentIndex = usize;

/// Index into a chip's `connections` list.
pub type ConnectionIndex = usize;

// ─── Style ───────────────────────────────────────────────────────────────────

/// Optional display hints attached to a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_names: Option<Vec<String>>,
}

impl Style {
    pub fn input_name(&self, pin: usize) -> Option<&str> {
        self.input_names.as_ref()?.get(pin).map(String::as_str)
    }

    pub fn output_name(&self, pin: usize) -> Option<&str> {
        self.output_names.as_ref()?.get(pin).map(String::as_str)
    }
}

// ─── Pins and connections ────────────────────────────────────────────────────

/// The enclosing chip's own external pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryPin {
    #[serde(rename = "input", alias = "boundary-input")]
    Input,
    #[serde(rename = "output", alias = "boundary-output")]
    Output,
}

/// What a connection end attaches to inside a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PinTarget {
    Subcomponent(SubcomponentIndex),
    Boundary(BoundaryPin),
}

/// One end of a connection. `component: None` marks a deliberately
/// unconnected end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRef {
    pub component: Option<PinTarget>,
    #[serde(default)]
    pub pin: Option<usize>,
}

impl PinRef {
    pub fn subcomponent(index: SubcomponentIndex, pin: usize) -> Self {
        Self {
            component: Some(PinTarget::Subcomponent(index)),
            pin: Some(pin),
        }
    }

    pub fn boundary_input(pin: usize) -> Self {
        Self {
            component: Some(PinTarget::Boundary(BoundaryPin::Input)),
            pin: Some(pin),
        }
    }

    pub fn boundary_output(pin: usize) -> Self {
        Self {
            component: Some(PinTarget::Boundary(BoundaryPin::Output)),
            pin: Some(pin),
        }
    }

    pub fn unconnected() -> Self {
        Self {
            component: None,
            pin: None,
        }
    }

    /// Subcomponent index if this end attaches to a subcomponent.
    pub fn subcomponent_index(&self) -> Option<SubcomponentIndex> {
        match self.component {
            Some(PinTarget::Subcomponent(idx)) => Some(idx),
            _ => None,
        }
    }
}

/// A directed wire inside a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: PinRef,
    pub destination: PinRef,
}

impl Connection {
    pub fn new(source: PinRef, destination: PinRef) -> Self {
        Self {
            source,
            destination,
        }
    }
}

// ─── Components ──────────────────────────────────────────────────────────────

/// Interior of a chip: ordered subcomponents and the wires between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChipInterior {
    #[serde(rename = "components")]
    pub subcomponents: Vec<ComponentId>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Gate (primitive name) or chip (interior).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentKind {
    Gate(String),
    Chip(ChipInterior),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub n_inputs: usize,
    pub n_outputs: usize,
    #[serde(rename = "state")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub style: Style,
}

impl Component {
    pub fn gate(name: impl Into<String>, n_inputs: usize, n_outputs: usize) -> Self {
        Self {
            n_inputs,
            n_outputs,
            kind: ComponentKind::Gate(name.into()),
            style: Style::default(),
        }
    }

    pub fn chip(
        n_inputs: usize,
        n_outputs: usize,
        subcomponents: Vec<ComponentId>,
        connections: Vec<Connection>,
    ) -> Self {
        Self {
            n_inputs,
            n_outputs,
            kind: ComponentKind::Chip(ChipInterior {
                subcomponents,
                connections,
            }),
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn is_chip(&self) -> bool {
        matches!(self.kind, ComponentKind::Chip(_))
    }

    pub fn interior(&self) -> Option<&ChipInterior> {
        match &self.kind {
            ComponentKind::Chip(interior) => Some(interior),
            ComponentKind::Gate(_) => None,
        }
    }
}

// ─── CircuitState ────────────────────────────────────────────────────────────

/// A compiled circuit: the root component plus every component it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitState {
    pub root_component: ComponentId,
    pub component_registry: BTreeMap<ComponentId, Component>,
}

impl CircuitState {
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.component_registry.get(&id)
    }

    /// Component id reached by following `path` (subcomponent indices) from
    /// the root. `None` if any step does not exist.
    pub fn resolve_path(&self, path: &[SubcomponentIndex]) -> Option<ComponentId> {
        let mut current = self.root_component;
        for &idx in path {
            let interior = self.component(current)?.interior()?;
            current = *interior.subcomponents.get(idx)?;
        }
        Some(current)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_circuit_types.rs"]
mod tests;
