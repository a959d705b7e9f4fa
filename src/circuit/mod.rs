//! Circuit description model and structural validation.

pub mod types;
pub mod validate;

pub use types::{
    BoundaryPin, ChipInterior, CircuitState, Component, ComponentId, ComponentKind, Connection,
    ConnectionIndex, PinRef, PinTarget, Style, SubcomponentIndex,
};
pub use validate::validate;
