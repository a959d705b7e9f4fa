//! Error types for circuit validation, layout and persistence.
//!
//! Every variant is fatal for the render pass that raised it: helpers fail on
//! the first violated invariant and nothing is committed to the view.

use thiserror::Error;

use crate::circuit::ComponentId;

/// Failure while positioning the interior of an open chip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("subcomponent {index} is not reachable from any boundary pin and has no column")]
    UnplacedSubcomponent { index: usize },
}

/// Failure while reading or writing persisted openness state.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error returned by every fallible public operation.
#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("circuit has no components")]
    EmptyRegistry,

    #[error("root component {0} is not in the component registry")]
    UnknownRoot(ComponentId),

    #[error("chip {chip} references unknown component {missing}")]
    UnknownComponent {
        chip: ComponentId,
        missing: ComponentId,
    },

    #[error(
        "chip {chip} uses component {subcomponent}, which must be defined before it (ids are built in ascending order)"
    )]
    DefinitionOrder {
        chip: ComponentId,
        subcomponent: ComponentId,
    },

    #[error("chip {chip}: connection {connection} references subcomponent index {index}, but the chip has {count}")]
    UnknownSubcomponent {
        chip: ComponentId,
        connection: usize,
        index: usize,
        count: usize,
    },

    #[error("chip {chip}: connection {connection} uses pin {pin} of {target}, which has {available} pins on that side")]
    PinOutOfRange {
        chip: ComponentId,
        connection: usize,
        target: String,
        pin: usize,
        available: usize,
    },

    #[error("chip {chip}: connection {connection} has a component reference without a pin index")]
    MissingPin { chip: ComponentId, connection: usize },

    #[error("chip {chip}: connection {connection} has {end} '{target}', which cannot be used on that end")]
    WrongDirection {
        chip: ComponentId,
        connection: usize,
        end: &'static str,
        target: String,
    },

    #[error("chip {chip}: pin {pin} of {target} is driven by {drivers} connections (expected exactly 1)")]
    PinDriverCount {
        chip: ComponentId,
        target: String,
        pin: usize,
        drivers: usize,
    },

    #[error("layout failed for chip {chip}: {source}")]
    Layout {
        chip: ComponentId,
        #[source]
        source: LayoutError,
    },

    #[error("no definition for component {0} (definitions must be built before instancing)")]
    MissingDefinition(ComponentId),

    #[error("invalid circuit JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T, E = CircuitError> = std::result::Result<T, E>;
