//! Network-subsystem error types.

use thiserror::Error;

use ft_core::ElementId;

/// Fatal defects in the element table discovered at graph construction.
///
/// Per the error policy, these abort model construction — there is no
/// partially built network.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("element ids are not contiguous: row {row} has id {found}, expected {expected}")]
    NonContiguousIds { row: usize, found: u32, expected: u32 },

    #[error(
        "intersection {id} on road {road}: reference to road {target} \
         matched {found} intersection rows (expected exactly 1)"
    )]
    UnresolvedIntersection {
        id: ElementId,
        road: String,
        target: String,
        found: usize,
    },
}

/// Errors produced by `ft-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("no route from {origin} to {destination}")]
    NoRoute {
        origin: ElementId,
        destination: ElementId,
    },

    #[error("no straight route starts at {origin}")]
    NoStraightRoute { origin: ElementId },

    #[error("no destination sink available from {origin}")]
    NoDestination { origin: ElementId },

    #[error("element table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
