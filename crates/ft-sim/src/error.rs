//! Simulation error types.

use thiserror::Error;

use ft_core::{ElementId, Tick, VehicleId};
use ft_infra::InfraError;
use ft_network::NetworkError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    /// A vehicle consumed its whole path without reaching a sink.  This is a
    /// topology defect; the run aborts rather than letting the vehicle vanish
    /// unexplained.
    #[error("vehicle {vehicle} ran out of path at {location} on tick {tick} without reaching a sink")]
    PathExhausted {
        vehicle: VehicleId,
        location: ElementId,
        tick: Tick,
    },
}

pub type SimResult<T> = Result<T, SimError>;
