//! Infrastructure-subsystem error types.

use thiserror::Error;

use ft_core::{BridgeCondition, ElementId};

/// Errors produced by `ft-infra`.  All of them are fatal at model
/// construction — there is no partially built registry.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Build(#[from] ft_network::BuildError),

    #[error("bridge {id} ({name:?}): condition {condition} is not in the collapse-probability table")]
    UnknownCondition {
        id: ElementId,
        name: String,
        condition: BridgeCondition,
    },

    #[error("bridge {id} ({name:?}) has no condition rating")]
    MissingCondition { id: ElementId, name: String },

    #[error("condition {condition}: collapse probability {chance} is outside [0, 1]")]
    InvalidChance {
        condition: BridgeCondition,
        chance: f64,
    },

    #[error("invalid delay profile: {0}")]
    InvalidDelayProfile(String),
}

pub type InfraResult<T> = Result<T, InfraError>;
