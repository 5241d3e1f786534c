//! Engine error types

use crate::order::{MaterialId, ProducerId};
use std::fmt;

/// Errors raised by the coordination engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Registration or start attempted while the engine is running or stopped
    AlreadyStarted,

    /// Stop requested before start
    NotStarted,

    /// The solver pool needs at least one thread
    InvalidWorkerCount(usize),

    /// Customers are registered but no producer could ever evaluate a material
    NoProducers,

    /// A price list arrived from a handle that was never registered
    UnknownProducer(ProducerId),

    /// A solver thread was handed an order whose material is not evaluated
    MissingCatalogEntry(MaterialId),

    /// The operating system refused to create a worker thread
    ThreadSpawn {
        /// Name of the thread that could not be started
        name: String,
        /// Reason reported by the OS
        reason: String,
    },

    /// A worker thread panicked
    WorkerPanicked {
        /// Name of the thread that panicked
        name: String,
    },

    /// Configuration rejected during validation or parsing
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::AlreadyStarted => write!(f, "Engine already started"),
            EngineError::NotStarted => write!(f, "Engine not started"),
            EngineError::InvalidWorkerCount(count) => {
                write!(f, "Invalid worker count: {}", count)
            }
            EngineError::NoProducers => {
                write!(f, "Customers registered without any producer")
            }
            EngineError::UnknownProducer(producer) => {
                write!(f, "Unknown producer: {}", producer)
            }
            EngineError::MissingCatalogEntry(material_id) => {
                write!(f, "Missing catalog entry for material {}", material_id)
            }
            EngineError::ThreadSpawn { name, reason } => {
                write!(f, "Failed to spawn thread {}: {}", name, reason)
            }
            EngineError::WorkerPanicked { name } => write!(f, "Worker {} panicked", name),
            EngineError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
