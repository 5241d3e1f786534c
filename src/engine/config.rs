//! Engine configuration

use super::error::EngineError;
use crate::queue::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::thread;

/// Tunables of the coordination engine.
///
/// Every field has a default, so a partial JSON document such as
/// `{"queue_capacity": 8}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the hand-off queue between intake and solving
    pub queue_capacity: usize,

    /// Solver threads started by [`crate::WeldingCompany::start_configured`]
    pub worker_count: usize,

    /// Prefix of every worker thread name
    pub thread_name_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            worker_count: thread::available_parallelism()
                .map(|count| count.get())
                .unwrap_or(1),
            thread_name_prefix: "welding".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the queue capacity
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Set the solver pool size
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.queue_capacity == 0 {
            return Err(EngineError::InvalidConfig {
                message: "queue_capacity must be at least 1".to_string(),
            });
        }
        if self.worker_count == 0 {
            return Err(EngineError::InvalidConfig {
                message: "worker_count must be at least 1".to_string(),
            });
        }
        if self.thread_name_prefix.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "thread_name_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
