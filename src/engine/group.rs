//! Named thread groups joined as a unit

use super::error::EngineError;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// A population of named worker threads with a common lifetime.
///
/// Threads are added with [`WorkerGroup::spawn`] and all of them are joined by
/// [`WorkerGroup::join`]; a panicking thread is reported as
/// [`EngineError::WorkerPanicked`] instead of propagating the panic.
#[derive(Debug)]
pub(crate) struct WorkerGroup<T> {
    prefix: String,
    handles: Vec<(String, JoinHandle<T>)>,
}

impl<T: Send + 'static> WorkerGroup<T> {
    pub(crate) fn new(prefix: String) -> Self {
        Self {
            prefix,
            handles: Vec::new(),
        }
    }

    pub(crate) fn spawn<F>(&mut self, f: F) -> Result<(), EngineError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let name = format!("{}-{}", self.prefix, self.handles.len());
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(f)
            .map_err(|err| EngineError::ThreadSpawn {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        debug!("spawned {}", name);
        self.handles.push((name, handle));
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    /// Join every thread, in spawn order, returning each thread's result
    pub(crate) fn join(self) -> Vec<Result<T, EngineError>> {
        self.handles
            .into_iter()
            .map(|(name, handle)| {
                handle.join().map_err(|_| {
                    error!("{} panicked", name);
                    EngineError::WorkerPanicked { name }
                })
            })
            .collect()
    }
}
