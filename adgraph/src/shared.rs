use adgraph_core::graph::GraphSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default graph registry that can be shared between threads.
///
/// There is no global instance, create one and pass clones of it
/// wherever default graphs are needed.
#[derive(Clone, Default)]
pub struct SharedGraphSet(Arc<Mutex<GraphSet>>);

impl SharedGraphSet {
    /// Wrap graph set
    pub fn new(set: GraphSet) -> Self {
        Self(Arc::new(Mutex::new(set)))
    }

    /// Lock the registry, poisoned lock is recovered
    pub fn lock(&self) -> MutexGuard<'_, GraphSet> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl From<GraphSet> for SharedGraphSet {
    fn from(set: GraphSet) -> Self {
        Self::new(set)
    }
}
