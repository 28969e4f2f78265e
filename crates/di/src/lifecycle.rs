//! Shutdown-hook bookkeeping, independent of the resolution engine.

use parking_lot::Mutex;
use tracing::{debug, warn};

type ShutdownHook = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// A LIFO stack of shutdown hooks.
///
/// Factories that open resources register a hook as part of building their
/// value; [`shutdown`](Lifecycle::shutdown) then releases resources in
/// reverse acquisition order. The registry itself imposes no disposal
/// ordering: this type is a plain utility, wired in by callers who want
/// it, typically registered as `Arc<Lifecycle>`:
///
/// ```
/// use std::sync::Arc;
/// use di::{provide, Container, Lifecycle};
///
/// let container = Container::new();
/// container.must_add([provide(Arc::new(Lifecycle::new()))]);
/// ```
#[derive(Default)]
pub struct Lifecycle {
    hooks: Mutex<Vec<ShutdownHook>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook to run at shutdown, after all later-registered ones.
    pub fn add_shutdown_hook<F>(&self, hook: F)
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        self.hooks.lock().push(Box::new(hook));
    }

    /// Number of hooks currently registered.
    pub fn hook_count(&self) -> usize {
        self.hooks.lock().len()
    }

    /// Run all registered hooks in reverse registration order.
    ///
    /// A failing hook is logged and does not stop the remaining hooks.
    /// Hooks are consumed; a second call is a no-op unless new hooks were
    /// registered in between.
    pub fn shutdown(&self) {
        let hooks = std::mem::take(&mut *self.hooks.lock());
        debug!("Running {} shutdown hooks", hooks.len());

        for (index, hook) in hooks.into_iter().enumerate().rev() {
            if let Err(err) = hook() {
                warn!("Shutdown hook {} failed: {err:#}", index);
            }
        }
    }
}
