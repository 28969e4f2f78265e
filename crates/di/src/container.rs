//! The provider registry.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::{DIError, DIResult};
use crate::provider::{Evaluate, Provider};

/// A concurrency-safe collection of providers, at most one per type.
///
/// Containers start empty and grow through [`add`](Container::add) /
/// [`must_add`](Container::must_add). Resolution goes through
/// [`inject`](crate::inject) / [`inject_to`](crate::inject_to) (or the
/// single-container method sugar on this type), which search one or more
/// containers in caller order.
#[derive(Default)]
pub struct Container {
    providers: RwLock<HashMap<TypeId, Arc<dyn Evaluate>>>,
    /// Types currently being resolved, scoped to one call chain so
    /// concurrent unrelated resolutions never observe each other.
    resolving: Mutex<HashSet<(ThreadId, TypeId)>>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register providers, rejecting duplicates.
    ///
    /// The batch is validated as a whole before anything is installed: if
    /// any provider's type is already registered, or appears twice within
    /// the batch, the call fails naming the first duplicate and the
    /// container is left unchanged. Concurrent `add` calls racing on the
    /// same type produce exactly one winner.
    pub fn add(&self, providers: impl IntoIterator<Item = Provider>) -> DIResult<()> {
        let batch: Vec<Provider> = providers.into_iter().collect();

        let mut map = self.providers.write();

        let mut incoming = HashSet::new();
        for provider in &batch {
            if map.contains_key(&provider.key()) || !incoming.insert(provider.key()) {
                warn!("Rejected duplicate provider for {}", provider.type_name());
                return Err(DIError::DuplicateProvider {
                    type_name: provider.type_name(),
                });
            }
        }

        for provider in batch {
            debug!("Registered provider for {}", provider.type_name());
            map.insert(provider.key(), provider.inner);
        }
        Ok(())
    }

    /// Register providers, aborting on error.
    ///
    /// For startup wiring where a duplicate registration is a programmer
    /// mistake rather than a condition to recover from.
    ///
    /// # Panics
    ///
    /// Panics if any provider in the batch is a duplicate.
    pub fn must_add(&self, providers: impl IntoIterator<Item = Provider>) {
        if let Err(err) = self.add(providers) {
            panic!("{err}");
        }
    }

    /// Whether a provider for `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.providers.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    /// Resolve a `T` from this container alone.
    ///
    /// Shorthand for [`inject`](crate::inject) with a single registry.
    pub fn inject<T: 'static>(&self) -> DIResult<T> {
        crate::inject::inject(&[self])
    }

    /// Resolve a `T` from this container alone, writing into `dest`.
    pub fn inject_to<T: 'static>(&self, dest: &mut T) -> DIResult<()> {
        crate::inject::inject_to(dest, &[self])
    }

    /// Shared handle to the provider for `key`, if any. Cloned out of the
    /// lock so no container lock is held while the provider evaluates;
    /// factories re-enter this container for their own dependencies.
    pub(crate) fn lookup(&self, key: TypeId) -> Option<Arc<dyn Evaluate>> {
        self.providers.read().get(&key).cloned()
    }

    /// Mark `key` as resolving on the current call chain.
    ///
    /// Fails with [`DIError::CircularDependency`] if this chain is already
    /// inside a resolution of the same type in this container.
    pub(crate) fn begin_resolve(
        &self,
        key: TypeId,
        type_name: &'static str,
    ) -> DIResult<ResolveGuard<'_>> {
        let chain = thread::current().id();
        let mut resolving = self.resolving.lock();
        if !resolving.insert((chain, key)) {
            debug!("Circular resolution of {} detected", type_name);
            return Err(DIError::CircularDependency { type_name });
        }
        Ok(ResolveGuard {
            container: self,
            key,
            chain,
        })
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("providers", &self.len())
            .finish()
    }
}

/// Clears the resolving marker on every exit path, panic unwinds included.
pub(crate) struct ResolveGuard<'a> {
    container: &'a Container,
    key: TypeId,
    chain: ThreadId,
}

impl Drop for ResolveGuard<'_> {
    fn drop(&mut self) {
        self.container
            .resolving
            .lock()
            .remove(&(self.chain, self.key));
    }
}
