//! Provider variants: eager values, run-once factories, factory chains.
//!
//! Every provider serves exactly one static type, identified by its
//! `TypeId`. Evaluation writes through a destination slot (`&mut Option<T>`
//! behind `&mut dyn Any`), so a probe with the wrong slot type is total and
//! side-effect free.

use std::any::{Any, TypeId};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::container::Container;
use crate::error::DIError;
use crate::inject;

/// Outcome of asking a provider to fill a destination slot.
pub(crate) enum Evaluation {
    /// The slot was filled with the produced value.
    Filled,
    /// The slot is not of the type this provider serves. Internal signal
    /// only; the resolution engine folds it into "not found".
    TypeMismatch,
    /// The provider owns the slot's type but failed to produce a value.
    Failed(DIError),
}

/// The one capability shared by all provider variants.
pub(crate) trait Evaluate: Send + Sync {
    fn key(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    /// Fill `slot` (a `&mut Option<T>` for the served type `T`), resolving
    /// against `owner` if the recipe depends on other registrations.
    fn evaluate(&self, slot: &mut dyn Any, owner: &Container) -> Evaluation;
}

/// A registered recipe for producing a value of one specific type.
///
/// Built with [`provide`], [`lazy`] or [`chain`] and handed to
/// [`Container::add`]. A provider belongs to the container it is added to
/// and is dropped with it.
pub struct Provider {
    pub(crate) inner: Arc<dyn Evaluate>,
}

impl Provider {
    pub(crate) fn key(&self) -> TypeId {
        self.inner.key()
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("type_name", &self.type_name())
            .finish()
    }
}

struct ValueProvider<T> {
    value: T,
}

impl<T> Evaluate for ValueProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn key(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn evaluate(&self, slot: &mut dyn Any, _owner: &Container) -> Evaluation {
        match slot.downcast_mut::<Option<T>>() {
            Some(slot) => {
                *slot = Some(self.value.clone());
                Evaluation::Filled
            }
            None => Evaluation::TypeMismatch,
        }
    }
}

/// Register an already-built value of type `T`.
///
/// Resolution clones the captured value out, so repeated injections are
/// unlimited and always observe the same state. Register `Arc<T>` when the
/// callers should share one instance instead of copies.
pub fn provide<T>(value: T) -> Provider
where
    T: Clone + Send + Sync + 'static,
{
    Provider {
        inner: Arc::new(ValueProvider { value }),
    }
}

type Factory<T> = Box<dyn Fn(&Container) -> anyhow::Result<T> + Send + Sync>;

struct LazyProvider<T> {
    factory: Factory<T>,
    outcome: OnceCell<Result<T, DIError>>,
}

impl<T> Evaluate for LazyProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn key(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn evaluate(&self, slot: &mut dyn Any, owner: &Container) -> Evaluation {
        let slot = match slot.downcast_mut::<Option<T>>() {
            Some(slot) => slot,
            None => return Evaluation::TypeMismatch,
        };

        // Single-flight: the first caller runs the factory, concurrent
        // callers block on the cell until the outcome is in. The outcome,
        // error included, is permanent.
        let outcome = self.outcome.get_or_init(|| {
            debug!("Running factory for {}", std::any::type_name::<T>());
            (self.factory)(owner)
                .map_err(|err| DIError::factory(std::any::type_name::<T>(), err))
        });

        match outcome {
            Ok(value) => {
                *slot = Some(value.clone());
                Evaluation::Filled
            }
            Err(err) => Evaluation::Failed(err.clone()),
        }
    }
}

/// Register a deferred factory for type `T`, run at most once.
///
/// The factory runs on first demand, in the context of whichever caller
/// wins the race to trigger it; its result (failure included) is memoized
/// and replayed on every later injection. Failed factories are never
/// retried.
///
/// The factory receives the container the provider was added to and may
/// call back into the injection surface to resolve its own dependencies;
/// each nested lookup follows the same rules recursively, and a nested
/// lookup of `T` itself is reported as a circular dependency.
pub fn lazy<T, F>(factory: F) -> Provider
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&Container) -> anyhow::Result<T> + Send + Sync + 'static,
{
    let factory: Factory<T> = Box::new(factory);
    Provider {
        inner: Arc::new(LazyProvider {
            factory,
            outcome: OnceCell::new(),
        }),
    }
}

/// Register `T` as a transformation of another registered type `R`.
///
/// Exactly a [`lazy`] provider whose factory resolves `R` from the owning
/// container and maps it through `transform`; a failure resolving `R`
/// becomes this provider's failure.
pub fn chain<R, T, F>(transform: F) -> Provider
where
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(R) -> anyhow::Result<T> + Send + Sync + 'static,
{
    lazy(move |owner: &Container| {
        let input = inject::inject::<R>(&[owner])?;
        transform(input)
    })
}
