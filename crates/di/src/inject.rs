//! The resolution engine: type-keyed lookup across ordered containers.

use std::any::{type_name, TypeId};

use tracing::debug;

use crate::container::Container;
use crate::error::{DIError, DIResult};
use crate::provider::Evaluation;

/// Resolve a value of type `T` from the first registry that serves it.
///
/// Registries are consulted strictly in the order given, and the first one
/// holding a provider for `T` decides the outcome: its success or its error
/// is returned as-is, with no fallthrough to later registries. A registry
/// without a provider for `T` is skipped. If `T` is already being resolved
/// on this call chain in one of the registries, the whole call fails with
/// [`DIError::CircularDependency`] immediately.
pub fn inject<T: 'static>(registries: &[&Container]) -> DIResult<T> {
    let key = TypeId::of::<T>();

    for &container in registries {
        let _guard = container.begin_resolve(key, type_name::<T>())?;

        let provider = match container.lookup(key) {
            Some(provider) => provider,
            None => continue,
        };

        let mut slot: Option<T> = None;
        match provider.evaluate(&mut slot, container) {
            Evaluation::Filled => {
                if let Some(value) = slot {
                    debug!("Resolved {}", type_name::<T>());
                    return Ok(value);
                }
            }
            Evaluation::Failed(err) => return Err(err),
            // The map is keyed by type, so a mismatch here means the
            // provider serves a different type than its key claims; the
            // registry is treated as not serving T.
            Evaluation::TypeMismatch => {}
        }
    }

    Err(DIError::ProviderNotFound {
        type_name: type_name::<T>(),
    })
}

/// Resolve a value of type `T` into `dest`.
///
/// Same search and tie-break rules as [`inject`]; `dest` is only written on
/// success.
pub fn inject_to<T: 'static>(dest: &mut T, registries: &[&Container]) -> DIResult<()> {
    *dest = inject(registries)?;
    Ok(())
}

/// Resolve a value of type `T`, aborting on failure.
///
/// # Panics
///
/// Panics if no registry serves `T`, the provider's factory failed, or the
/// resolution cycled.
pub fn must_inject<T: 'static>(registries: &[&Container]) -> T {
    match inject(registries) {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Resolve a value of type `T` into `dest`, aborting on failure.
///
/// # Panics
///
/// Panics under the same conditions as [`must_inject`].
pub fn must_inject_to<T: 'static>(dest: &mut T, registries: &[&Container]) {
    if let Err(err) = inject_to(dest, registries) {
        panic!("{err}");
    }
}
