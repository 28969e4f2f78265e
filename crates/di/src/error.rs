//! Error types for registration and resolution.

use std::sync::Arc;

use thiserror::Error;

/// Result alias used across the registration and resolution surface.
pub type DIResult<T> = Result<T, DIError>;

/// Errors returned by [`Container::add`](crate::Container::add) and the
/// injection functions.
///
/// `Clone` is load-bearing: a lazy provider memoizes its factory's failure
/// and replays a clone of it on every later resolution attempt.
#[derive(Debug, Error, Clone)]
pub enum DIError {
    /// A provider for this type is already registered in the container.
    #[error("provider for {type_name} already exists")]
    DuplicateProvider { type_name: &'static str },

    /// None of the consulted containers holds a provider for this type.
    #[error("provider for {type_name} doesn't exist")]
    ProviderNotFound { type_name: &'static str },

    /// Resolution of this type re-entered itself in the same container
    /// on the same call chain.
    #[error("circular dependency detected while resolving {type_name}")]
    CircularDependency { type_name: &'static str },

    /// The user-supplied factory behind a lazy or chain provider failed.
    #[error("factory for {type_name} failed: {cause}")]
    Factory {
        type_name: &'static str,
        cause: Arc<anyhow::Error>,
    },
}

impl DIError {
    pub(crate) fn factory(type_name: &'static str, cause: anyhow::Error) -> Self {
        Self::Factory {
            type_name,
            cause: Arc::new(cause),
        }
    }

    /// Name of the type the failed operation was about.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::DuplicateProvider { type_name }
            | Self::ProviderNotFound { type_name }
            | Self::CircularDependency { type_name }
            | Self::Factory { type_name, .. } => type_name,
        }
    }
}
