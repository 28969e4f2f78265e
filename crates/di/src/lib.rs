//! Type-keyed dependency registry with lazy, memoized resolution.
//!
//! Callers register providers (eager values, run-once factories, or
//! factory-composing chains) into a [`Container`], keyed by the static
//! type they produce, and resolve them later with [`inject`] /
//! [`inject_to`], searching one or more containers in order. Factories may
//! re-enter the resolution surface for their own dependencies; a reentrant
//! resolution of a type already in flight on the same call chain is
//! reported as a circular dependency instead of hanging.
//!
//! ```
//! use di::{chain, provide, Container};
//!
//! #[derive(Clone)]
//! struct Config {
//!     dsn: String,
//! }
//!
//! #[derive(Clone)]
//! struct Database {
//!     conn: String,
//! }
//!
//! let container = Container::new();
//! container.must_add([
//!     provide(Config { dsn: "mysql://localhost".into() }),
//!     chain(|cfg: Config| Ok(Database { conn: cfg.dsn })),
//! ]);
//!
//! let db: Database = container.inject().unwrap();
//! assert_eq!(db.conn, "mysql://localhost");
//! ```

mod container;
mod error;
mod inject;
mod lifecycle;
mod provider;

pub use container::Container;
pub use error::{DIError, DIResult};
pub use inject::{inject, inject_to, must_inject, must_inject_to};
pub use lifecycle::Lifecycle;
pub use provider::{chain, lazy, provide, Provider};
