// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

//! Generic CRUD for position-ordered collections.
//!
//! A [`MovableService`] keeps one collection in a repository, mirrors it in a
//! shared cache and maintains a dense ordering through explicit moves. The
//! [`MovableValidator`] and the facades add business rule checks on top.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod movable;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, load_config_from, ConfigError, MovableConfig};
pub use movable::core::entity::{CloneAndReset, CopyStrategy, Identifiable, Movable};
pub use movable::core::error::{CacheError, Direction, RepositoryError, ServiceError};
pub use movable::core::sorting::{compare_movable, sorted, sorted_nullable};
pub use movable::facade::{ChildAssociation, ChildFacade, ChildSource, IdentityMapper, Mapper, ParentFacade};
pub use movable::service::MovableService;
pub use movable::storage::{
    CollectionCache, InMemoryCache, InMemoryRepository, JsonFileRepository, Repository,
};
pub use movable::validation::{
    Event, MovableValidator, NewPositionRule, Outcome, Severity, Status, ValidationType,
};
