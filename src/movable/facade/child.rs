//! Facade for movable collections stored inside a parent aggregate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::mapper::Mapper;
use crate::movable::core::entity::Movable;
use crate::movable::core::error::{Direction, ServiceError};
use crate::movable::core::sorting::sorted;
use crate::movable::service::MovableService;
use crate::movable::validation::{MovableSource, MovableValidator, Outcome, ValidationType};

/// How children of type `T` live inside aggregates of type `V`.
///
/// `S` is the caller-facing child data and `U` the caller-facing parent.
/// The `for_*` hooks return the whole aggregate with the change applied;
/// the facade then stores it through the aggregate's service.
#[async_trait]
pub trait ChildAssociation<S, T, U, V>: Send + Sync {
    /// Stored child with `id`, searched across every aggregate
    async fn domain_data(&self, id: i32) -> Result<Option<T>, ServiceError>;

    /// Children of `parent`
    async fn domain_list(&self, parent: &U) -> Result<Vec<T>, ServiceError>;

    /// Children sharing an aggregate with the child `id`
    async fn siblings(&self, id: i32) -> Result<Vec<T>, ServiceError>;

    /// Aggregate of `parent` with `child` appended
    async fn for_add(&self, parent: &U, child: T) -> Result<V, ServiceError>;

    /// Aggregate with `child` replacing its stored counterpart
    async fn for_update(&self, child: &S) -> Result<V, ServiceError>;

    /// Aggregate without `child`
    async fn for_remove(&self, child: &S) -> Result<V, ServiceError>;

    /// Aggregate with a copy of `child` appended
    async fn for_duplicate(&self, child: &S) -> Result<V, ServiceError>;

    /// Aggregate with `child` swapped with its neighbour in `direction`
    async fn for_move(&self, child: &S, direction: Direction) -> Result<V, ServiceError>;
}

/// Lookup of stored children for the child validator.
pub struct ChildSource<S, T, U, V> {
    association: Arc<dyn ChildAssociation<S, T, U, V>>,
}

impl<S, T, U, V> ChildSource<S, T, U, V> {
    pub fn new(association: Arc<dyn ChildAssociation<S, T, U, V>>) -> Self {
        Self { association }
    }
}

#[async_trait]
impl<S, T, U, V> MovableSource<S> for ChildSource<S, T, U, V>
where
    S: Movable,
    T: Movable,
    U: Movable,
    V: Movable,
{
    type Item = T;

    async fn find(&self, data: &S) -> Result<Option<T>, ServiceError> {
        match data.id() {
            Some(id) => self.association.domain_data(id).await,
            None => Ok(None),
        }
    }

    async fn list(&self, data: &S) -> Result<Vec<T>, ServiceError> {
        match data.id() {
            Some(id) => Ok(sorted(&self.association.siblings(id).await?)),
            None => Ok(Vec::new()),
        }
    }
}

/// Validated operations over children stored inside aggregates `V`.
///
/// Every mutation rewrites the owning aggregate through
/// [`MovableService::update`].
pub struct ChildFacade<S, T, U, V: Movable> {
    service: Arc<MovableService<V>>,
    association: Arc<dyn ChildAssociation<S, T, U, V>>,
    mapper: Box<dyn Mapper<S, T>>,
    parent_validator: MovableValidator<U, MovableService<V>>,
    child_validator: MovableValidator<S, ChildSource<S, T, U, V>>,
}

impl<S, T, U, V> ChildFacade<S, T, U, V>
where
    S: Movable,
    T: Movable,
    U: Movable,
    V: Movable,
{
    pub fn new(
        service: Arc<MovableService<V>>,
        association: Arc<dyn ChildAssociation<S, T, U, V>>,
        mapper: impl Mapper<S, T> + 'static,
        parent_validator: MovableValidator<U, MovableService<V>>,
        child_validator: MovableValidator<S, ChildSource<S, T, U, V>>,
    ) -> Self {
        Self {
            service,
            association,
            mapper: Box::new(mapper),
            parent_validator,
            child_validator,
        }
    }

    /// Child with `id`; the outcome carries no data when it does not exist.
    pub async fn get(&self, id: i32) -> Result<Outcome<S>, ServiceError> {
        Ok(match self.association.domain_data(id).await? {
            Some(child) => Outcome::of(self.mapper.map_back(&child)),
            None => Outcome::new(),
        })
    }

    /// Append `child` to `parent`.
    ///
    /// Parent and child violations are reported together. The new child
    /// enters with position `i32::MAX` so it sorts after its siblings.
    pub async fn add(&self, parent: &U, child: &S) -> Result<Outcome<()>, ServiceError> {
        let mut outcome = self
            .parent_validator
            .validate(Some(parent), &[ValidationType::Exists])
            .await?;
        let child_outcome = self
            .child_validator
            .validate(Some(child), &[ValidationType::New, ValidationType::Deep])
            .await?;
        outcome.add_events(child_outcome.into_events());
        if outcome.is_ok() {
            let mut entity = self.mapper.map(child);
            entity.update_position(i32::MAX);
            let aggregate = self.association.for_add(parent, entity).await?;
            self.service.update(aggregate).await?;
            debug!(
                validator = %self.child_validator.name(),
                parent = ?parent.id(),
                "Added child"
            );
        }
        Ok(outcome)
    }

    pub async fn update(&self, child: &S) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .child_validator
            .validate(
                Some(child),
                &[
                    ValidationType::Update,
                    ValidationType::Exists,
                    ValidationType::Deep,
                ],
            )
            .await?;
        if outcome.is_ok() {
            let aggregate = self.association.for_update(child).await?;
            self.service.update(aggregate).await?;
        }
        Ok(outcome)
    }

    pub async fn remove(&self, child: &S) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .child_validator
            .validate(Some(child), &[ValidationType::Exists])
            .await?;
        if outcome.is_ok() {
            let aggregate = self.association.for_remove(child).await?;
            self.service.update(aggregate).await?;
        }
        Ok(outcome)
    }

    pub async fn duplicate(&self, child: &S) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .child_validator
            .validate(Some(child), &[ValidationType::Exists])
            .await?;
        if outcome.is_ok() {
            let aggregate = self.association.for_duplicate(child).await?;
            self.service.update(aggregate).await?;
        }
        Ok(outcome)
    }

    pub async fn move_up(&self, child: &S) -> Result<Outcome<()>, ServiceError> {
        self.move_child(child, Direction::Up).await
    }

    pub async fn move_down(&self, child: &S) -> Result<Outcome<()>, ServiceError> {
        self.move_child(child, Direction::Down).await
    }

    /// Children of `parent` in canonical order.
    pub async fn find(&self, parent: &U) -> Result<Outcome<Vec<S>>, ServiceError> {
        let outcome = self
            .parent_validator
            .validate(Some(parent), &[ValidationType::Exists])
            .await?;
        if !outcome.is_ok() {
            return Ok(outcome.with_data(None));
        }
        let children = self.association.domain_list(parent).await?;
        let mapped = self.mapper.map_back_all(&children);
        Ok(Outcome::of(sorted(&mapped)))
    }

    async fn move_child(&self, child: &S, direction: Direction) -> Result<Outcome<()>, ServiceError> {
        let check = match direction {
            Direction::Up => ValidationType::Up,
            Direction::Down => ValidationType::Down,
        };
        let outcome = self
            .child_validator
            .validate(Some(child), &[ValidationType::Exists, check])
            .await?;
        if outcome.is_ok() {
            let aggregate = self.association.for_move(child, direction).await?;
            self.service.update(aggregate).await?;
        }
        Ok(outcome)
    }
}
