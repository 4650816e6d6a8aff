//! Facade for top-level movable collections.

use std::sync::Arc;

use tracing::debug;

use super::mapper::Mapper;
use crate::movable::core::entity::Movable;
use crate::movable::core::error::ServiceError;
use crate::movable::service::MovableService;
use crate::movable::validation::{MovableValidator, Outcome, ValidationType};

/// Validated operations over a collection the service stores directly.
///
/// Business rule violations come back as events on the returned
/// [`Outcome`] and leave storage untouched. `Err` means storage itself
/// failed.
pub struct ParentFacade<D, E: Movable> {
    service: Arc<MovableService<E>>,
    mapper: Box<dyn Mapper<D, E>>,
    validator: MovableValidator<D, MovableService<E>>,
}

impl<D, E> ParentFacade<D, E>
where
    D: Movable,
    E: Movable,
{
    pub fn new(
        service: Arc<MovableService<E>>,
        mapper: impl Mapper<D, E> + 'static,
        validator: MovableValidator<D, MovableService<E>>,
    ) -> Self {
        Self {
            service,
            mapper: Box::new(mapper),
            validator,
        }
    }

    /// Every item in canonical order.
    pub async fn get_all(&self) -> Result<Outcome<Vec<D>>, ServiceError> {
        let items = self.service.list_all().await?;
        Ok(Outcome::of(self.mapper.map_back_all(&items)))
    }

    /// Drop the whole collection.
    pub async fn new_data(&self) -> Result<Outcome<()>, ServiceError> {
        self.service.reset().await?;
        Ok(Outcome::new())
    }

    /// Item with `id`; the outcome carries no data when it does not exist.
    pub async fn get(&self, id: i32) -> Result<Outcome<D>, ServiceError> {
        Ok(match self.service.get(Some(id)).await? {
            Some(item) => Outcome::of(self.mapper.map_back(&item)),
            None => Outcome::new(),
        })
    }

    pub async fn add(&self, data: &D) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .validator
            .validate(Some(data), &[ValidationType::New, ValidationType::Deep])
            .await?;
        if outcome.is_ok() {
            let created = self.service.create(self.mapper.map(data)).await?;
            debug!(validator = %self.validator.name(), id = ?created.id(), "Added item");
        }
        Ok(outcome)
    }

    pub async fn update(&self, data: &D) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .validator
            .validate(
                Some(data),
                &[
                    ValidationType::Update,
                    ValidationType::Exists,
                    ValidationType::Deep,
                ],
            )
            .await?;
        if outcome.is_ok() {
            self.service.update(self.mapper.map(data)).await?;
        }
        Ok(outcome)
    }

    pub async fn remove(&self, data: &D) -> Result<Outcome<()>, ServiceError> {
        let outcome = self.validator.validate(Some(data), &[ValidationType::Exists]).await?;
        if outcome.is_ok() {
            let stored = self.stored(data).await?;
            self.service.delete(&stored).await?;
        }
        Ok(outcome)
    }

    pub async fn duplicate(&self, data: &D) -> Result<Outcome<()>, ServiceError> {
        let outcome = self.validator.validate(Some(data), &[ValidationType::Exists]).await?;
        if outcome.is_ok() {
            let stored = self.stored(data).await?;
            self.service.duplicate(&stored).await?;
        }
        Ok(outcome)
    }

    pub async fn move_up(&self, data: &D) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .validator
            .validate(Some(data), &[ValidationType::Exists, ValidationType::Up])
            .await?;
        if outcome.is_ok() {
            let stored = self.stored(data).await?;
            self.service.move_up(&stored).await?;
        }
        Ok(outcome)
    }

    pub async fn move_down(&self, data: &D) -> Result<Outcome<()>, ServiceError> {
        let outcome = self
            .validator
            .validate(Some(data), &[ValidationType::Exists, ValidationType::Down])
            .await?;
        if outcome.is_ok() {
            let stored = self.stored(data).await?;
            self.service.move_down(&stored).await?;
        }
        Ok(outcome)
    }

    /// Renumber positions to `0..n` in canonical order.
    pub async fn update_positions(&self) -> Result<Outcome<()>, ServiceError> {
        self.service.renumber_positions().await?;
        Ok(Outcome::new())
    }

    /// Stored entity behind `data`; caller-supplied fields are ignored.
    async fn stored(&self, data: &D) -> Result<E, ServiceError> {
        let id = data.id().ok_or(ServiceError::NullArgument("id"))?;
        self.service
            .get(Some(id))
            .await?
            .ok_or(ServiceError::NotInCollection(id))
    }
}
