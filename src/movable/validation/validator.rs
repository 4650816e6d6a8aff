//! Rule checks for movable entities.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::outcome::{Event, Outcome};
use crate::movable::core::entity::{index_of, Identifiable, Movable};
use crate::movable::core::error::{Direction, ServiceError};
use crate::movable::service::MovableService;

/// Checks a validator can run against an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationType {
    /// Entity is about to be created
    New,
    /// Entity is about to be updated
    Update,
    /// Entity must be stored
    Exists,
    /// Entity-specific rules
    Deep,
    /// Entity must have a predecessor
    Up,
    /// Entity must have a successor
    Down,
}

/// How `ValidationType::New` treats a position on a new entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewPositionRule {
    /// A new entity must not carry a position
    #[default]
    MustBeAbsent,
    /// Any position on a new entity is accepted (the service overwrites it)
    Ignored,
}

/// Where a validator looks up stored entities.
///
/// Implemented for [`MovableService`]; child collections stored inside a
/// parent aggregate implement it to search the parent instead.
#[async_trait]
pub trait MovableSource<T>: Send + Sync {
    /// Stored counterpart type
    type Item: Movable;

    /// Stored counterpart of `data`, if any
    async fn find(&self, data: &T) -> Result<Option<Self::Item>, ServiceError>;

    /// Collection `data` belongs to, in canonical order
    async fn list(&self, data: &T) -> Result<Vec<Self::Item>, ServiceError>;
}

#[async_trait]
impl<T: Movable, U: Movable> MovableSource<T> for MovableService<U> {
    type Item = U;

    async fn find(&self, data: &T) -> Result<Option<U>, ServiceError> {
        self.get(data.id()).await
    }

    async fn list(&self, _data: &T) -> Result<Vec<U>, ServiceError> {
        self.list_all().await
    }
}

/// Entity-specific checks run for `ValidationType::Deep`.
pub trait DeepValidation<T>: Send + Sync {
    /// Add events for entity-specific violations found in `data`.
    fn validate_deep(&self, data: &T, outcome: &mut Outcome<()>);
}

impl<T, F> DeepValidation<T> for F
where
    F: Fn(&T, &mut Outcome<()>) + Send + Sync,
{
    fn validate_deep(&self, data: &T, outcome: &mut Outcome<()>) {
        self(data, outcome);
    }
}

/// Deep validation that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeepValidation;

impl<T> DeepValidation<T> for NoDeepValidation {
    fn validate_deep(&self, _data: &T, _outcome: &mut Outcome<()>) {}
}

/// Validator for one entity type.
///
/// Event keys are prefixed with the upper-cased entity name, e.g. a
/// validator named `Item` reports `ITEM_NOT_EXIST`.
pub struct MovableValidator<T, S> {
    name: String,
    prefix: String,
    source: Arc<S>,
    deep: Box<dyn DeepValidation<T>>,
    new_position_rule: NewPositionRule,
}

impl<T, S> MovableValidator<T, S>
where
    T: Movable,
    S: MovableSource<T>,
{
    pub fn new(name: impl Into<String>, source: Arc<S>) -> Self {
        let name = name.into();
        Self {
            prefix: name.to_uppercase(),
            name,
            source,
            deep: Box::new(NoDeepValidation),
            new_position_rule: NewPositionRule::default(),
        }
    }

    /// Use `deep` for `ValidationType::Deep`
    #[must_use]
    pub fn with_deep(mut self, deep: impl DeepValidation<T> + 'static) -> Self {
        self.deep = Box::new(deep);
        self
    }

    #[must_use]
    pub fn with_new_position_rule(mut self, rule: NewPositionRule) -> Self {
        self.new_position_rule = rule;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix of every event key
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run the requested checks against `data`.
    ///
    /// Checks run in a fixed order (new, update, exists, deep, up, down)
    /// whatever order they are requested in, and every violation is
    /// collected. A missing entity is reported alone. `Err` is only returned
    /// when a lookup fails in storage.
    pub async fn validate(
        &self,
        data: Option<&T>,
        validation_types: &[ValidationType],
    ) -> Result<Outcome<()>, ServiceError> {
        let Some(data) = data else {
            return Ok(Outcome::error(
                format!("{}_NULL", self.prefix),
                format!("{} mustn't be null.", self.name),
            ));
        };
        let mut outcome = Outcome::new();
        if validation_types.contains(&ValidationType::New) {
            self.validate_new(data, &mut outcome);
        }
        if validation_types.contains(&ValidationType::Update) {
            self.validate_update(data, &mut outcome);
        }
        if validation_types.contains(&ValidationType::Exists) {
            self.validate_exists(data, &mut outcome).await?;
        }
        if validation_types.contains(&ValidationType::Deep) {
            self.deep.validate_deep(data, &mut outcome);
        }
        if validation_types.contains(&ValidationType::Up) {
            self.validate_move(data, &mut outcome, Direction::Up).await?;
        }
        if validation_types.contains(&ValidationType::Down) {
            self.validate_move(data, &mut outcome, Direction::Down).await?;
        }
        debug!(
            validator = %self.name,
            id = ?data.id(),
            events = outcome.events().len(),
            "Validated entity"
        );
        Ok(outcome)
    }

    fn validate_new(&self, data: &T, outcome: &mut Outcome<()>) {
        if data.id().is_some() {
            outcome.add_event(self.event("ID_NOT_NULL", "ID must be null."));
        }
        if self.new_position_rule == NewPositionRule::MustBeAbsent && data.position().is_some() {
            outcome.add_event(self.event("POSITION_NOT_NULL", "Position must be null."));
        }
    }

    fn validate_update(&self, data: &T, outcome: &mut Outcome<()>) {
        if data.position().is_none() {
            outcome.add_event(self.event("POSITION_NULL", "Position mustn't be null."));
        }
    }

    async fn validate_exists(&self, data: &T, outcome: &mut Outcome<()>) -> Result<(), ServiceError> {
        if data.id().is_none() {
            outcome.add_event(self.event("ID_NULL", "ID mustn't be null."));
        } else if self.source.find(data).await?.is_none() {
            outcome.add_event(self.event("NOT_EXIST", &format!("{} doesn't exist.", self.name)));
        }
        Ok(())
    }

    /// Missing IDs and missing entities are left to the exists check.
    async fn validate_move(
        &self,
        data: &T,
        outcome: &mut Outcome<()>,
        direction: Direction,
    ) -> Result<(), ServiceError> {
        if data.id().is_none() {
            return Ok(());
        }
        let Some(stored) = self.source.find(data).await? else {
            return Ok(());
        };
        let list = self.source.list(data).await?;
        let index = stored.id().and_then(|id| index_of(&list, id));
        let movable = match (direction, index) {
            (_, None) => false,
            (Direction::Up, Some(index)) => index > 0,
            (Direction::Down, Some(index)) => index.saturating_add(1) < list.len(),
        };
        if !movable {
            let message = format!("{} can't be moved {direction}.", self.name);
            outcome.add_event(self.event("NOT_MOVABLE", &message));
        }
        Ok(())
    }

    fn event(&self, suffix: &str, message: &str) -> Event {
        Event::error(format!("{}_{suffix}", self.prefix), message)
    }
}
