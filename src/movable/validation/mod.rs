//! Validation of movable entities.

mod outcome;
mod validator;

pub use outcome::{Event, Outcome, Severity, Status};
pub use validator::{
    DeepValidation, MovableSource, MovableValidator, NewPositionRule, NoDeepValidation,
    ValidationType,
};
