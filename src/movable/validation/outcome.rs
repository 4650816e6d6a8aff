//! Result model carrying accumulated validation events.

use serde::{Deserialize, Serialize};

/// Severity of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Overall status of an outcome, derived from its worst event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warn,
    Error,
}

/// A structured message attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `ITEM_NOT_EXIST`
    pub key: String,
    pub message: String,
}

impl Event {
    #[must_use]
    pub fn new(severity: Severity, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an error-level event
    #[must_use]
    pub fn error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, key, message)
    }
}

/// Data plus every event collected while producing it.
///
/// Business rule failures are reported here instead of as `Err`, so several
/// independent checks can run and report together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl<T> Outcome<T> {
    /// An OK outcome with no data
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: None,
            events: Vec::new(),
        }
    }

    /// An OK outcome carrying `data`
    #[must_use]
    pub fn of(data: T) -> Self {
        Self {
            data: Some(data),
            events: Vec::new(),
        }
    }

    /// A failed outcome with a single error event
    #[must_use]
    pub fn error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            data: None,
            events: vec![Event::error(key, message)],
        }
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn add_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the outcome, keeping only its events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Status of the worst event; OK when there are none.
    #[must_use]
    pub fn status(&self) -> Status {
        match self.events.iter().map(|event| event.severity).max() {
            Some(Severity::Error) => Status::Error,
            Some(Severity::Warn) => Status::Warn,
            Some(Severity::Info) | None => Status::Ok,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status() == Status::Ok
    }

    /// Carry this outcome's events over to an outcome of another type.
    #[must_use]
    pub fn with_data<U>(self, data: Option<U>) -> Outcome<U> {
        Outcome {
            data,
            events: self.events,
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
