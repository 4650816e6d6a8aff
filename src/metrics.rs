use std::time::Instant;
use tracing::debug;

/// A timer that logs how long a service operation took when dropped.
///
/// # Example
///
/// ```ignore
/// pub async fn renumber_positions(&self) -> Result<(), ServiceError> {
///     let _timer = OperationTimer::new("renumber_positions", &self.key);
///     // ... implementation ...
/// }
/// ```
pub struct OperationTimer {
    name: &'static str,
    collection: String,
    start: Instant,
}

impl OperationTimer {
    /// Create a new timer for an operation on the given collection.
    #[must_use]
    pub fn new(name: &'static str, collection: &str) -> Self {
        Self {
            name,
            collection: collection.to_string(),
            start: Instant::now(),
        }
    }

    /// Name of the timed operation
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = %self.name,
            collection = %self.collection,
            duration_us = %duration.as_micros(),
            "Operation completed"
        );
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod metrics_tests;
