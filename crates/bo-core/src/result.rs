//! Result type aliases and the service result pattern
//!
//! Mutating operations report success or a structured failure rather than
//! panicking; multi-step operations (sagas) additionally carry a per-step
//! outcome trail so partial completion is observable.

use serde::Serialize;

use crate::error::{CoreError, ValidationErrors};

/// Standard Result type for backoffice operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Outcome of one step of a multi-step (non-transactional) operation.
///
/// A failed saga reports "step N failed, step N-1 succeeded" through these
/// entries instead of pretending the whole sequence rolled back.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub success: bool,
    pub detail: Option<String>,
}

impl StepOutcome {
    pub fn ok(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            success: true,
            detail: None,
        }
    }

    pub fn failed(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            success: false,
            detail: Some(detail.into()),
        }
    }
}

/// Service result pattern
///
/// Every service returns one of these: a success carrying the produced value,
/// or a failure carrying field-keyed validation errors. Saga services append
/// a [`StepOutcome`] per store write.
#[derive(Debug)]
pub struct ServiceResult<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// The result value (if successful)
    pub result: Option<T>,
    /// Errors (if failed)
    pub errors: ValidationErrors,
    /// Step trail for multi-step operations
    pub steps: Vec<StepOutcome>,
}

impl<T> ServiceResult<T> {
    /// Create a successful result
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            steps: vec![],
        }
    }

    /// Create a failed result with errors
    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            steps: vec![],
        }
    }

    /// Create a failed result with a single error message
    pub fn failure_with_message(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Borrow the result value, if any
    pub fn value(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Consume the result, yielding the value of a successful operation
    pub fn into_value(self) -> Option<T> {
        self.result
    }

    /// Append a step outcome to the trail
    pub fn with_step(mut self, step: StepOutcome) -> Self {
        self.steps.push(step);
        self
    }

    pub fn record_step(&mut self, step: StepOutcome) {
        self.steps.push(step);
    }

    /// Map the result value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ServiceResult<U> {
        ServiceResult {
            success: self.success,
            result: self.result.map(f),
            errors: self.errors,
            steps: self.steps,
        }
    }

    /// Convert to a standard Result
    pub fn into_result(self) -> CoreResult<T> {
        if self.success {
            self.result.ok_or_else(|| {
                CoreError::Internal("ServiceResult success but no result value".into())
            })
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

impl<T> From<CoreResult<T>> for ServiceResult<T> {
    fn from(result: CoreResult<T>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(CoreError::Validation(errors)) => ServiceResult::failure(errors),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}
