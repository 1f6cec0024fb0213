//! Service result envelope
//!
//! Every service operation returns a `ServiceResult` instead of raising:
//! expected conditions (missing row, bad input) become variants, and
//! infrastructure errors are converted to `Failure` at the service boundary.

use std::fmt;

/// Classification of a non-success outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation succeeded.
    None,
    /// Caller input was rejected before any statement ran.
    Validation,
    /// The target row does not exist.
    NotFound,
    /// Infrastructure or database failure, message only.
    Failure,
}

/// Outcome of a service operation.
///
/// Modeled as a sum type so that a success carrying an error classification
/// is unrepresentable. Callers branch on `is_success` and use `error_kind`
/// to distinguish client-input problems from infrastructure failures
/// without parsing message text.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResult<T> {
    Success { data: T, message: Option<String> },
    ValidationError(String),
    NotFound(String),
    Failure(String),
}

impl<T> ServiceResult<T> {
    /// Create a successful result.
    pub fn success(data: T) -> Self {
        Self::Success {
            data,
            message: None,
        }
    }

    /// Create a successful result carrying a human-readable message.
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: Some(message.into()),
        }
    }

    /// Reject the call because of bad or missing input.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// The requested row is absent.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Infrastructure failure, not further classified.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Success { .. } => ErrorKind::None,
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Failure(_) => ErrorKind::Failure,
        }
    }

    /// The payload, when successful.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Consume the envelope and take the payload, when successful.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The message: success note or error text.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::ValidationError(m) | Self::NotFound(m) | Self::Failure(m) => Some(m),
        }
    }

    /// Map the payload, preserving message and error classification.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ServiceResult<U> {
        match self {
            Self::Success { data, message } => ServiceResult::Success {
                data: f(data),
                message,
            },
            Self::ValidationError(m) => ServiceResult::ValidationError(m),
            Self::NotFound(m) => ServiceResult::NotFound(m),
            Self::Failure(m) => ServiceResult::Failure(m),
        }
    }

    /// Chain another operation on success.
    pub fn and_then<U, F: FnOnce(T) -> ServiceResult<U>>(self, f: F) -> ServiceResult<U> {
        match self {
            Self::Success { data, .. } => f(data),
            Self::ValidationError(m) => ServiceResult::ValidationError(m),
            Self::NotFound(m) => ServiceResult::NotFound(m),
            Self::Failure(m) => ServiceResult::Failure(m),
        }
    }

    /// Drop the payload, keeping outcome and message.
    pub fn erased(self) -> ServiceResult<()> {
        self.map(|_| ())
    }
}

impl<T> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { message, .. } => {
                write!(f, "{}", message.as_deref().unwrap_or("OK"))
            }
            Self::ValidationError(m) => write!(f, "Validation error: {m}"),
            Self::NotFound(m) => write!(f, "Not found: {m}"),
            Self::Failure(m) => write!(f, "Failure: {m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_data_and_no_error_kind() {
        let result = ServiceResult::success(42);
        assert!(result.is_success());
        assert_eq!(result.error_kind(), ErrorKind::None);
        assert_eq!(result.data(), Some(&42));
        assert_eq!(result.message(), None);
    }

    #[test]
    fn error_variants_carry_no_data() {
        let result: ServiceResult<i32> = ServiceResult::not_found("missing");
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), ErrorKind::NotFound);
        assert_eq!(result.data(), None);
        assert_eq!(result.message(), Some("missing"));
    }

    #[test]
    fn error_kinds_are_distinguishable() {
        let validation: ServiceResult<()> = ServiceResult::validation_error("bad input");
        let not_found: ServiceResult<()> = ServiceResult::not_found("absent");
        let failure: ServiceResult<()> = ServiceResult::failure("db down");
        assert_eq!(validation.error_kind(), ErrorKind::Validation);
        assert_eq!(not_found.error_kind(), ErrorKind::NotFound);
        assert_eq!(failure.error_kind(), ErrorKind::Failure);
    }

    #[test]
    fn map_preserves_outcome() {
        let ok = ServiceResult::success_with_message(2, "created").map(|n| n * 10);
        assert_eq!(ok.data(), Some(&20));
        assert_eq!(ok.message(), Some("created"));

        let err: ServiceResult<i32> = ServiceResult::validation_error("nope");
        let mapped = err.map(|n| n * 10);
        assert_eq!(mapped.error_kind(), ErrorKind::Validation);
    }

    #[test]
    fn and_then_short_circuits_on_error() {
        let err: ServiceResult<i32> = ServiceResult::failure("boom");
        let chained = err.and_then(|n| ServiceResult::success(n + 1));
        assert_eq!(chained.error_kind(), ErrorKind::Failure);
        assert_eq!(chained.message(), Some("boom"));

        let ok = ServiceResult::success(1).and_then(|n| ServiceResult::success(n + 1));
        assert_eq!(ok.data(), Some(&2));
    }
}
