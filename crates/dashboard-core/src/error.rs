use serde_json::Value;
use thiserror::Error;

/// Body attached to a failed response: parsed JSON when possible, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ErrorBody::Json(v) => Some(v),
            ErrorBody::Text(_) => None,
        }
    }
}

/// Uniform error produced by the transport for every failed call.
///
/// `status` is 0 when no response reached the client (offline, refused,
/// timed out); otherwise it is the HTTP status code.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("API error {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub body: Option<ErrorBody>,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure classes the rest of the client reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response: offline, connection refused, DNS, timeout.
    Network,
    NotFound,
    NotImplemented,
    /// 422 from request validation.
    Validation,
    /// Any other non-success status, or an undecodable success body.
    Http,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    pub fn with_body(mut self, body: ErrorBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            0 => ErrorKind::Network,
            404 => ErrorKind::NotFound,
            501 => ErrorKind::NotImplemented,
            422 => ErrorKind::Validation,
            _ => ErrorKind::Http,
        }
    }

    /// Endpoint missing, not implemented, or unreachable.
    pub fn is_recoverable_miss(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Network | ErrorKind::NotFound | ErrorKind::NotImplemented
        )
    }
}

/// Result of a backend call after classification.
#[derive(Debug)]
pub enum CallOutcome<T> {
    Success(T),
    /// The route is absent or unreachable; callers with a fallback may substitute data.
    RecoverableMiss(ApiError),
    HardFailure(ApiError),
}

impl<T> CallOutcome<T> {
    pub fn classify(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => CallOutcome::Success(value),
            Err(err) if err.is_recoverable_miss() => CallOutcome::RecoverableMiss(err),
            Err(err) => CallOutcome::HardFailure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ApiError::network("offline").kind(), ErrorKind::Network);
        assert_eq!(ApiError::new(404, "x").kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::new(501, "x").kind(), ErrorKind::NotImplemented);
        assert_eq!(ApiError::new(422, "x").kind(), ErrorKind::Validation);
        assert_eq!(ApiError::new(500, "x").kind(), ErrorKind::Http);
        assert_eq!(ApiError::new(400, "x").kind(), ErrorKind::Http);
    }

    #[test]
    fn test_classify_matrix() {
        for status in [0u16, 404, 501] {
            let outcome = CallOutcome::<()>::classify(Err(ApiError::new(status, "miss")));
            assert!(matches!(outcome, CallOutcome::RecoverableMiss(_)), "status {status}");
        }
        for status in [400u16, 422, 500, 503] {
            let outcome = CallOutcome::<()>::classify(Err(ApiError::new(status, "hard")));
            assert!(matches!(outcome, CallOutcome::HardFailure(_)), "status {status}");
        }
        assert!(matches!(CallOutcome::classify(Ok(7)), CallOutcome::Success(7)));
    }
}
