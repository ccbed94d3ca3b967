/// Tagged result of one request/response exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { message: String },
}

impl<T> ApiOutcome<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn map<U, F>(self, f: F) -> ApiOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => ApiOutcome::Success(f(value)),
            Self::Failure { message } => ApiOutcome::Failure { message },
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message } => Some(message),
        }
    }

    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}
