//! Stable error codes shared by the HTTP boundary and diagnostics.

/// Maps an error to a stable machine-readable code.
///
/// Every error surfaced through the HTTP boundary implements this so the
/// presentation layer can branch on `code` instead of parsing messages.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// JSON body returned for failed requests.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl ErrorBody {
    #[must_use]
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { code: err.error_code().to_string(), message: err.to_string(), retryable: err.retryable() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("thing {0} missing")]
    struct Missing(u32);

    impl ErrorCode for Missing {
        fn error_code(&self) -> &'static str {
            "E_MISSING"
        }
    }

    #[test]
    fn error_body_carries_code_message_and_default_retryable() {
        let body = ErrorBody::from_error(&Missing(7));
        assert_eq!(body.code, "E_MISSING");
        assert_eq!(body.message, "thing 7 missing");
        assert!(!body.retryable);
    }
}
