pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("HTTP request failed: {context}")]
    Http {
        #[source]
        source: reqwest::Error,
        context: String,
    },
    #[error("malformed JSON: {context}")]
    Json {
        #[source]
        source: serde_json::Error,
        context: String,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn http(source: reqwest::Error, context: impl Into<String>) -> Self {
        Self::Http {
            source,
            context: context.into(),
        }
    }

    pub fn json(source: serde_json::Error, context: impl Into<String>) -> Self {
        Self::Json {
            source,
            context: context.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn io_error_keeps_context_in_message() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::io_with_context(source, "failed to read preferences");
        assert!(matches!(err, AppError::Io { .. }));
        assert_eq!(err.to_string(), "I/O error: failed to read preferences");
    }

    #[test]
    fn json_error_wraps_serde_source() {
        let source = serde_json::from_str::<Vec<String>>("{").expect_err("input is malformed");
        let err = AppError::json(source, "wallpaper feed");
        assert_eq!(err.to_string(), "malformed JSON: wallpaper feed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
