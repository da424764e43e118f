use reqwest::StatusCode;
use thiserror::Error;

pub type IamportResult<T> = Result<T, IamportError>;

/// Errors returned by the Iamport client.
///
/// Nothing is retried internally; every variant is handed straight back to
/// the caller and none of them poison the client.
#[derive(Debug, Error)]
pub enum IamportError {
    #[error("iamport: APIKey is missing")]
    MissingApiKey,

    #[error("iamport: APISecret is missing")]
    MissingApiSecret,

    #[error("iamport: configuration error: {message}")]
    Configuration { message: String },

    #[error("iamport: unauthorized")]
    Unauthorized,

    /// HTTP 404 on an id-scoped lookup. `what` names the identifier.
    #[error("iamport: invalid {what}")]
    NotFound { what: &'static str },

    #[error("iamport: unknown error (HTTP {status})")]
    Remote { status: StatusCode },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("iamport: invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("iamport: invalid response: token expiry {0} is out of range")]
    InvalidExpiry(i64),

    /// The envelope decoded but carried a non-zero `code`.
    #[error("iamport: {message}")]
    Api { code: i64, message: String },
}

impl IamportError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn api_error(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::MissingApiSecret | Self::Configuration { .. }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<config::ConfigError> for IamportError {
    fn from(err: config::ConfigError) -> Self {
        IamportError::config_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_gateway_wording() {
        assert_eq!(IamportError::Unauthorized.to_string(), "iamport: unauthorized");
        assert_eq!(
            IamportError::NotFound { what: "imp_uid" }.to_string(),
            "iamport: invalid imp_uid"
        );
        assert_eq!(IamportError::api_error(1, "boom").to_string(), "iamport: boom");
        assert_eq!(
            IamportError::Remote {
                status: StatusCode::BAD_GATEWAY
            }
            .to_string(),
            "iamport: unknown error (HTTP 502 Bad Gateway)"
        );
    }

    #[test]
    fn test_classification_helpers() {
        assert!(IamportError::MissingApiKey.is_configuration());
        assert!(IamportError::config_error("bad timeout").is_configuration());
        assert!(!IamportError::Unauthorized.is_configuration());
        assert!(IamportError::Unauthorized.is_unauthorized());
        assert!(IamportError::NotFound { what: "merchant_uid" }.is_not_found());
        assert!(!IamportError::api_error(-1, "nope").is_not_found());
    }
}
