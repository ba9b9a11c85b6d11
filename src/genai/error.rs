use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key is missing")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {status} - {message}")]
    Remote { status: u16, message: String },

    #[error("Failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GenerationError {
    /// Whether the provider asked us to slow down
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GenerationError::Remote { status, message } => {
                *status == 429 || message.contains("RESOURCE_EXHAUSTED")
            }
            GenerationError::Http(err) => {
                err.status().map_or(false, |s| s.as_u16() == 429)
            }
            _ => false,
        }
    }

    /// Whether the credential is missing or was rejected
    pub fn is_credential_error(&self) -> bool {
        match self {
            GenerationError::MissingCredential => true,
            GenerationError::Remote { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: u16, message: &str) -> GenerationError {
        GenerationError::Remote {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(remote(429, "Too many requests").is_rate_limited());
        assert!(remote(503, "RESOURCE_EXHAUSTED: quota").is_rate_limited());
        assert!(!remote(500, "internal").is_rate_limited());
        assert!(!GenerationError::MissingCredential.is_rate_limited());
    }

    #[test]
    fn test_credential_detection() {
        assert!(GenerationError::MissingCredential.is_credential_error());
        assert!(remote(401, "bad key").is_credential_error());
        assert!(remote(403, "forbidden").is_credential_error());
        assert!(!remote(429, "slow down").is_credential_error());
    }
}
