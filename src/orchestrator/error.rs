use thiserror::Error;

use crate::genai::GenerationError;

/// Why a topic fetch ended without content, worded for the student
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to generate content. Please check your API key ({0}).")]
    Configuration(String),

    #[error("Failed to generate content. The AI may be experiencing high demand (429 Rate Limit). Please wait a moment and try again.")]
    RateLimited { attempts: u32 },

    #[error("No content was generated for this topic. Please try again.")]
    EmptyContent,

    #[error("Failed to generate content: {0}")]
    Transport(String),

    #[error("Request was superseded by a newer selection")]
    Stale,
}

impl FetchError {
    /// Map a client error onto the user-facing classification.
    ///
    /// Rate limits come back with `attempts: 1`; the retry loop fills in the
    /// real count.
    pub fn classify(err: &GenerationError) -> Self {
        if err.is_credential_error() {
            FetchError::Configuration(err.to_string())
        } else if err.is_rate_limited() {
            FetchError::RateLimited { attempts: 1 }
        } else {
            FetchError::Transport(err.to_string())
        }
    }

    /// Whether the error should reach the views
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, FetchError::Stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let limited = GenerationError::Remote {
            status: 429,
            message: "RESOURCE_EXHAUSTED: quota".to_string(),
        };
        assert_eq!(FetchError::classify(&limited), FetchError::RateLimited { attempts: 1 });

        let rejected = GenerationError::Remote {
            status: 403,
            message: "PERMISSION_DENIED".to_string(),
        };
        assert!(matches!(FetchError::classify(&rejected), FetchError::Configuration(_)));
        assert!(matches!(
            FetchError::classify(&GenerationError::MissingCredential),
            FetchError::Configuration(_)
        ));

        let server = GenerationError::Remote {
            status: 500,
            message: "INTERNAL".to_string(),
        };
        assert!(matches!(FetchError::classify(&server), FetchError::Transport(_)));
    }

    #[test]
    fn test_rate_limit_message() {
        let message = FetchError::RateLimited { attempts: 4 }.to_string();
        assert!(message.contains("high demand (429 Rate Limit)"));
        assert!(!FetchError::Stale.is_user_visible());
        assert!(FetchError::EmptyContent.is_user_visible());
    }
}
