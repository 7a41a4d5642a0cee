use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    #[error("missing or non-string attribute: {0}")]
    MissingField(String),

    #[error("failed to reach webhook: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned HTTP {status}: {body}")]
    Delivery { status: u16, body: String },
}

impl RelayError {
    pub fn decode(what: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            what,
            reason: reason.to_string(),
        }
    }

    /// Whether a host retrying the same event could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Delivery { status, .. } => *status >= 500 || *status == 429,
            Self::Decode { .. } | Self::MissingField(_) => false,
        }
    }
}
