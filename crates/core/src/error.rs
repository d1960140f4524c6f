#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("prescription secret is not configured")]
    SecretNotConfigured,
    #[error("failed to key the verification code")]
    VerificationKey,
    #[error("invalid timestamp")]
    InvalidTimestamp,
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
