#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("this email is already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("failed to hash password: {0}")]
    PasswordHash(String),
    #[error("store backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
