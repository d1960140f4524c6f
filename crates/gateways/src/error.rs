#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Required credentials are absent; the feature is disabled and the call
    /// was never attempted.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned status {status}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        body: String,
    },
}

impl GatewayError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
