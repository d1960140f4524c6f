//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core
//! services, so request handling never reads process-wide environment
//! variables. This keeps behaviour consistent across multi-threaded runtimes
//! and test harnesses.

use crate::{CoreError, CoreResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    app_url: String,
    prescription_secret: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SecretNotConfigured` when the prescription secret
    /// is empty. There is deliberately no hard-coded fallback secret: a
    /// deployment without one cannot issue verifiable documents and must fail
    /// at startup rather than sign with a well-known key.
    pub fn new(app_url: String, prescription_secret: String) -> CoreResult<Self> {
        if prescription_secret.trim().is_empty() {
            return Err(CoreError::SecretNotConfigured);
        }
        if app_url.trim().is_empty() {
            return Err(CoreError::InvalidInput("app_url cannot be empty".into()));
        }

        Ok(Self {
            app_url: app_url.trim_end_matches('/').to_owned(),
            prescription_secret,
        })
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn prescription_secret(&self) -> &str {
        &self.prescription_secret
    }

    /// Public access URL for a prescription document.
    pub fn prescription_url(&self, prescription_id: &str) -> String {
        format!("{}/prescription/{}", self.app_url, prescription_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_secret() {
        let err = CoreConfig::new("https://vidaleve.com".into(), "  ".into())
            .expect_err("blank secret should be rejected");
        assert!(matches!(err, CoreError::SecretNotConfigured));
    }

    #[test]
    fn rejects_blank_app_url() {
        let err = CoreConfig::new("".into(), "secret".into())
            .expect_err("blank app_url should be rejected");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn prescription_url_strips_trailing_slash() {
        let cfg = CoreConfig::new("https://vidaleve.com/".into(), "secret".into())
            .expect("config should build");
        assert_eq!(
            cfg.prescription_url("RX-1-ABCD"),
            "https://vidaleve.com/prescription/RX-1-ABCD"
        );
    }
}
