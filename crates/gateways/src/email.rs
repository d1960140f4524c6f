//! Transactional email client (Resend).
//!
//! Sends the prescription access link after a confirmed payment. When the API
//! key is absent the feature is disabled: the call is never attempted and the
//! caller gets a `NotConfigured` outcome to log and carry on with.

use crate::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "resend";
const API_URL: &str = "https://api.resend.com/emails";

const DEFAULT_FROM: &str = "VidaLeve <noreply@vidaleve.com>";
const PRESCRIPTION_SUBJECT: &str = "Your VidaLeve digital prescription";

/// Email gateway configuration, resolved at startup.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    /// API key; `None` disables the gateway.
    pub api_key: Option<String>,
    pub from: String,
}

impl EmailConfig {
    pub fn new(api_key: Option<String>, from: Option<String>) -> Self {
        Self {
            api_key,
            from: from.unwrap_or_else(|| DEFAULT_FROM.to_owned()),
        }
    }
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'static str,
    html: String,
}

#[derive(Deserialize)]
struct SendEmailRes {
    id: String,
}

/// Client for the transactional email provider.
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    cfg: EmailConfig,
}

impl EmailClient {
    pub fn new(cfg: EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    /// Send the prescription access email. Returns the provider's message id.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when no API key is set, `Http`/`UpstreamStatus` on
    /// delivery failure. Never retried here.
    pub async fn send_prescription_email(
        &self,
        customer_name: &str,
        customer_email: &str,
        prescription_url: &str,
    ) -> GatewayResult<String> {
        let Some(api_key) = self.cfg.api_key.as_deref() else {
            return Err(GatewayError::NotConfigured("email delivery"));
        };

        let body = SendEmailBody {
            from: &self.cfg.from,
            to: customer_email,
            subject: PRESCRIPTION_SUBJECT,
            html: prescription_email_html(customer_name, prescription_url),
        };

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| GatewayError::Http {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body, "email rejected by provider");
            return Err(GatewayError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let res: SendEmailRes = response
            .json()
            .await
            .map_err(|source| GatewayError::Http {
                service: SERVICE,
                source,
            })?;
        Ok(res.id)
    }
}

/// HTML body for the prescription email.
fn prescription_email_html(customer_name: &str, prescription_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <div style="background: #10b981; color: white; padding: 30px; text-align: center;">
        <h1>VidaLeve</h1>
        <p>Your digital prescription is ready!</p>
      </div>
      <div style="background: #f9f9f9; padding: 30px;">
        <p>Hello, <strong>{customer_name}</strong>!</p>
        <p>Your digital prescription was generated successfully and is ready to use at any pharmacy in Brazil.</p>
        <p><strong>Valid for 30 days &middot; Verified digital signature &middot; Accepted at all pharmacies</strong></p>
        <div style="text-align: center;">
          <a href="{prescription_url}" style="display: inline-block; background: #10b981; color: white; padding: 15px 30px; text-decoration: none;">Access my prescription</a>
        </div>
        <p style="margin-top: 30px;"><strong>Important:</strong> keep this email. You will need to present the prescription at the pharmacy.</p>
      </div>
      <div style="text-align: center; margin-top: 20px; color: #666; font-size: 12px;">
        <p>VidaLeve - Your path to a healthier life</p>
        <p>This is an automated email, please do not reply.</p>
      </div>
    </div>
  </body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_short_circuits() {
        let client = EmailClient::new(EmailConfig::new(None, None));
        let err = client
            .send_prescription_email("Maria", "maria@example.com", "https://x/prescription/RX-1")
            .await
            .expect_err("unconfigured gateway must not attempt the call");
        assert!(err.is_not_configured());
    }

    #[test]
    fn html_embeds_the_name_and_url() {
        let html = prescription_email_html("Maria", "https://x/prescription/RX-1-ABCD");
        assert!(html.contains("Maria"));
        assert!(html.contains("https://x/prescription/RX-1-ABCD"));
    }

    #[test]
    fn default_from_address_is_applied() {
        let cfg = EmailConfig::new(Some("key".into()), None);
        assert_eq!(cfg.from, DEFAULT_FROM);

        let cfg = EmailConfig::new(Some("key".into()), Some("Other <o@x.com>".into()));
        assert_eq!(cfg.from, "Other <o@x.com>");
    }
}
