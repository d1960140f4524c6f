//! WhatsApp messaging client (Twilio).
//!
//! Sends the prescription access link over WhatsApp. Phone numbers are
//! normalised to an international form before sending: numbers already
//! carrying a `+` prefix pass through, everything else is stripped to digits
//! and given the configured country prefix.

use crate::{GatewayError, GatewayResult};
use serde::Deserialize;

const SERVICE: &str = "twilio";

const DEFAULT_FROM_NUMBER: &str = "whatsapp:+14155238886";
const DEFAULT_COUNTRY_PREFIX: &str = "+55";

/// WhatsApp gateway configuration, resolved at startup.
#[derive(Clone, Debug)]
pub struct WhatsAppConfig {
    /// Account SID; `None` disables the gateway.
    pub account_sid: Option<String>,
    /// Auth token; `None` disables the gateway.
    pub auth_token: Option<String>,
    /// Sender, in `whatsapp:+<number>` form.
    pub from_number: String,
    /// Country prefix applied to bare local numbers.
    pub country_prefix: String,
}

impl WhatsAppConfig {
    pub fn new(
        account_sid: Option<String>,
        auth_token: Option<String>,
        from_number: Option<String>,
        country_prefix: Option<String>,
    ) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number: from_number.unwrap_or_else(|| DEFAULT_FROM_NUMBER.to_owned()),
            country_prefix: country_prefix.unwrap_or_else(|| DEFAULT_COUNTRY_PREFIX.to_owned()),
        }
    }
}

#[derive(Deserialize)]
struct SendMessageRes {
    sid: String,
}

/// Client for the WhatsApp messaging provider.
#[derive(Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    cfg: WhatsAppConfig,
}

impl WhatsAppClient {
    pub fn new(cfg: WhatsAppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    /// Send the prescription access message. Returns the provider's message sid.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when credentials are absent, `Http`/`UpstreamStatus` on
    /// delivery failure. Never retried here.
    pub async fn send_prescription_message(
        &self,
        customer_name: &str,
        customer_phone: &str,
        prescription_url: &str,
    ) -> GatewayResult<String> {
        let (Some(account_sid), Some(auth_token)) =
            (self.cfg.account_sid.as_deref(), self.cfg.auth_token.as_deref())
        else {
            return Err(GatewayError::NotConfigured("WhatsApp delivery"));
        };

        let to = normalize_whatsapp_number(customer_phone, &self.cfg.country_prefix);
        let body = prescription_message_body(customer_name, prescription_url);
        let form = [
            ("From", self.cfg.from_number.as_str()),
            ("To", to.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .http
            .post(format!(
                "https://api.twilio.com/2010-04-01/Accounts/{account_sid}/Messages.json"
            ))
            .basic_auth(account_sid, Some(auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|source| GatewayError::Http {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body, "WhatsApp message rejected by provider");
            return Err(GatewayError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let res: SendMessageRes = response
            .json()
            .await
            .map_err(|source| GatewayError::Http {
                service: SERVICE,
                source,
            })?;
        Ok(res.sid)
    }
}

/// Normalise a phone number into `whatsapp:+<digits>` form.
///
/// Numbers already starting with `+` are trusted as international; everything
/// else is reduced to its digits and prefixed with the country code.
fn normalize_whatsapp_number(phone: &str, country_prefix: &str) -> String {
    if phone.starts_with('+') {
        return format!("whatsapp:{phone}");
    }
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("whatsapp:{country_prefix}{digits}")
}

fn prescription_message_body(customer_name: &str, prescription_url: &str) -> String {
    format!(
        "*VidaLeve - Digital Prescription*\n\n\
         Hello, {customer_name}!\n\n\
         Your digital prescription was generated successfully!\n\n\
         Access your prescription here:\n{prescription_url}\n\n\
         Valid for 30 days\nAccepted at all pharmacies\nVerified digital signature\n\n\
         *Important:* keep this link to present at the pharmacy.\n\n\
         _VidaLeve - Your path to a healthier life_"
    )
}
