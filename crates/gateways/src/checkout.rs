//! Payment checkout client (Kirvano).
//!
//! Creates a hosted checkout session for a plan or prescription purchase and
//! returns the URL the customer is redirected to. The payment processor calls
//! back into `/webhook` once the payment settles.

use crate::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use vidaleve_api_shared::{CustomerDetails, PurchaseType};

const SERVICE: &str = "kirvano";

/// Metadata attached to every checkout, echoed back by the webhook.
const METADATA_SOURCE: &str = "vidaleve";

/// Checkout gateway configuration, resolved at startup.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// API key; `None` disables the gateway.
    pub api_key: Option<String>,
    pub api_url: String,
    /// Public base URL of this application, for success/cancel redirects.
    pub app_url: String,
}

/// A checkout session to redirect the customer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub checkout_id: String,
}

/// What to sell and to whom.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    /// Amount in cents, BRL.
    pub amount_cents: u64,
    pub product_name: String,
    pub customer: CustomerDetails,
    pub purchase: PurchaseType,
}

#[derive(Serialize)]
struct CreateCheckoutBody<'a> {
    amount: u64,
    currency: &'static str,
    product: ProductBody<'a>,
    customer: &'a CustomerDetails,
    metadata: MetadataBody,
    success_url: String,
    cancel_url: String,
}

#[derive(Serialize)]
struct ProductBody<'a> {
    name: &'a str,
    description: &'static str,
}

#[derive(Serialize)]
struct MetadataBody {
    #[serde(rename = "type")]
    purchase_type: &'static str,
    source: &'static str,
}

#[derive(Deserialize)]
struct CreateCheckoutRes {
    id: String,
    checkout_url: Option<String>,
    url: Option<String>,
}

/// Client for the hosted payment checkout.
#[derive(Clone)]
pub struct CheckoutClient {
    http: reqwest::Client,
    cfg: CheckoutConfig,
}

impl CheckoutClient {
    pub fn new(cfg: CheckoutConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    /// Create a checkout session.
    ///
    /// # Errors
    ///
    /// `GatewayError::NotConfigured` when no API key is set; `Http` on
    /// transport failure; `UpstreamStatus` when the processor answers with a
    /// non-success status.
    pub async fn create_checkout(&self, req: &CheckoutRequest) -> GatewayResult<CheckoutSession> {
        let Some(api_key) = self.cfg.api_key.as_deref() else {
            return Err(GatewayError::NotConfigured("payment checkout"));
        };

        let tag = req.purchase.tag();
        let body = CreateCheckoutBody {
            amount: req.amount_cents,
            currency: "BRL",
            product: ProductBody {
                name: &req.product_name,
                description: req.purchase.product_description(),
            },
            customer: &req.customer,
            metadata: MetadataBody {
                purchase_type: tag,
                source: METADATA_SOURCE,
            },
            success_url: format!("{}/checkout/success?type={tag}", self.cfg.app_url),
            cancel_url: format!("{}/checkout/cancel", self.cfg.app_url),
        };

        let response = self
            .http
            .post(format!("{}/checkouts", self.cfg.api_url))
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
            tracing::error!(%status, body, "checkout creation rejected by payment processor");
            return Err(GatewayError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let res: CreateCheckoutRes =
            response
                .json()
                .await
                .map_err(|source| GatewayError::Http {
                    service: SERVICE,
                    source,
                })?;

        let checkout_url = res
            .checkout_url
            .or(res.url)
            .ok_or(GatewayError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body: "response carried no checkout URL".into(),
            })?;

        Ok(CheckoutSession {
            checkout_url,
            checkout_id: res.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            amount_cents: 19900,
            product_name: "Digital prescription".into(),
            customer: CustomerDetails {
                name: "Maria Silva".into(),
                email: "maria@example.com".into(),
                phone: "11999990000".into(),
            },
            purchase: PurchaseType::Prescription,
        }
    }

    #[tokio::test]
    async fn missing_api_key_short_circuits() {
        let client = CheckoutClient::new(CheckoutConfig {
            api_key: None,
            api_url: "https://api.kirvano.com/v1".into(),
            app_url: "https://vidaleve.com".into(),
        });

        let err = client
            .create_checkout(&request())
            .await
            .expect_err("unconfigured gateway must not attempt the call");
        assert!(err.is_not_configured());
    }

    #[test]
    fn body_serialises_the_metadata_tag() {
        let body = CreateCheckoutBody {
            amount: 19900,
            currency: "BRL",
            product: ProductBody {
                name: "Digital prescription",
                description: PurchaseType::Prescription.product_description(),
            },
            customer: &request().customer,
            metadata: MetadataBody {
                purchase_type: "prescription",
                source: METADATA_SOURCE,
            },
            success_url: "https://vidaleve.com/checkout/success?type=prescription".into(),
            cancel_url: "https://vidaleve.com/checkout/cancel".into(),
        };

        let json = serde_json::to_value(&body).expect("body should serialise");
        assert_eq!(json["metadata"]["type"], "prescription");
        assert_eq!(json["metadata"]["source"], "vidaleve");
        assert_eq!(json["currency"], "BRL");
        assert_eq!(json["customer"]["email"], "maria@example.com");
    }
}
