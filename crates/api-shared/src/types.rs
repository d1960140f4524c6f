//! DTOs shared between handlers and gateway clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer identity carried by checkout requests and payment notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// What the customer is buying: a meal plan or a prescription document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    Plan,
    Prescription,
}

impl PurchaseType {
    /// Metadata tag used on the payment processor side.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Prescription => "prescription",
        }
    }

    /// Parse a metadata tag; unknown tags are `None`, not an error, since
    /// webhook payloads are controlled by the payment processor.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "plan" => Some(Self::Plan),
            "prescription" => Some(Self::Prescription),
            _ => None,
        }
    }

    /// Product description shown on the checkout page.
    pub fn product_description(self) -> &'static str {
        match self {
            Self::Plan => "Personalised meal plan with a GLP-1 analogue indication",
            Self::Prescription => "Digital prescription with a signature valid for purchase",
        }
    }
}
