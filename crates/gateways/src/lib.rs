//! # VidaLeve Gateways
//!
//! Outbound HTTP clients for the external collaborators:
//! - payment checkout (Kirvano)
//! - transactional email (Resend)
//! - WhatsApp messaging (Twilio)
//!
//! Each collaborator owns its own availability and retry semantics; these
//! clients make exactly one attempt per call. Credentials are resolved once
//! at startup; a client built without credentials short-circuits with
//! [`GatewayError::NotConfigured`] instead of attempting the call.

pub mod checkout;
pub mod email;
pub mod error;
pub mod whatsapp;

pub use checkout::{CheckoutClient, CheckoutConfig, CheckoutRequest, CheckoutSession};
pub use email::{EmailClient, EmailConfig};
pub use error::{GatewayError, GatewayResult};
pub use whatsapp::{WhatsAppClient, WhatsAppConfig};
