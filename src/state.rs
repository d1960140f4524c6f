//! Application state shared across REST API handlers.

use std::sync::Arc;
use vidaleve_core::{CoreConfig, PrescriptionService};
use vidaleve_gateways::{CheckoutClient, EmailClient, WhatsAppClient};
use vidaleve_store::AccountService;

/// Services needed by the REST API endpoints.
///
/// Everything here is cheap to clone: services hold `Arc`s and the gateway
/// clients share a connection pool internally.
#[derive(Clone)]
pub struct AppState {
    pub core_cfg: Arc<CoreConfig>,
    pub prescriptions: PrescriptionService,
    pub accounts: AccountService,
    pub checkout: CheckoutClient,
    pub email: EmailClient,
    pub whatsapp: WhatsAppClient,
}
