use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidaleve_core::{CoreConfig, PrescriptionService};
use vidaleve_gateways::{
    CheckoutClient, CheckoutConfig, EmailClient, EmailConfig, WhatsAppClient, WhatsAppConfig,
};
use vidaleve_store::{AccountService, InMemoryRepository};

mod routes;
mod state;

use state::AppState;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_APP_URL: &str = "http://localhost:3000";
const DEFAULT_KIRVANO_API_URL: &str = "https://api.kirvano.com/v1";

/// Main entry point for the VidaLeve application.
///
/// Starts the REST server. All environment variables are read here, once,
/// and carried into the handlers through `AppState`.
///
/// # Environment Variables
/// - `VIDALEVE_ADDR`: server address (default: "0.0.0.0:3000")
/// - `APP_URL`: public base URL used in prescription and redirect links
/// - `PRESCRIPTION_SECRET`: key for verification codes (required)
/// - `KIRVANO_API_KEY` / `KIRVANO_API_URL`: payment checkout credentials
/// - `RESEND_API_KEY` / `EMAIL_FROM`: email delivery credentials
/// - `TWILIO_ACCOUNT_SID` / `TWILIO_AUTH_TOKEN` / `TWILIO_WHATSAPP_NUMBER` /
///   `WHATSAPP_COUNTRY_PREFIX`: WhatsApp delivery credentials
///
/// Missing gateway credentials disable the corresponding feature rather than
/// failing startup; a missing prescription secret fails startup, since the
/// service cannot issue verifiable documents without it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vidaleve=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("VIDALEVE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.into())
        .parse()?;
    let app_url = std::env::var("APP_URL").unwrap_or_else(|_| DEFAULT_APP_URL.into());

    let prescription_secret = env_opt("PRESCRIPTION_SECRET")
        .ok_or_else(|| anyhow::anyhow!("PRESCRIPTION_SECRET is not configured"))?;
    let core_cfg = Arc::new(CoreConfig::new(app_url.clone(), prescription_secret)?);

    let checkout = CheckoutClient::new(CheckoutConfig {
        api_key: env_opt("KIRVANO_API_KEY"),
        api_url: std::env::var("KIRVANO_API_URL")
            .unwrap_or_else(|_| DEFAULT_KIRVANO_API_URL.into()),
        app_url,
    });
    let email = EmailClient::new(EmailConfig::new(
        env_opt("RESEND_API_KEY"),
        env_opt("EMAIL_FROM"),
    ));
    let whatsapp = WhatsAppClient::new(WhatsAppConfig::new(
        env_opt("TWILIO_ACCOUNT_SID"),
        env_opt("TWILIO_AUTH_TOKEN"),
        env_opt("TWILIO_WHATSAPP_NUMBER"),
        env_opt("WHATSAPP_COUNTRY_PREFIX"),
    ));

    let state = AppState {
        prescriptions: PrescriptionService::new(core_cfg.clone()),
        accounts: AccountService::new(Arc::new(InMemoryRepository::new())),
        core_cfg,
        checkout,
        email,
        whatsapp,
    };

    tracing::info!("++ Starting VidaLeve REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}

/// Read an environment variable, treating blank values as absent.
fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
