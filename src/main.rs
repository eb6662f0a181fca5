use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use bookings::config::AppConfig;
use bookings::db;
use bookings::handlers;
use bookings::services::messaging::twilio::TwilioSmsProvider;
use bookings::services::notification::{NotificationSender, SmsNotifier};
use bookings::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    tracing::info!("database ready at {}", config.database_url);

    let notifier: Option<Arc<dyn NotificationSender>> = match TwilioSmsProvider::from_config(&config)
    {
        Some(sms) => {
            tracing::info!("customer SMS notifications enabled");
            Some(Arc::new(SmsNotifier::new(
                Box::new(sms),
                config.sms_country_prefix.clone(),
            )))
        }
        None => {
            tracing::info!("Twilio not configured, customer notifications disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        notifier,
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
