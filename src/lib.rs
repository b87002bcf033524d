pub mod model;
pub mod services;
pub mod store;
pub mod utils;

use dotenv::dotenv;
use std::sync::Arc;
use store::UserRecordStore;
use utils::errors::WardenError;
use utils::context::ServiceContext;
use utils::config::{Configuration, self};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub use model::credential::UserCredential;
pub use model::session::{SessionCookie, SessionToken};
pub use utils::errors::ErrorCode;

const APP_NAME: &str = "Warden";

///
/// Entry point to wire up the service core over the record store the
/// surrounding infrastructure provides.
///
pub fn init(store: Arc<dyn UserRecordStore>) -> Result<Arc<ServiceContext>, WardenError> {

    // Load any local dev settings as environment variables from a .env file.
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    config::default_env("RUST_LOG", "INFO");

    init_tracing();

    // Load the service configuration into struct - a missing signing secret fails here.
    let config = Configuration::from_env()?;

    tracing::info!("{}\n{}", BANNER, config.fmt_console()?);
    tracing::info!("{} credential service ready", APP_NAME);

    Ok(Arc::new(ServiceContext::new(config, store)?))
}

///
/// Initialise tracing with the level taken from RUST_LOG.
///
fn init_tracing() {
    if let Err(err) = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
        .try_init() {
            tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
    }
}

const BANNER: &str = r#"
 __      __                  .___
/  \    /  \_____ _______  __| _/____   ____
\   \/\/   /\__  \\_  __ \/ __ |/ __ \ /    \
 \        /  / __ \|  | \/ /_/ \  ___/|   |  \
  \__/\  /  (____  /__|  \____ |\___  >___|  /
       \/        \/           \/    \/     \/
"#;
