//! Tracing subscriber setup.
//!
//! Logs go to stderr so the presenter owns stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, RuntimeConfig};

pub fn init_logging(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&runtime.log_level))
        .unwrap_or_else(|_| default_filter(runtime.environment).into());

    let is_dev = runtime.environment == Environment::Development;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(is_dev)
        .with_line_number(is_dev);

    // Use JSON format in production, pretty format in dev
    if runtime.environment == Environment::Production {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init();
    }

    tracing::info!("Logging initialized for {:?} environment", runtime.environment);
}

fn default_filter(env: Environment) -> &'static str {
    match env {
        Environment::Development => "construction_quoter=debug,info",
        Environment::Staging => "construction_quoter=debug,warn",
        Environment::Production => "construction_quoter=info,warn",
    }
}
