use clap::Parser;
use roster_lib::config::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let settings = Settings::parse();

    let default_level = if settings.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Also installs the `log` bridge, so library `log::` records land here.
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
    {
        eprintln!("logging init failed: {}", e);
    }

    if let Err(e) = roster_lib::run(settings).await {
        log::error!("roster exited with error: {}", e);
        std::process::exit(1);
    }
}
