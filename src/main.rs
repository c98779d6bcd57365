use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sfacg_sign::{Config, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sfacg_sign=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Failures are reported through ntfy; the exit status stays 0.
    if let Err(e) = run(Config::from_env()).await {
        tracing::error!(error = %format!("{:#}", e), "Sign-in job aborted");
    }

    Ok(())
}
