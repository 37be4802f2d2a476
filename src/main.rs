use anyhow::{Context, Result};
use capkscraper::{config::Config, fetch, pipeline};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

async fn refresh() -> Result<pipeline::RunSummary> {
    let config = Config::load().context("loading configuration")?;
    let source = fetch::source_for(&config).context("selecting page source")?;
    let summary = pipeline::run(&config, source.as_ref())
        .await
        .with_context(|| format!("refreshing CAPKs from {}", config.source_url))?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) one refresh; failures are logged, not turned into an exit code ──
    match refresh().await {
        Ok(summary) => {
            for s in &summary.sections {
                info!(brand = %s.brand, rows = s.rows, emitted = s.emitted, skipped = s.skipped, "section");
            }
            info!(
                output = %summary.output_path.display(),
                keys = summary.total_emitted(),
                "all done"
            );
        }
        Err(e) => error!("capk refresh failed: {:?}", e),
    }
    Ok(())
}
