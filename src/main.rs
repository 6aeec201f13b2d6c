use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photodeck::writer::PptxFile;
use photodeck::{Cli, Config, pipeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photodeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let config = Config::try_from(cli).context("Invalid arguments")?;

    let mut writer = PptxFile::new(&config.output, config.variant.replaces_existing_output());
    let report = pipeline::run(&config, &mut writer)
        .with_context(|| format!("Failed to build presentation {:?}", config.output))?;

    tracing::info!(
        entities = report.entities,
        slides = report.slides.len(),
        missing = report.missing.len(),
        skipped = report.failed.len(),
        "Presentation saved as: {}",
        config.output.display()
    );
    Ok(())
}
