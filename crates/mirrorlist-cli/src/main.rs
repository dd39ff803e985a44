use chrono::Utc;
use clap::Parser;
use cli::Args;
use logging::{setup_logging, LogSettings};
use mirrorlist_core::{preflight, update, HttpSource, Result, UpdaterConfig};
use tracing::info;

mod cli;
mod logging;
mod utils;

fn handle_cli() -> Result<()> {
    let _args = Args::parse();

    setup_logging(&LogSettings::from_env());

    preflight()?;

    let now = Utc::now();
    let config = UpdaterConfig::default();
    let source = HttpSource::from_config(&config);

    let report = update(&config, &source, now)?;

    // Zero mirrors is reported as an advisory only; the exit status stays 0.
    if report.is_updated() {
        info!(
            "Wrote {} mirrors to {}",
            report.written,
            config.mirrorlist_path.display()
        );
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
