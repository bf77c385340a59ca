use anyhow::{Result, anyhow};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

// Logs are written to stderr: stdout carries the AdmissionReview response.
pub fn setup_tracing(log_level: &str, log_fmt: &str, log_no_color: bool) -> Result<()> {
    let filter_layer = EnvFilter::try_new(log_level)
        .map_err(|e| anyhow!("invalid log level {log_level}: {e}"))?;

    match log_fmt {
        "json" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        "text" => {
            let fmt_layer = fmt::layer()
                .with_ansi(!log_no_color)
                .with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt_layer)
                .try_init()?
        }
        _ => return Err(anyhow!("Unknown log message format")),
    };

    Ok(())
}
