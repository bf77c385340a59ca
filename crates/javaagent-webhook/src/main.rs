use anyhow::{Result, anyhow};
use std::fs;
use std::io::{self, Read, Write};
use std::process;
use tracing::{error, info, warn};

use javaagent_webhook::cli;
use javaagent_webhook::config::Config;
use javaagent_webhook::tracing::setup_tracing;
use javaagent_webhook::webhook::Webhook;

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;
    for warning in &config.warnings {
        warn!("{warning}");
    }

    let webhook = Webhook::new(config.injection);
    info!(
        image = %webhook.config().agent_image,
        reporting_endpoint = %webhook.config().reporting_endpoint,
        "webhook initialized"
    );

    let body = read_request(&config.request_path)?;

    match webhook.mutate(&body) {
        Ok(response) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&response)?;
            stdout.flush()?;
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "cannot mutate admission review");
            process::exit(1);
        }
    }
}

fn read_request(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut body = Vec::new();
        io::stdin()
            .read_to_end(&mut body)
            .map_err(|e| anyhow!("cannot read admission review from stdin: {e}"))?;
        return Ok(body);
    }

    fs::read(path).map_err(|e| anyhow!("cannot read admission review from {path}: {e}"))
}
