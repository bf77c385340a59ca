use anyhow::{Result, anyhow};
use clap::ArgMatches;

use crate::constants::DEFAULT_JAVAAGENT_IMAGE;

/// Settings that drive the injection, read once at startup and shared
/// read-only by every admission request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectionConfig {
    /// Image of the init container copying the agent into the shared volume.
    pub agent_image: String,
    /// Value of `HT_REPORTING_ENDPOINT` given to every instrumented
    /// container. Empty means the variable is not injected.
    pub reporting_endpoint: String,
    /// Log the raw admission review bodies.
    pub debug: bool,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        InjectionConfig {
            agent_image: DEFAULT_JAVAAGENT_IMAGE.to_string(),
            reporting_endpoint: String::new(),
            debug: false,
        }
    }
}

pub struct Config {
    pub injection: InjectionConfig,
    pub request_path: String,
    pub log_level: String,
    pub log_fmt: String,
    pub log_no_color: bool,
    /// Problems found while reading the configuration that did not prevent
    /// startup. They are logged once tracing is set up.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let agent_image = matches
            .get_one::<String>("javaagent-image")
            .expect("This should not happen, there's a default value for javaagent-image")
            .to_owned();
        let reporting_endpoint = matches
            .get_one::<String>("reporting-endpoint")
            .expect("This should not happen, there's a default value for reporting-endpoint")
            .to_owned();
        let mut warnings = Vec::new();
        let debug = parse_bool(
            matches
                .get_one::<String>("debug")
                .expect("This should not happen, there's a default value for debug"),
        )
        .unwrap_or_else(|e| {
            warnings.push(format!("{e}, raw body logging stays disabled"));
            false
        });

        let request_path = matches
            .get_one::<String>("request-path")
            .expect("This should not happen, there's a default value for request-path")
            .to_owned();
        let log_level = matches
            .get_one::<String>("log-level")
            .expect("This should not happen, there's a default value for log-level")
            .to_owned();
        let log_fmt = matches
            .get_one::<String>("log-fmt")
            .expect("This should not happen, there's a default value for log-fmt")
            .to_owned();
        let log_no_color = matches
            .get_one::<bool>("log-no-color")
            .expect("clap should have assigned a default value")
            .to_owned();

        Ok(Self {
            injection: InjectionConfig {
                agent_image,
                reporting_endpoint,
                debug,
            },
            request_path,
            log_level,
            log_fmt,
            log_no_color,
            warnings,
        })
    }
}

// DEBUG_ENABLED has always been read with these spellings. Any other value
// leaves debugging off instead of preventing startup.
fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(anyhow!(
            "error parsing arguments: invalid boolean value for debug: {value}"
        )),
    }
}
