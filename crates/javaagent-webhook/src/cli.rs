use clap::builder::{FalseyValueParser, PossibleValue};
use clap::{Arg, ArgAction, Command, crate_authors, crate_description, crate_name, crate_version};

use crate::constants::DEFAULT_JAVAAGENT_IMAGE;

pub fn build_cli() -> Command {
    let mut args = vec![
        Arg::new("log-level")
            .long("log-level")
            .value_name("LOG_LEVEL")
            .env("HYPERTRACE_WEBHOOK_LOG_LEVEL")
            .default_value("info")
            .value_parser([
                PossibleValue::new("trace"),
                PossibleValue::new("debug"),
                PossibleValue::new("info"),
                PossibleValue::new("warn"),
                PossibleValue::new("error"),
            ])
            .help("Log level"),
        Arg::new("log-fmt")
            .long("log-fmt")
            .value_name("LOG_FMT")
            .env("HYPERTRACE_WEBHOOK_LOG_FMT")
            .default_value("text")
            .value_parser([PossibleValue::new("text"), PossibleValue::new("json")])
            .help("Log output format"),
        Arg::new("log-no-color")
            .long("log-no-color")
            .env("NO_COLOR")
            .action(ArgAction::SetTrue)
            .value_parser(FalseyValueParser::new())
            .help("Disable colored output for logs"),
        Arg::new("javaagent-image")
            .long("javaagent-image")
            .value_name("IMAGE")
            .env("HYPERTRACE_JAVAAGENT_IMAGE")
            .default_value(DEFAULT_JAVAAGENT_IMAGE)
            .help("Image of the init container providing the Java agent"),
        Arg::new("reporting-endpoint")
            .long("reporting-endpoint")
            .value_name("URL")
            .env("HT_REPORTING_ENDPOINT")
            .default_value("")
            .help("Reporting endpoint handed to the instrumented containers"),
        Arg::new("debug")
            .long("debug")
            .value_name("BOOL")
            .env("DEBUG_ENABLED")
            .default_value("false")
            .help("Log the raw admission review request and response bodies"),
        Arg::new("request-path")
            .long("request-path")
            .short('r')
            .value_name("REQUEST_PATH")
            .default_value("-")
            .help("File containing the AdmissionReview in JSON format, '-' reads from stdin"),
    ];
    args.sort_by(|a, b| a.get_id().cmp(b.get_id()));

    Command::new(crate_name!())
        .author(crate_authors!())
        .version(crate_version!())
        .about(crate_description!())
        .args(args)
}
