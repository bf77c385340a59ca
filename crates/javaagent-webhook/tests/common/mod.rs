use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use base64::{Engine as _, engine::general_purpose};

const CONFIG_ENV_VARS: &[&str] = &[
    "HYPERTRACE_JAVAAGENT_IMAGE",
    "HT_REPORTING_ENDPOINT",
    "DEBUG_ENABLED",
    "HYPERTRACE_WEBHOOK_LOG_LEVEL",
    "HYPERTRACE_WEBHOOK_LOG_FMT",
];

#[allow(dead_code)]
pub fn setup_command() -> Command {
    let mut cmd: Command = cargo_bin_cmd!("javaagent-webhook");

    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");

    cmd
}

#[allow(dead_code)]
pub fn test_data(path: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(path)
        .to_string_lossy()
        .to_string()
}

/// Extract and decode the JSON Patch carried by an AdmissionReview response.
#[allow(dead_code)]
pub fn response_patch(stdout: &[u8]) -> serde_json::Value {
    let review: serde_json::Value =
        serde_json::from_slice(stdout).expect("stdout should be an AdmissionReview");
    let patch = review["response"]["patch"]
        .as_str()
        .expect("the response should carry a patch");
    let patch = general_purpose::STANDARD
        .decode(patch)
        .expect("the patch should be base64 encoded");

    serde_json::from_slice(&patch).expect("the patch should be a JSON document")
}
