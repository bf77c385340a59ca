use assert_json_diff::assert_json_eq;
use common::{response_patch, setup_command, test_data};
use predicates::prelude::*;
use predicates::str::{contains, is_empty};
use rstest::rstest;
use serde_json::json;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

mod common;

#[test]
fn test_mutate_pod_creation() {
    let mut cmd = setup_command();
    cmd.arg("--request-path").arg(test_data("pod_creation.json"));

    let output = cmd.assert().success().get_output().stdout.clone();

    let review: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(review["apiVersion"], "admission.k8s.io/v1beta1");
    assert_eq!(review["request"]["namespace"], "yolo");
    assert_eq!(
        review["response"]["uid"],
        "7f0b2891-916f-4ed6-b7cd-27bff1815a8c"
    );
    assert_eq!(review["response"]["allowed"], true);
    assert_eq!(review["response"]["patchType"], "JSONPatch");
    assert_eq!(review["response"]["status"], json!({"status": "Success"}));

    assert_json_eq!(
        response_patch(&output),
        json!([
            {
                "op": "add",
                "path": "/spec/volumes/-",
                "value": {"name": "hypertrace-javaagent", "emptyDir": {}}
            },
            {
                "op": "replace",
                "path": "/spec/containers",
                "value": [{
                    "name": "c7m",
                    "image": "centos:7",
                    "command": ["/bin/bash"],
                    "args": [
                        "-c",
                        "trap \"killall sleep\" TERM; trap \"kill -9 sleep\" KILL; sleep infinity"
                    ],
                    "env": [{
                        "name": "JAVA_TOOL_OPTIONS",
                        "value": "Hello World -javaagent:/mnt/hypertrace/hypertrace-agent-all.jar"
                    }],
                    "resources": {},
                    "volumeMounts": [
                        {
                            "name": "default-token-5z7xl",
                            "readOnly": true,
                            "mountPath": "/var/run/secrets/kubernetes.io/serviceaccount"
                        },
                        {"name": "hypertrace-javaagent", "mountPath": "/mnt/hypertrace"}
                    ],
                    "terminationMessagePath": "/dev/termination-log",
                    "terminationMessagePolicy": "File",
                    "imagePullPolicy": "IfNotPresent"
                }]
            },
            {
                "op": "add",
                "path": "/spec/initContainers",
                "value": [{
                    "name": "hypertrace-javaagent-init",
                    "image": "hypertrace/javaagent:latest",
                    "volumeMounts": [{"name": "hypertrace-javaagent", "mountPath": "/mnt/hypertrace"}],
                    "imagePullPolicy": "IfNotPresent"
                }]
            }
        ])
    );
}

#[test]
fn test_patch_applies_to_the_submitted_pod() {
    let mut cmd = setup_command();
    cmd.arg("--request-path")
        .arg(test_data("pod_creation_labelled.json"));

    let output = cmd.assert().success().get_output().stdout.clone();

    let patch: json_patch::Patch = serde_json::from_value(response_patch(&output)).unwrap();
    let review: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(test_data("pod_creation_labelled.json")).unwrap())
            .unwrap();
    let mut pod = review["request"]["object"].clone();
    json_patch::patch(&mut pod, &patch).expect("the patch should apply");

    assert_eq!(
        pod["spec"]["volumes"],
        json!([{"name": "hypertrace-javaagent", "emptyDir": {}}])
    );
    assert_eq!(pod["spec"]["initContainers"][0]["name"], "migrate");
    assert_eq!(
        pod["spec"]["initContainers"][1]["name"],
        "hypertrace-javaagent-init"
    );

    let app = &pod["spec"]["containers"][0];
    assert_eq!(
        app["env"],
        json!([
            {
                "name": "JAVA_TOOL_OPTIONS",
                "value": "Hello World -javaagent:/mnt/hypertrace/hypertrace-agent-all.jar"
            },
            {"name": "HT_SERVICE_NAME", "value": "catalog"}
        ])
    );

    let sidecar = &pod["spec"]["containers"][1];
    assert_eq!(sidecar["name"], "istio-proxy");
    assert_eq!(
        sidecar["env"],
        json!([{"name": "HYPERTRACE_IGNORE_JAVAAGENT", "value": "true"}])
    );
    assert!(sidecar.get("volumeMounts").is_none());
}

#[test]
fn test_configuration_from_environment() {
    let mut cmd = setup_command();
    cmd.arg("--request-path")
        .arg(test_data("pod_creation.json"))
        .env("HYPERTRACE_JAVAAGENT_IMAGE", "registry.local/javaagent:1.2.3")
        .env("HT_REPORTING_ENDPOINT", "http://collector:9411");

    let output = cmd.assert().success().get_output().stdout.clone();
    let patch = response_patch(&output);

    assert_eq!(
        patch[1]["value"][0]["env"][1],
        json!({"name": "HT_REPORTING_ENDPOINT", "value": "http://collector:9411"})
    );
    assert_eq!(patch[2]["value"][0]["image"], "registry.local/javaagent:1.2.3");
}

#[test]
fn test_request_from_stdin() {
    let mut cmd = setup_command();
    cmd.write_stdin(fs::read(test_data("pod_creation.json")).unwrap());

    let output = cmd.assert().success().get_output().stdout.clone();

    assert_eq!(response_patch(&output).as_array().map(Vec::len), Some(3));
}

#[test]
fn test_request_from_temporary_file() {
    let mut request = NamedTempFile::new().unwrap();
    request
        .write_all(&fs::read(test_data("pod_creation.json")).unwrap())
        .unwrap();

    let mut cmd = setup_command();
    cmd.arg("-r").arg(request.path());

    cmd.assert().success().stdout(contains("\"allowed\":true"));
}

#[test]
fn test_review_without_request() {
    let mut cmd = setup_command();
    cmd.arg("--request-path").arg(test_data("no_request.json"));

    cmd.assert().success().stdout(is_empty());
}

#[rstest]
#[case::invalid_json("invalid.json", "unmarshaling request failed")]
#[case::invalid_pod("invalid_pod.json", "unable to unmarshal pod json object")]
fn test_malformed_review(#[case] request: &str, #[case] message: &str) {
    let mut cmd = setup_command();
    cmd.arg("--request-path").arg(test_data(request));

    cmd.assert()
        .failure()
        .stdout(is_empty())
        .stderr(contains(message));
}

#[test]
fn test_debug_logs_bodies() {
    let mut cmd = setup_command();
    cmd.arg("--request-path")
        .arg(test_data("pod_creation.json"))
        .env("DEBUG_ENABLED", "true");

    cmd.assert()
        .success()
        .stderr(contains("recv"))
        .stderr(contains("resp"))
        .stderr(contains("7f0b2891-916f-4ed6-b7cd-27bff1815a8c"));
}

#[test]
fn test_invalid_debug_flag() {
    let mut cmd = setup_command();
    cmd.arg("--request-path")
        .arg(test_data("pod_creation.json"))
        .env("DEBUG_ENABLED", "maybe");

    let output = cmd
        .assert()
        .success()
        .stderr(contains("WARN"))
        .stderr(contains("invalid boolean value for debug: maybe"))
        .stderr(contains("recv").not())
        .get_output()
        .stdout
        .clone();

    let review: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(review["response"]["allowed"], true);
}

#[rstest]
#[case::no_color_convention("1")]
#[case::explicit_true("true")]
#[case::explicit_false("false")]
#[case::empty("")]
fn test_no_color_environment_values(#[case] value: &str) {
    let mut cmd = setup_command();
    cmd.arg("--request-path")
        .arg(test_data("pod_creation.json"))
        .env("NO_COLOR", value);

    let output = cmd.assert().success().get_output().stdout.clone();

    let review: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(review["response"]["allowed"], true);
}

#[test]
fn test_missing_request_file() {
    let mut cmd = setup_command();
    cmd.arg("--request-path").arg(test_data("does-not-exist.json"));

    cmd.assert()
        .failure()
        .stderr(contains("cannot read admission review"));
}
