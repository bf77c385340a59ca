use k8s_openapi::api::core::v1::{Container, EnvVar, VolumeMount};
use tracing::debug;

use crate::constants::{
    AGENT_JAVAAGENT_FLAG, AGENT_MOUNT_PATH, AGENT_VOLUME_NAME, ENV_IGNORE_JAVAAGENT,
    ENV_JAVA_TOOL_OPTIONS, ENV_REPORTING_ENDPOINT, ENV_SERVICE_NAME,
};

/// The mount giving a container access to the agent jar.
pub fn agent_volume_mount() -> VolumeMount {
    VolumeMount {
        name: AGENT_VOLUME_NAME.to_string(),
        mount_path: AGENT_MOUNT_PATH.to_string(),
        ..Default::default()
    }
}

/// Containers declaring `HYPERTRACE_IGNORE_JAVAAGENT`, whatever its value,
/// opt out of the instrumentation.
pub fn is_ignored(container: &Container) -> bool {
    container
        .env
        .iter()
        .flatten()
        .any(|env_var| env_var.name == ENV_IGNORE_JAVAAGENT)
}

/// Return the instrumented version of `container`.
///
/// The agent mount and environment variables are appended unconditionally:
/// mutating an already mutated container adds them a second time.
pub fn mutate(container: &Container, service_name: &str, reporting_endpoint: &str) -> Container {
    if is_ignored(container) {
        debug!(container = %container.name, "container opted out of the java agent");
        return container.clone();
    }

    let mut volume_mounts = container.volume_mounts.clone().unwrap_or_default();
    volume_mounts.push(agent_volume_mount());

    let mut found = false;
    let mut env: Vec<EnvVar> = container
        .env
        .iter()
        .flatten()
        .map(|env_var| {
            if env_var.name != ENV_JAVA_TOOL_OPTIONS {
                return env_var.clone();
            }
            found = true;
            EnvVar {
                value: Some(format!(
                    "{} {AGENT_JAVAAGENT_FLAG}",
                    env_var.value.as_deref().unwrap_or_default()
                )),
                ..env_var.clone()
            }
        })
        .collect();

    if !found {
        env.push(env_var(ENV_JAVA_TOOL_OPTIONS, AGENT_JAVAAGENT_FLAG));
    }
    if !service_name.is_empty() {
        env.push(env_var(ENV_SERVICE_NAME, service_name));
    }
    if !reporting_endpoint.is_empty() {
        env.push(env_var(ENV_REPORTING_ENDPOINT, reporting_endpoint));
    }

    debug!(container = %container.name, "injected java agent");

    Container {
        env: Some(env),
        volume_mounts: Some(volume_mounts),
        ..container.clone()
    }
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}
