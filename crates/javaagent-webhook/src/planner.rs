//! Computes the JSON Patch injecting the Java agent into a Pod.
//!
//! The patch is always made of three operations, in this order:
//!
//! 1. add the `hypertrace-javaagent` emptyDir volume
//! 2. replace the whole container list with the instrumented containers
//! 3. add the init container copying the agent jar into the volume
//!
//! The order is part of the wire contract: the init container and the
//! container mounts reference the volume added by the first operation.

use k8s_openapi::api::core::v1::{Container, EmptyDirVolumeSource, Pod, PodSpec, Volume};
use tracing::debug;

use crate::config::InjectionConfig;
use crate::constants::{
    AGENT_INIT_CONTAINER_NAME, AGENT_INIT_CONTAINER_PULL_POLICY, AGENT_VOLUME_NAME,
    SERVICE_NAME_LABELS,
};
use crate::container::{self, agent_volume_mount};
use crate::patch::{PatchOperation, PatchValue};

/// Compute the patch for `pod`. The Pod itself is never modified.
pub fn plan(pod: &Pod, config: &InjectionConfig) -> Vec<PatchOperation> {
    let empty_spec = PodSpec::default();
    let spec = pod.spec.as_ref().unwrap_or(&empty_spec);

    let patch = vec![
        add_volume(spec),
        update_containers(pod, spec, config),
        add_init_container(spec, config),
    ];
    debug!(operations = patch.len(), "computed pod patch");

    patch
}

/// Resolve the service name from the Pod labels. The first label of
/// [`SERVICE_NAME_LABELS`] found wins, even when its value is empty.
pub fn service_name(pod: &Pod) -> &str {
    let Some(labels) = pod.metadata.labels.as_ref() else {
        return "";
    };

    SERVICE_NAME_LABELS
        .iter()
        .find_map(|label| labels.get(*label))
        .map(String::as_str)
        .unwrap_or_default()
}

pub fn agent_volume() -> Volume {
    Volume {
        name: AGENT_VOLUME_NAME.to_string(),
        empty_dir: Some(EmptyDirVolumeSource::default()),
        ..Default::default()
    }
}

pub fn agent_init_container(config: &InjectionConfig) -> Container {
    Container {
        name: AGENT_INIT_CONTAINER_NAME.to_string(),
        image: Some(config.agent_image.clone()),
        image_pull_policy: Some(AGENT_INIT_CONTAINER_PULL_POLICY.to_string()),
        volume_mounts: Some(vec![agent_volume_mount()]),
        ..Default::default()
    }
}

fn add_volume(spec: &PodSpec) -> PatchOperation {
    PatchOperation::add_to_array(
        "/spec/volumes",
        spec.volumes.as_ref().is_none_or(Vec::is_empty),
        agent_volume(),
        |volume| PatchValue::Volume(Box::new(volume)),
        PatchValue::Volumes,
    )
}

fn update_containers(pod: &Pod, spec: &PodSpec, config: &InjectionConfig) -> PatchOperation {
    let service_name = service_name(pod);

    let containers = spec
        .containers
        .iter()
        .map(|c| container::mutate(c, service_name, &config.reporting_endpoint))
        .collect();

    PatchOperation::replace("/spec/containers", PatchValue::Containers(containers))
}

fn add_init_container(spec: &PodSpec, config: &InjectionConfig) -> PatchOperation {
    PatchOperation::add_to_array(
        "/spec/initContainers",
        spec.init_containers.as_ref().is_none_or(Vec::is_empty),
        agent_init_container(config),
        |container| PatchValue::Container(Box::new(container)),
        PatchValue::Containers,
    )
}
