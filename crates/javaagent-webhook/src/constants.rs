pub const AGENT_VOLUME_NAME: &str = "hypertrace-javaagent";
pub const AGENT_MOUNT_PATH: &str = "/mnt/hypertrace";
pub const AGENT_INIT_CONTAINER_NAME: &str = "hypertrace-javaagent-init";
pub const AGENT_INIT_CONTAINER_PULL_POLICY: &str = "IfNotPresent";
pub const AGENT_JAVAAGENT_FLAG: &str = "-javaagent:/mnt/hypertrace/hypertrace-agent-all.jar";

pub const DEFAULT_JAVAAGENT_IMAGE: &str = "hypertrace/javaagent:latest";

pub const ENV_IGNORE_JAVAAGENT: &str = "HYPERTRACE_IGNORE_JAVAAGENT";
pub const ENV_JAVA_TOOL_OPTIONS: &str = "JAVA_TOOL_OPTIONS";
pub const ENV_SERVICE_NAME: &str = "HT_SERVICE_NAME";
pub const ENV_REPORTING_ENDPOINT: &str = "HT_REPORTING_ENDPOINT";

/// Pod labels holding the service name, in order of precedence.
pub const SERVICE_NAME_LABELS: [&str; 2] = ["app.kubernetes.io/name", "app"];

pub const ADMISSION_REVIEW_KIND: &str = "AdmissionReview";
pub const ADMISSION_REVIEW_API_VERSION: &str = "admission.k8s.io/v1";
