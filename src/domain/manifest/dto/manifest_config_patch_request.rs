use serde::{Deserialize, Serialize};

use crate::core::config::image_pull_policy::ImagePullPolicy;

/// Overrides collected from environment variables and command-line flags.
/// `None` keeps the value from the config file or the built-in default; an
/// empty string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestConfigPatchRequest {
    pub chart_name: Option<String>,
    pub app_name: Option<String>,
    pub namespace: Option<String>,
    pub image: Option<String>,
    pub image_pull_policy: Option<ImagePullPolicy>,
    pub replicas: Option<i32>,
    pub pvc_storage_size: Option<String>,
    pub pvc_storage_class: Option<String>,
    pub data_dir: Option<String>,
    pub container_port: Option<i32>,
    pub service_port: Option<i32>,
    pub cron_command: Option<Vec<String>>,
    pub ingress_host: Option<String>,
    pub ingress_class_name: Option<String>,
    pub enable_ingress: Option<bool>,
    pub enable_probes: Option<bool>,
}
