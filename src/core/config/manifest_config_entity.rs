use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::util::dns_util::{is_dns1123_label, is_dns1123_subdomain};
use crate::domain::manifest::dto::manifest_config_patch_request::ManifestConfigPatchRequest;

use super::image_pull_policy::ImagePullPolicy;
use super::probe_settings::ProbeSettings;
use super::resource_settings::{
    deserialize_app_resources, deserialize_cron_resources, ResourceSettings,
};
use crate::core::util::quantity_util::QuantityUtil;

/// Longest suffix appended to `app_name` when deriving resource names.
const LONGEST_NAME_SUFFIX: &str = "-ingress";

/// Everything the builder needs to produce one application's manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_feature_requirements", skip_on_field_errors = false))]
pub struct ManifestConfig {
    /// Chart identifier, used for the single-file output name.
    #[validate(custom(function = "validate_dns_label"))]
    pub chart_name: String,
    /// Base name; service, claim, deployment and ingress names derive from it.
    #[validate(custom(function = "validate_app_name"))]
    pub app_name: String,
    /// Target namespace. Omitted from metadata when unset.
    #[validate(custom(function = "validate_dns_label"))]
    pub namespace: Option<String>,
    #[validate(length(min = 1))]
    pub image: String,
    pub image_pull_policy: ImagePullPolicy,
    #[validate(range(min = 1))]
    pub replicas: i32,
    #[validate(custom(function = "validate_storage_size"))]
    pub pvc_storage_size: String,
    #[validate(length(min = 1))]
    pub pvc_storage_class: String,
    /// Mount path of the claim inside the app container.
    #[validate(custom(function = "validate_absolute_path"))]
    pub data_dir: String,
    #[validate(range(min = 1, max = 65535))]
    pub container_port: i32,
    #[validate(range(min = 1, max = 65535))]
    pub service_port: i32,
    /// External hostname; also sent as the probes' Host header.
    #[validate(custom(function = "validate_hostname"))]
    pub ingress_host: Option<String>,
    #[validate(length(min = 1))]
    pub ingress_class_name: Option<String>,
    pub enable_ingress: bool,
    pub enable_probes: bool,
    #[validate(nested)]
    pub probe: ProbeSettings,
    #[serde(deserialize_with = "deserialize_app_resources")]
    #[validate(nested)]
    pub app_resources: ResourceSettings,
    #[serde(deserialize_with = "deserialize_cron_resources")]
    #[validate(nested)]
    pub cron_resources: ResourceSettings,
    /// Entrypoint override for the background-jobs sidecar.
    #[validate(length(min = 1))]
    pub cron_command: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            chart_name: "nextcloud-cdk8s".into(),
            app_name: "nextcloud".into(),
            namespace: None,
            image: "nextcloud:apache".into(),
            image_pull_policy: ImagePullPolicy::IfNotPresent,
            replicas: 1,
            pvc_storage_size: "100Mi".into(),
            pvc_storage_class: "rawfile-btrfs".into(),
            data_dir: "/var/www/html/data".into(),
            container_port: 80,
            service_port: 80,
            ingress_host: None,
            ingress_class_name: None,
            enable_ingress: false,
            enable_probes: false,
            probe: ProbeSettings::default(),
            app_resources: ResourceSettings::app_default(),
            cron_resources: ResourceSettings::cron_default(),
            cron_command: vec!["/cron.sh".into()],
        }
    }
}

impl ManifestConfig {
    pub fn apply_update(&mut self, req: ManifestConfigPatchRequest) {
        if let Some(v) = req.chart_name {
            self.chart_name = v;
        }
        if let Some(v) = req.app_name {
            self.app_name = v;
        }
        if let Some(v) = req.namespace {
            self.namespace = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = req.image {
            self.image = v;
        }
        if let Some(v) = req.image_pull_policy {
            self.image_pull_policy = v;
        }
        if let Some(v) = req.replicas {
            self.replicas = v;
        }
        if let Some(v) = req.pvc_storage_size {
            self.pvc_storage_size = v;
        }
        if let Some(v) = req.pvc_storage_class {
            self.pvc_storage_class = v;
        }
        if let Some(v) = req.data_dir {
            self.data_dir = v;
        }
        if let Some(v) = req.container_port {
            self.container_port = v;
        }
        if let Some(v) = req.service_port {
            self.service_port = v;
        }
        if let Some(v) = req.cron_command {
            self.cron_command = v;
        }
        if let Some(v) = req.ingress_host {
            self.ingress_host = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = req.ingress_class_name {
            self.ingress_class_name = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = req.enable_ingress {
            self.enable_ingress = v;
        }
        if let Some(v) = req.enable_probes {
            self.enable_probes = v;
        }
    }
}

fn validate_dns_label(value: &str) -> Result<(), ValidationError> {
    if is_dns1123_label(value) {
        Ok(())
    } else {
        Err(ValidationError::new("dns1123_label")
            .with_message(format!("'{value}' is not a valid DNS-1123 label").into()))
    }
}

fn validate_app_name(value: &str) -> Result<(), ValidationError> {
    validate_dns_label(value)?;
    validate_dns_label(&format!("{value}{LONGEST_NAME_SUFFIX}")).map_err(|_| {
        ValidationError::new("app_name_too_long").with_message(
            format!("'{value}' is too long to derive resource names from").into(),
        )
    })
}

/// A claim must request at least one byte.
fn validate_storage_size(value: &str) -> Result<(), ValidationError> {
    match QuantityUtil::parse_non_negative(value) {
        Some(bytes) if bytes >= 1.0 => Ok(()),
        Some(_) => Err(ValidationError::new("storage_size")
            .with_message(format!("storage size '{value}' must be at least one byte").into())),
        None => Err(ValidationError::new("quantity")
            .with_message(format!("'{value}' is not a valid resource quantity").into())),
    }
}

fn validate_hostname(value: &str) -> Result<(), ValidationError> {
    if is_dns1123_subdomain(value) {
        Ok(())
    } else {
        Err(ValidationError::new("hostname")
            .with_message(format!("'{value}' is not a valid DNS hostname").into()))
    }
}

fn validate_absolute_path(value: &str) -> Result<(), ValidationError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::new("absolute_path")
            .with_message(format!("'{value}' must be an absolute path").into()))
    }
}

fn validate_feature_requirements(cfg: &ManifestConfig) -> Result<(), ValidationError> {
    if cfg.ingress_host.is_some() {
        return Ok(());
    }
    if cfg.enable_ingress {
        return Err(ValidationError::new("ingress_host_required")
            .with_message("enable_ingress requires ingress_host".into()));
    }
    if cfg.enable_probes {
        return Err(ValidationError::new("ingress_host_required")
            .with_message("enable_probes requires ingress_host for the Host header".into()));
    }
    Ok(())
}
