use std::collections::BTreeMap;

use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::config::resource_settings::ResourceSettings;
use crate::core::schema::kube_resources::{
    Container, ContainerPort, Quantity, ResourceRequirements, VolumeMount, PROTOCOL_TCP,
};
use crate::domain::manifest::model::resource_names::ResourceNames;

use super::probe_builder::build_health_probes;
use super::HTTP_PORT_NAME;

pub fn resource_requirements(settings: &ResourceSettings) -> ResourceRequirements {
    let pair = |cpu: &str, memory: &str| {
        BTreeMap::from([
            ("cpu".to_string(), Quantity(cpu.to_string())),
            ("memory".to_string(), Quantity(memory.to_string())),
        ])
    };

    ResourceRequirements {
        limits: Some(pair(&settings.cpu_limit, &settings.memory_limit)),
        requests: Some(pair(&settings.cpu_request, &settings.memory_request)),
        ..ResourceRequirements::default()
    }
}

/// Web server container. Mounts the claim at `data_dir` and carries the
/// health probes when enabled.
pub fn build_app_container(cfg: &ManifestConfig, names: &ResourceNames) -> Container {
    let mut container = Container {
        name: names.app.clone(),
        image: Some(cfg.image.clone()),
        image_pull_policy: Some(cfg.image_pull_policy.as_code().to_string()),
        ports: Some(vec![ContainerPort {
            name: Some(HTTP_PORT_NAME.to_string()),
            container_port: cfg.container_port,
            protocol: Some(PROTOCOL_TCP.to_string()),
            ..ContainerPort::default()
        }]),
        resources: Some(resource_requirements(&cfg.app_resources)),
        volume_mounts: Some(vec![VolumeMount {
            name: names.pvc.clone(),
            mount_path: cfg.data_dir.clone(),
            ..VolumeMount::default()
        }]),
        ..Container::default()
    };

    if cfg.enable_probes {
        // Validation guarantees a host whenever probes are enabled
        if let Some(host) = cfg.ingress_host.as_deref() {
            let probes = build_health_probes(&cfg.probe, host);
            container.liveness_probe = Some(probes.liveness);
            container.readiness_probe = Some(probes.readiness);
            container.startup_probe = Some(probes.startup);
        }
    }

    container
}

/// Sidecar running the periodic background-jobs script from the same image.
pub fn build_cron_container(cfg: &ManifestConfig, names: &ResourceNames) -> Container {
    Container {
        name: names.cron_container.clone(),
        image: Some(cfg.image.clone()),
        image_pull_policy: Some(cfg.image_pull_policy.as_code().to_string()),
        command: Some(cfg.cron_command.clone()),
        resources: Some(resource_requirements(&cfg.cron_resources)),
        ..Container::default()
    }
}
