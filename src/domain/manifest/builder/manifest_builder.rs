use tracing::debug;
use validator::Validate;

use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::domain::manifest::model::manifest_set::ManifestSet;
use crate::domain::manifest::model::resource_names::ResourceNames;
use crate::errors::ManifestError;

use super::deployment_builder::build_deployment;
use super::ingress_builder::build_ingress;
use super::pvc_builder::build_pvc;
use super::service_builder::build_service;

/// Validates `cfg` and assembles the full resource set.
pub fn build_manifest_set(cfg: &ManifestConfig) -> Result<ManifestSet, ManifestError> {
    cfg.validate()?;

    let names = ResourceNames::from_app(&cfg.app_name);
    let set = ManifestSet {
        service: build_service(cfg, &names),
        pvc: build_pvc(cfg, &names),
        deployment: build_deployment(cfg, &names),
        ingress: build_ingress(cfg, &names),
    };

    debug!(
        "Built {} resource(s) for '{}' (ingress: {}, probes: {})",
        set.resources().len(),
        cfg.app_name,
        cfg.enable_ingress,
        cfg.enable_probes
    );
    Ok(set)
}
