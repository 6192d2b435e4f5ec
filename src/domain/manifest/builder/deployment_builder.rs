use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::schema::kube_resources::{
    Deployment, DeploymentSpec, DeploymentStrategy, LabelSelector, ObjectMeta,
    PersistentVolumeClaimVolumeSource, PodSpec, PodTemplateSpec, Volume, RECREATE_STRATEGY,
};
use crate::domain::manifest::model::resource_names::ResourceNames;

use super::container_builder::{build_app_container, build_cron_container};
use super::metadata_builder::object_meta;

/// Deployment running the app and its cron sidecar.
///
/// The strategy is always `Recreate`: the pod mounts a ReadWriteOnce claim, and
/// a rolling update would schedule the new pod while the old one still holds
/// the volume, so the rollout would never finish.
pub fn build_deployment(cfg: &ManifestConfig, names: &ResourceNames) -> Deployment {
    let labels = names.labels();

    Deployment {
        metadata: object_meta(cfg, &names.deployment, &labels),
        spec: Some(DeploymentSpec {
            replicas: Some(cfg.replicas),
            strategy: Some(DeploymentStrategy {
                type_: Some(RECREATE_STRATEGY.to_string()),
                ..DeploymentStrategy::default()
            }),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    volumes: Some(vec![Volume {
                        name: names.pvc.clone(),
                        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                            claim_name: names.pvc.clone(),
                            ..PersistentVolumeClaimVolumeSource::default()
                        }),
                        ..Volume::default()
                    }]),
                    containers: vec![
                        build_app_container(cfg, names),
                        build_cron_container(cfg, names),
                    ],
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_recreate_and_single_claim_volume() {
        let cfg = ManifestConfig::default();
        let dep = build_deployment(&cfg, &ResourceNames::from_app(&cfg.app_name));
        let spec = dep.spec.unwrap();

        assert_eq!(dep.metadata.name.as_deref(), Some("nextcloud-dep"));
        assert_eq!(spec.replicas, Some(1));
        assert_eq!(spec.strategy.unwrap().type_.as_deref(), Some("Recreate"));

        let pod = spec.template.spec.unwrap();
        let volumes = pod.volumes.unwrap();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].name, "nextcloud-data");
        assert_eq!(
            volumes[0].persistent_volume_claim.as_ref().map(|c| c.claim_name.as_str()),
            Some("nextcloud-data")
        );
        let names: Vec<_> = pod.containers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["nextcloud", "nextcloud-cron"]);
    }

    #[test]
    fn selector_matches_template_labels() {
        let cfg = ManifestConfig::default();
        let dep = build_deployment(&cfg, &ResourceNames::from_app(&cfg.app_name));
        let spec = dep.spec.unwrap();
        assert_eq!(spec.selector.match_labels, spec.template.metadata.unwrap().labels);
    }
}
