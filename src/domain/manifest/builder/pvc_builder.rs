use std::collections::BTreeMap;

use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::schema::kube_resources::{
    PersistentVolumeClaim, PersistentVolumeClaimSpec, Quantity, VolumeResourceRequirements,
    READ_WRITE_ONCE,
};
use crate::domain::manifest::model::resource_names::ResourceNames;

use super::metadata_builder::object_meta;

pub fn build_pvc(cfg: &ManifestConfig, names: &ResourceNames) -> PersistentVolumeClaim {
    let requests = BTreeMap::from([(
        "storage".to_string(),
        Quantity(cfg.pvc_storage_size.clone()),
    )]);

    PersistentVolumeClaim {
        metadata: object_meta(cfg, &names.pvc, &names.labels()),
        spec: Some(PersistentVolumeClaimSpec {
            resources: Some(VolumeResourceRequirements {
                requests: Some(requests),
                ..VolumeResourceRequirements::default()
            }),
            storage_class_name: Some(cfg.pvc_storage_class.clone()),
            access_modes: Some(vec![READ_WRITE_ONCE.to_string()]),
            ..PersistentVolumeClaimSpec::default()
        }),
        ..PersistentVolumeClaim::default()
    }
}
