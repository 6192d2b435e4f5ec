use std::collections::BTreeMap;

use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::schema::kube_resources::ObjectMeta;

/// Metadata for a top-level resource: name, shared labels, optional namespace.
pub fn object_meta(cfg: &ManifestConfig, name: &str, labels: &BTreeMap<String, String>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: cfg.namespace.clone(),
        labels: Some(labels.clone()),
        ..ObjectMeta::default()
    }
}
