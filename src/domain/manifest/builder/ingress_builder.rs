use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::schema::kube_resources::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use crate::domain::manifest::model::resource_names::ResourceNames;

use super::metadata_builder::object_meta;

/// Single host rule routing `/` to the service. `None` when ingress is
/// disabled or no host is configured.
pub fn build_ingress(cfg: &ManifestConfig, names: &ResourceNames) -> Option<Ingress> {
    if !cfg.enable_ingress {
        return None;
    }
    let host = cfg.ingress_host.clone()?;

    Some(Ingress {
        metadata: object_meta(cfg, &names.ingress, &names.labels()),
        spec: Some(IngressSpec {
            ingress_class_name: cfg.ingress_class_name.clone(),
            rules: Some(vec![IngressRule {
                host: Some(host),
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some("/".to_string()),
                        path_type: "Prefix".to_string(),
                        backend: IngressBackend {
                            service: Some(IngressServiceBackend {
                                name: names.service.clone(),
                                port: Some(ServiceBackendPort {
                                    number: Some(cfg.service_port),
                                    ..ServiceBackendPort::default()
                                }),
                            }),
                            ..IngressBackend::default()
                        },
                    }],
                }),
            }]),
            ..IngressSpec::default()
        }),
        ..Ingress::default()
    })
}
