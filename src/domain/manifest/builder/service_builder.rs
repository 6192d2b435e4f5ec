use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::schema::kube_resources::{
    IntOrString, Service, ServicePort, ServiceSpec, PROTOCOL_TCP, SERVICE_TYPE_CLUSTER_IP,
    SERVICE_TYPE_LOAD_BALANCER,
};
use crate::domain::manifest::model::resource_names::ResourceNames;

use super::metadata_builder::object_meta;
use super::HTTP_PORT_NAME;

/// Service in front of the pods. `LoadBalancer` when it is the external
/// entry point, `ClusterIP` when an ingress fronts it.
pub fn build_service(cfg: &ManifestConfig, names: &ResourceNames) -> Service {
    let labels = names.labels();
    let service_type = if cfg.enable_ingress {
        SERVICE_TYPE_CLUSTER_IP
    } else {
        SERVICE_TYPE_LOAD_BALANCER
    };

    Service {
        metadata: object_meta(cfg, &names.service, &labels),
        spec: Some(ServiceSpec {
            type_: Some(service_type.to_string()),
            ports: Some(vec![ServicePort {
                port: cfg.service_port,
                target_port: Some(IntOrString::String(HTTP_PORT_NAME.to_string())),
                protocol: Some(PROTOCOL_TCP.to_string()),
                ..ServicePort::default()
            }]),
            selector: Some(labels),
            ..ServiceSpec::default()
        }),
        ..Service::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_named_http_port() {
        let cfg = ManifestConfig::default();
        let svc = build_service(&cfg, &ResourceNames::from_app(&cfg.app_name));
        let spec = svc.spec.unwrap();
        let port = &spec.ports.unwrap()[0];
        assert_eq!(port.port, 80);
        assert_eq!(port.target_port, Some(IntOrString::String("http".into())));
        assert_eq!(port.protocol.as_deref(), Some("TCP"));
        assert_eq!(svc.metadata.name.as_deref(), Some("nextcloud-svc"));
    }

    #[test]
    fn type_follows_ingress_flag() {
        let mut cfg = ManifestConfig::default();
        let names = ResourceNames::from_app(&cfg.app_name);
        let lb = build_service(&cfg, &names).spec.unwrap().type_;
        assert_eq!(lb.as_deref(), Some("LoadBalancer"));

        cfg.enable_ingress = true;
        let cip = build_service(&cfg, &names).spec.unwrap().type_;
        assert_eq!(cip.as_deref(), Some("ClusterIP"));
    }
}
