use std::collections::BTreeSet;

use tracing::debug;

use crate::core::schema::kube_resources::{
    Container, PodSpec, Quantity, RECREATE_STRATEGY, READ_WRITE_ONCE, SERVICE_TYPE_CLUSTER_IP,
    SERVICE_TYPE_LOAD_BALANCER,
};
use crate::core::util::dns_util::is_dns1123_label;
use crate::core::util::quantity_util::QuantityUtil;
use crate::domain::manifest::builder::probe_builder::probe_host_header;
use crate::domain::manifest::model::manifest_set::ManifestSet;
use crate::errors::ManifestError;

/// Checks the cross-resource rules a built or parsed set must satisfy.
/// Every violation is reported, not just the first.
pub fn verify_manifest_set(set: &ManifestSet) -> Result<(), ManifestError> {
    let mut violations = Vec::new();

    check_names(set, &mut violations);
    check_selectors(set, &mut violations);
    check_service_exposure(set, &mut violations);
    check_ingress_backends(set, &mut violations);

    match set.deployment.spec.as_ref().and_then(|s| s.template.spec.as_ref()) {
        Some(pod) => {
            check_volumes(set, pod, &mut violations);
            for container in &pod.containers {
                check_probe_hosts(container, &mut violations);
                check_resources(container, &mut violations);
            }
        }
        None => violations.push("deployment has no pod template spec".to_string()),
    }

    if violations.is_empty() {
        debug!("Manifest set passed invariant checks");
        Ok(())
    } else {
        Err(ManifestError::Invariant(violations))
    }
}

fn check_names(set: &ManifestSet, violations: &mut Vec<String>) {
    for resource in set.resources() {
        let name = resource.name();
        if !is_dns1123_label(&name) {
            violations.push(format!(
                "{} name '{}' is not a valid DNS-1123 label",
                resource.kind(),
                name
            ));
        }
    }
}

fn check_selectors(set: &ManifestSet, violations: &mut Vec<String>) {
    let service_selector = set.service.spec.as_ref().and_then(|s| s.selector.clone());
    let (deployment_selector, template_labels) = set
        .deployment
        .spec
        .as_ref()
        .map(|s| {
            (
                s.selector.match_labels.clone(),
                s.template.metadata.as_ref().and_then(|m| m.labels.clone()),
            )
        })
        .unwrap_or_default();

    let template_labels = match template_labels {
        Some(labels) if !labels.is_empty() => labels,
        _ => {
            violations.push("pod template has no labels".to_string());
            return;
        }
    };

    if service_selector.as_ref() != Some(&template_labels) {
        violations.push(format!(
            "service selector {:?} does not match pod template labels {:?}",
            service_selector.unwrap_or_default(),
            template_labels
        ));
    }
    if deployment_selector.as_ref() != Some(&template_labels) {
        violations.push(format!(
            "deployment selector {:?} does not match pod template labels {:?}",
            deployment_selector.unwrap_or_default(),
            template_labels
        ));
    }
}

fn check_service_exposure(set: &ManifestSet, violations: &mut Vec<String>) {
    let service_type = set
        .service
        .spec
        .as_ref()
        .and_then(|s| s.type_.as_deref())
        .unwrap_or(SERVICE_TYPE_CLUSTER_IP);
    let expected = if set.ingress.is_some() {
        SERVICE_TYPE_CLUSTER_IP
    } else {
        SERVICE_TYPE_LOAD_BALANCER
    };

    if service_type != expected {
        violations.push(format!(
            "service type is {service_type} but must be {expected} {} an ingress",
            if set.ingress.is_some() { "with" } else { "without" }
        ));
    }
}

fn check_ingress_backends(set: &ManifestSet, violations: &mut Vec<String>) {
    let Some(ingress) = &set.ingress else {
        return;
    };
    let service_name = set.service.metadata.name.clone().unwrap_or_default();
    let service_ports: BTreeSet<i32> = set
        .service
        .spec
        .as_ref()
        .and_then(|s| s.ports.as_ref())
        .map(|ports| ports.iter().map(|p| p.port).collect())
        .unwrap_or_default();

    let paths = ingress
        .spec
        .iter()
        .flat_map(|s| s.rules.iter().flatten())
        .flat_map(|r| r.http.iter().flat_map(|h| h.paths.iter()));

    for path in paths {
        let Some(backend) = path.backend.service.as_ref() else {
            violations.push("ingress path has no service backend".to_string());
            continue;
        };
        if backend.name != service_name {
            violations.push(format!(
                "ingress backend '{}' does not reference service '{}'",
                backend.name, service_name
            ));
        }
        match backend.port.as_ref().and_then(|p| p.number) {
            Some(port) if service_ports.contains(&port) => {}
            other => violations.push(format!(
                "ingress backend port {other:?} is not exposed by service '{service_name}'"
            )),
        }
    }
}

fn check_volumes(set: &ManifestSet, pod: &PodSpec, violations: &mut Vec<String>) {
    let volumes = pod.volumes.clone().unwrap_or_default();
    let volume_names: BTreeSet<&str> = volumes.iter().map(|v| v.name.as_str()).collect();

    let pvc_name = set.pvc.metadata.name.clone().unwrap_or_default();
    let pvc_is_rwo = set
        .pvc
        .spec
        .as_ref()
        .and_then(|s| s.access_modes.as_ref())
        .is_some_and(|modes| modes.iter().any(|m| m == READ_WRITE_ONCE));

    for volume in &volumes {
        if let Some(claim) = &volume.persistent_volume_claim {
            if claim.claim_name != pvc_name {
                violations.push(format!(
                    "volume '{}' references claim '{}' which is not in this set",
                    volume.name, claim.claim_name
                ));
            }
        }
    }

    let mut mounts_rwo = false;
    for container in &pod.containers {
        for mount in container.volume_mounts.iter().flatten() {
            if !volume_names.contains(mount.name.as_str()) {
                violations.push(format!(
                    "container '{}' mounts unknown volume '{}'",
                    container.name, mount.name
                ));
                continue;
            }
            let references_rwo = volumes.iter().any(|v| {
                v.name == mount.name
                    && v.persistent_volume_claim
                        .as_ref()
                        .is_some_and(|c| c.claim_name == pvc_name && pvc_is_rwo)
            });
            mounts_rwo |= references_rwo;
        }
    }

    if mounts_rwo {
        let strategy = set
            .deployment
            .spec
            .as_ref()
            .and_then(|s| s.strategy.as_ref())
            .and_then(|s| s.type_.clone());
        if strategy.as_deref() != Some(RECREATE_STRATEGY) {
            violations.push(format!(
                "deployment mounts a {READ_WRITE_ONCE} claim and must use the {RECREATE_STRATEGY} strategy, found {}",
                strategy.unwrap_or_else(|| "default (RollingUpdate)".to_string())
            ));
        }
    }
}

fn check_probe_hosts(container: &Container, violations: &mut Vec<String>) {
    let probes = [
        container.liveness_probe.as_ref(),
        container.readiness_probe.as_ref(),
        container.startup_probe.as_ref(),
    ];
    let hosts: BTreeSet<Option<&str>> = probes
        .into_iter()
        .flatten()
        .map(probe_host_header)
        .collect();

    if hosts.len() > 1 {
        violations.push(format!(
            "container '{}' probes send different Host headers: {:?}",
            container.name, hosts
        ));
    }
}

fn check_resources(container: &Container, violations: &mut Vec<String>) {
    let Some(resources) = &container.resources else {
        return;
    };
    let (Some(requests), Some(limits)) = (&resources.requests, &resources.limits) else {
        return;
    };

    for (resource, request) in requests {
        let Some(limit) = limits.get(resource) else {
            continue;
        };
        match (parse_quantity(request), parse_quantity(limit)) {
            (Some(req), Some(lim)) if lim < req => violations.push(format!(
                "container '{}' {} limit {} is lower than request {}",
                container.name, resource, limit.0, request.0
            )),
            (None, _) | (_, None) => violations.push(format!(
                "container '{}' has an unparseable {} quantity",
                container.name, resource
            )),
            _ => {}
        }
    }
}

fn parse_quantity(q: &Quantity) -> Option<f64> {
    QuantityUtil::parse_non_negative(&q.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::manifest_config_entity::ManifestConfig;
    use crate::core::schema::kube_resources::{HTTPHeader, VolumeMount};
    use crate::domain::manifest::builder::manifest_builder::build_manifest_set;

    fn ingress_set() -> ManifestSet {
        build_manifest_set(&ManifestConfig {
            pvc_storage_size: "1Gi".into(),
            ingress_host: Some("nextcloud.kube.home".into()),
            enable_ingress: true,
            enable_probes: true,
            ..ManifestConfig::default()
        })
        .unwrap()
    }

    fn pod_mut(set: &mut ManifestSet) -> &mut PodSpec {
        set.deployment
            .spec
            .as_mut()
            .unwrap()
            .template
            .spec
            .as_mut()
            .unwrap()
    }

    fn violations(set: &ManifestSet) -> Vec<String> {
        match verify_manifest_set(set) {
            Err(ManifestError::Invariant(v)) => v,
            other => panic!("expected invariant violations, got {other:?}"),
        }
    }

    #[test]
    fn built_sets_pass() {
        assert!(verify_manifest_set(&build_manifest_set(&ManifestConfig::default()).unwrap()).is_ok());
        assert!(verify_manifest_set(&ingress_set()).is_ok());
    }

    #[test]
    fn mismatched_service_selector_is_caught() {
        let mut set = ingress_set();
        set.service.spec.as_mut().unwrap().selector =
            Some([("app".to_string(), "other".to_string())].into());
        let v = violations(&set);
        assert_eq!(v.len(), 1);
        assert!(v[0].starts_with("service selector"));
    }

    #[test]
    fn rolling_update_with_rwo_claim_is_caught() {
        let mut set = ingress_set();
        set.deployment.spec.as_mut().unwrap().strategy = None;
        let v = violations(&set);
        assert!(v[0].contains("must use the Recreate strategy"));
    }

    #[test]
    fn load_balancer_next_to_ingress_is_caught() {
        let mut set = ingress_set();
        set.service.spec.as_mut().unwrap().type_ = Some("LoadBalancer".into());
        let v = violations(&set);
        assert!(v[0].contains("must be ClusterIP with an ingress"));
    }

    #[test]
    fn unknown_volume_mount_is_caught() {
        let mut set = ingress_set();
        pod_mut(&mut set).containers[1].volume_mounts = Some(vec![VolumeMount {
            name: "scratch".into(),
            mount_path: "/tmp/scratch".into(),
            ..VolumeMount::default()
        }]);
        let v = violations(&set);
        assert!(v[0].contains("mounts unknown volume 'scratch'"));
    }

    #[test]
    fn foreign_claim_reference_is_caught() {
        let mut set = ingress_set();
        pod_mut(&mut set).volumes.as_mut().unwrap()[0]
            .persistent_volume_claim
            .as_mut()
            .unwrap()
            .claim_name = "someone-elses-data".into();
        let v = violations(&set);
        assert!(v.iter().any(|m| m.contains("someone-elses-data")));
    }

    #[test]
    fn diverging_probe_hosts_are_caught() {
        let mut set = ingress_set();
        let probe = pod_mut(&mut set).containers[0].startup_probe.as_mut().unwrap();
        probe.http_get.as_mut().unwrap().http_headers = Some(vec![HTTPHeader {
            name: "Host".into(),
            value: "localhost".into(),
        }]);
        let v = violations(&set);
        assert!(v[0].contains("different Host headers"));
    }

    #[test]
    fn limit_below_request_is_caught() {
        let mut set = ingress_set();
        let resources = pod_mut(&mut set).containers[1].resources.as_mut().unwrap();
        resources
            .limits
            .as_mut()
            .unwrap()
            .insert("memory".into(), Quantity("64Mi".into()));
        let v = violations(&set);
        assert!(v[0].contains("memory limit 64Mi is lower than request 128Mi"));
    }

    #[test]
    fn ingress_pointing_elsewhere_is_caught() {
        let mut set = ingress_set();
        let ingress = set.ingress.as_mut().unwrap();
        let backend = ingress.spec.as_mut().unwrap().rules.as_mut().unwrap()[0]
            .http
            .as_mut()
            .unwrap()
            .paths[0]
            .backend
            .service
            .as_mut()
            .unwrap();
        backend.name = "other-svc".into();
        let v = violations(&set);
        assert!(v[0].contains("does not reference service 'nextcloud-svc'"));
    }

    #[test]
    fn all_violations_are_reported() {
        let mut set = ingress_set();
        set.deployment.spec.as_mut().unwrap().strategy = None;
        set.service.spec.as_mut().unwrap().type_ = Some("LoadBalancer".into());
        assert_eq!(violations(&set).len(), 2);
    }
}
