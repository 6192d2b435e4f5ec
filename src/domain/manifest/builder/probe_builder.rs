use crate::core::config::probe_settings::ProbeSettings;
use crate::core::schema::kube_resources::{HTTPGetAction, HTTPHeader, IntOrString, Probe};

use super::HTTP_PORT_NAME;

/// The liveness, readiness and startup probes attached to the app container.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthProbes {
    pub liveness: Probe,
    pub readiness: Probe,
    pub startup: Probe,
}

/// HTTP GET probe against the named `http` port. The web server rejects
/// requests whose Host header is not a trusted domain, so `host` is sent
/// explicitly.
pub fn build_http_probe(settings: &ProbeSettings, host: &str) -> Probe {
    Probe {
        http_get: Some(HTTPGetAction {
            path: Some(settings.path.clone()),
            port: IntOrString::String(HTTP_PORT_NAME.to_string()),
            http_headers: Some(vec![HTTPHeader {
                name: "Host".to_string(),
                value: host.to_string(),
            }]),
            ..HTTPGetAction::default()
        }),
        initial_delay_seconds: Some(settings.initial_delay_seconds),
        period_seconds: Some(settings.period_seconds),
        timeout_seconds: Some(settings.timeout_seconds),
        success_threshold: Some(settings.success_threshold),
        failure_threshold: Some(settings.failure_threshold),
        ..Probe::default()
    }
}

pub fn build_health_probes(settings: &ProbeSettings, host: &str) -> HealthProbes {
    let probe = build_http_probe(settings, host);
    HealthProbes {
        liveness: probe.clone(),
        readiness: probe.clone(),
        startup: probe,
    }
}

/// Value of the `Host` header a probe sends, if any.
pub fn probe_host_header(probe: &Probe) -> Option<&str> {
    probe
        .http_get
        .as_ref()?
        .http_headers
        .as_ref()?
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("host"))
        .map(|h| h.value.as_str())
}
