/// Name of the app container's HTTP port; the service and probes target it by name.
pub const HTTP_PORT_NAME: &str = "http";

pub mod container_builder;
pub mod deployment_builder;
pub mod ingress_builder;
pub mod manifest_builder;
pub mod metadata_builder;
pub mod probe_builder;
pub mod pvc_builder;
pub mod service_builder;
