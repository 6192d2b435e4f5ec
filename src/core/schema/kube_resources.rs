/// Re-export the k8s-openapi types the builders assemble.
/// Pinned API groups: core/v1, apps/v1, networking.k8s.io/v1.

pub use k8s_openapi::api::core::v1::{
    Container,
    ContainerPort,
    HTTPGetAction,
    HTTPHeader,
    PersistentVolumeClaim,
    PersistentVolumeClaimSpec,
    PersistentVolumeClaimVolumeSource,
    PodSpec,
    PodTemplateSpec,
    Probe,
    ResourceRequirements,
    Service,
    ServicePort,
    ServiceSpec,
    Volume,
    VolumeMount,
    VolumeResourceRequirements,
};

pub use k8s_openapi::api::apps::v1::{
    Deployment,
    DeploymentSpec,
    DeploymentStrategy,
};

pub use k8s_openapi::api::networking::v1::{
    HTTPIngressPath,
    HTTPIngressRuleValue,
    Ingress,
    IngressBackend,
    IngressRule,
    IngressServiceBackend,
    IngressSpec,
    ServiceBackendPort,
};

pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector,
    ObjectMeta,
};

pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Access mode that pins a claim to a single node.
pub const READ_WRITE_ONCE: &str = "ReadWriteOnce";

/// Deployment strategy that stops the old pod before starting the new one.
pub const RECREATE_STRATEGY: &str = "Recreate";

pub const SERVICE_TYPE_CLUSTER_IP: &str = "ClusterIP";
pub const SERVICE_TYPE_LOAD_BALANCER: &str = "LoadBalancer";

pub const PROTOCOL_TCP: &str = "TCP";
