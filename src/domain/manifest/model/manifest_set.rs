use kube::ResourceExt;
use serde::{Serialize, Serializer};

use crate::core::schema::kube_resources::{Deployment, Ingress, PersistentVolumeClaim, Service};

/// The resources produced by one synthesis run.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSet {
    pub service: Service,
    pub pvc: PersistentVolumeClaim,
    pub deployment: Deployment,
    pub ingress: Option<Ingress>,
}

impl ManifestSet {
    /// Resources in emission order: Service, PVC, Deployment, then Ingress.
    pub fn resources(&self) -> Vec<ManifestResource<'_>> {
        let mut out = vec![
            ManifestResource::Service(&self.service),
            ManifestResource::PersistentVolumeClaim(&self.pvc),
            ManifestResource::Deployment(&self.deployment),
        ];
        if let Some(ingress) = &self.ingress {
            out.push(ManifestResource::Ingress(ingress));
        }
        out
    }
}

/// A borrowed view of one resource in a `ManifestSet`.
#[derive(Debug, Clone, Copy)]
pub enum ManifestResource<'a> {
    Service(&'a Service),
    PersistentVolumeClaim(&'a PersistentVolumeClaim),
    Deployment(&'a Deployment),
    Ingress(&'a Ingress),
}

impl ManifestResource<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => <Service as k8s_openapi::Resource>::KIND,
            Self::PersistentVolumeClaim(_) => <PersistentVolumeClaim as k8s_openapi::Resource>::KIND,
            Self::Deployment(_) => <Deployment as k8s_openapi::Resource>::KIND,
            Self::Ingress(_) => <Ingress as k8s_openapi::Resource>::KIND,
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            Self::Service(_) => <Service as k8s_openapi::Resource>::API_VERSION,
            Self::PersistentVolumeClaim(_) => <PersistentVolumeClaim as k8s_openapi::Resource>::API_VERSION,
            Self::Deployment(_) => <Deployment as k8s_openapi::Resource>::API_VERSION,
            Self::Ingress(_) => <Ingress as k8s_openapi::Resource>::API_VERSION,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Service(r) => r.name_any(),
            Self::PersistentVolumeClaim(r) => r.name_any(),
            Self::Deployment(r) => r.name_any(),
            Self::Ingress(r) => r.name_any(),
        }
    }
}

impl Serialize for ManifestResource<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Service(r) => r.serialize(serializer),
            Self::PersistentVolumeClaim(r) => r.serialize(serializer),
            Self::Deployment(r) => r.serialize(serializer),
            Self::Ingress(r) => r.serialize(serializer),
        }
    }
}
