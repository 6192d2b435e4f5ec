//! Synthesizes the Kubernetes manifests (Service, PersistentVolumeClaim,
//! Deployment, optional Ingress) for a single Nextcloud deployment.

pub mod api;
pub mod core;
pub mod domain;
pub mod errors;

pub use crate::core::config::manifest_config_entity::ManifestConfig;
pub use crate::domain::manifest::builder::manifest_builder::build_manifest_set;
pub use crate::domain::manifest::model::manifest_set::{ManifestResource, ManifestSet};
pub use crate::domain::manifest::render::manifest_parser::parse_manifest_stream;
pub use crate::domain::manifest::validation::manifest_invariants::verify_manifest_set;
pub use crate::errors::ManifestError;
