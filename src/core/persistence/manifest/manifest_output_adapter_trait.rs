use std::path::PathBuf;

use anyhow::Result;

use crate::domain::manifest::render::manifest_renderer::RenderedDocument;

/// Destination for rendered manifests.
pub trait ManifestOutputAdapterTrait {
    /// Writes every document or none of them; returns the written paths.
    fn write_all(&self, docs: &[RenderedDocument]) -> Result<Vec<PathBuf>>;
}
