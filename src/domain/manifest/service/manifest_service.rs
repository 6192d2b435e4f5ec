use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::persistence::manifest::manifest_fs_adapter::ManifestFsAdapter;
use crate::core::persistence::manifest::manifest_output_adapter_trait::ManifestOutputAdapterTrait;
use crate::domain::manifest::builder::manifest_builder::build_manifest_set;
use crate::domain::manifest::model::manifest_set::ManifestSet;
use crate::domain::manifest::render::manifest_renderer::{render_manifest_set, RenderedDocument};
use crate::domain::manifest::render::output_format::{OutputFormat, OutputLayout};
use crate::domain::manifest::validation::manifest_invariants::verify_manifest_set;

/// Validates the config, builds the resources and checks cross-resource invariants.
pub fn prepare_manifest_set(cfg: &ManifestConfig) -> Result<ManifestSet> {
    let set = build_manifest_set(cfg).context("Failed to build manifests")?;
    verify_manifest_set(&set).context("Built manifests are inconsistent")?;
    Ok(set)
}

/// Full pipeline short of writing: every document is serialized in memory.
pub fn render_manifests(
    cfg: &ManifestConfig,
    format: OutputFormat,
    layout: OutputLayout,
) -> Result<Vec<RenderedDocument>> {
    let set = prepare_manifest_set(cfg)?;
    let docs = render_manifest_set(&set, &cfg.chart_name, format, layout)
        .context("Failed to serialize manifests")?;
    Ok(docs)
}

/// Synthesizes the chart into `out_dir`.
pub fn synth_manifests(
    cfg: &ManifestConfig,
    out_dir: &Path,
    format: OutputFormat,
    layout: OutputLayout,
) -> Result<Vec<PathBuf>> {
    let adapter = ManifestFsAdapter::new(out_dir);
    synth_manifests_with_adapter(&adapter, cfg, format, layout)
}

fn synth_manifests_with_adapter<A: ManifestOutputAdapterTrait>(
    adapter: &A,
    cfg: &ManifestConfig,
    format: OutputFormat,
    layout: OutputLayout,
) -> Result<Vec<PathBuf>> {
    let docs = render_manifests(cfg, format, layout)?;
    let written = adapter.write_all(&docs)?;

    info!(
        "Synthesized chart '{}' into {} file(s)",
        cfg.chart_name,
        written.len()
    );
    Ok(written)
}
