use std::io::Write;

use anyhow::{Context, Result};
use kube::ResourceExt;
use tracing::info;
use validator::Validate;

use crate::core::config::config_loader::load_config;
use crate::core::config::manifest_config_entity::ManifestConfig;
use crate::core::persistence::storage_path::default_output_dir;
use crate::domain::manifest::render::output_format::OutputLayout;
use crate::domain::manifest::service::manifest_service::{
    prepare_manifest_set, render_manifests, synth_manifests,
};

use super::{Cli, Commands};

/// Merges file, environment and flag configuration, then runs the command.
pub fn run(cli: Cli) -> Result<()> {
    let cfg = effective_config(&cli)?;

    match cli.command {
        Commands::Synth { out, format, layout } => {
            let out_dir = out.unwrap_or_else(default_output_dir);
            let written = synth_manifests(&cfg, &out_dir, format, layout)?;
            for path in written {
                info!("Wrote {}", path.display());
            }
        }
        Commands::Render { format } => {
            let docs = render_manifests(&cfg, format, OutputLayout::Single)?;
            let mut stdout = std::io::stdout().lock();
            for doc in docs {
                stdout.write_all(doc.contents.as_bytes())?;
            }
            stdout.flush()?;
        }
        Commands::Validate => {
            let set = prepare_manifest_set(&cfg)?;
            println!("Configuration for '{}' is valid:", cfg.app_name);
            for resource in set.resources() {
                println!("  {} {} ({})", resource.kind(), resource.name(), resource.api_version());
            }
            let service_type = set
                .service
                .spec
                .as_ref()
                .and_then(|s| s.type_.clone())
                .unwrap_or_default();
            println!(
                "  exposure: {} via {}",
                set.service.name_any(),
                if set.ingress.is_some() { "Ingress" } else { service_type.as_str() }
            );
        }
        Commands::ShowConfig => {
            if let Err(e) = cfg.validate() {
                tracing::warn!("Effective configuration is invalid: {e}");
            }
            let yaml = serde_yaml::to_string(&cfg).context("Failed to serialize configuration")?;
            print!("{yaml}");
        }
    }

    Ok(())
}

fn effective_config(cli: &Cli) -> Result<ManifestConfig> {
    let mut cfg = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cfg.apply_update(cli.overrides.clone().into());
    Ok(cfg)
}
