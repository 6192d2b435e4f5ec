pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::image_pull_policy::ImagePullPolicy;
use crate::domain::manifest::dto::manifest_config_patch_request::ManifestConfigPatchRequest;
use crate::domain::manifest::render::output_format::{OutputFormat, OutputLayout};

#[derive(Debug, Parser)]
#[command(author, version, about = "Synthesizes Kubernetes manifests for a Nextcloud deployment", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML or JSON config file layered over the built-in defaults
    #[arg(short, long, global = true, env = "NEXTCLOUD_K8S_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info", env = "NEXTCLOUD_K8S_LOG_LEVEL")]
    pub log_level: String,

    #[command(flatten)]
    pub overrides: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build, verify and write the manifests
    Synth {
        /// Output directory [default: dist, or NEXTCLOUD_K8S_OUT_DIR]
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml", value_parser = parse_format)]
        format: OutputFormat,
        /// single: one file for the chart; per-resource: one file per resource
        #[arg(short, long, default_value = "single", value_parser = parse_layout)]
        layout: OutputLayout,
    },
    /// Build and verify the manifests, then print them to stdout
    Render {
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml", value_parser = parse_format)]
        format: OutputFormat,
    },
    /// Check the configuration and the resulting manifests without output
    Validate,
    /// Print the effective configuration
    ShowConfig,
}

/// Per-field overrides; each flag can also come from the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    #[arg(long, global = true, env = "NEXTCLOUD_K8S_CHART_NAME")]
    pub chart_name: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_APP_NAME")]
    pub app_name: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_NAMESPACE")]
    pub namespace: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_IMAGE")]
    pub image: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_IMAGE_PULL_POLICY", value_parser = parse_pull_policy)]
    pub image_pull_policy: Option<ImagePullPolicy>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_REPLICAS")]
    pub replicas: Option<i32>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_PVC_STORAGE_SIZE")]
    pub pvc_storage_size: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_PVC_STORAGE_CLASS")]
    pub pvc_storage_class: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_DATA_DIR")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_CONTAINER_PORT")]
    pub container_port: Option<i32>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_SERVICE_PORT")]
    pub service_port: Option<i32>,

    /// Sidecar entrypoint, comma separated (e.g. "php,-f,/var/www/html/cron.php")
    #[arg(long, global = true, env = "NEXTCLOUD_K8S_CRON_COMMAND", value_delimiter = ',')]
    pub cron_command: Option<Vec<String>>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_INGRESS_HOST")]
    pub ingress_host: Option<String>,

    #[arg(long, global = true, env = "NEXTCLOUD_K8S_INGRESS_CLASS_NAME")]
    pub ingress_class_name: Option<String>,

    #[arg(
        long,
        global = true,
        env = "NEXTCLOUD_K8S_ENABLE_INGRESS",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub enable_ingress: Option<bool>,

    #[arg(
        long,
        global = true,
        env = "NEXTCLOUD_K8S_ENABLE_PROBES",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub enable_probes: Option<bool>,
}

impl From<ConfigArgs> for ManifestConfigPatchRequest {
    fn from(args: ConfigArgs) -> Self {
        Self {
            chart_name: args.chart_name,
            app_name: args.app_name,
            namespace: args.namespace,
            image: args.image,
            image_pull_policy: args.image_pull_policy,
            replicas: args.replicas,
            pvc_storage_size: args.pvc_storage_size,
            pvc_storage_class: args.pvc_storage_class,
            data_dir: args.data_dir,
            container_port: args.container_port,
            service_port: args.service_port,
            cron_command: args.cron_command,
            ingress_host: args.ingress_host,
            ingress_class_name: args.ingress_class_name,
            enable_ingress: args.enable_ingress,
            enable_probes: args.enable_probes,
        }
    }
}

fn parse_pull_policy(value: &str) -> Result<ImagePullPolicy, String> {
    ImagePullPolicy::from_code(value)
        .ok_or_else(|| format!("unknown pull policy '{value}' (Always, IfNotPresent, Never)"))
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_code(value).ok_or_else(|| format!("unknown format '{value}' (yaml, json)"))
}

fn parse_layout(value: &str) -> Result<OutputLayout, String> {
    OutputLayout::from_code(value)
        .ok_or_else(|| format!("unknown layout '{value}' (single, per-resource)"))
}

/// Serializes tests that parse the CLI, since clap reads `NEXTCLOUD_K8S_*`
/// variables at parse time.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
