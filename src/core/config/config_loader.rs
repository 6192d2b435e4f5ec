use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::ManifestError;

use super::manifest_config_entity::ManifestConfig;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "NEXTCLOUD_K8S_";

/// Loads the base configuration: built-in defaults, or the given YAML/JSON
/// file layered over them. Missing keys keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<ManifestConfig, ManifestError> {
    let Some(path) = path else {
        debug!("No config file given, using built-in defaults");
        return Ok(ManifestConfig::default());
    };

    let raw = fs::read_to_string(path).map_err(|e| {
        ManifestError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    // JSON is valid YAML, so one parser covers both
    let cfg: ManifestConfig = if raw.trim().is_empty() {
        ManifestConfig::default()
    } else {
        serde_yaml::from_str(&raw).map_err(|e| {
            ManifestError::Config(format!("failed to parse {}: {e}", path.display()))
        })?
    };

    debug!("Loaded config from {}", path.display());
    Ok(cfg)
}

/// Result of looking for a `.env` file. Kept around so it can be logged once
/// the subscriber is installed.
#[derive(Debug, PartialEq, Eq)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Unreadable(String),
}

impl DotenvOutcome {
    fn classify(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::NotFound,
            Err(e) => Self::Unreadable(e.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => debug!("Loaded environment from {}", path.display()),
            Self::NotFound => debug!("No .env file found"),
            Self::Unreadable(e) => warn!("Ignoring unreadable .env file: {e}"),
        }
    }
}

/// Loads `.env` from the working directory when present so `ENV_PREFIX`
/// variables can be kept next to the chart.
pub fn load_dotenv() -> DotenvOutcome {
    DotenvOutcome::classify(dotenvy::dotenv())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, ErrorKind, Write};

    #[test]
    fn no_path_yields_defaults() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg, ManifestConfig::default());
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "app_name: files\npvc_storage_size: 1Gi\nenable_ingress: true\ningress_host: files.kube.home"
        )
        .unwrap();

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.app_name, "files");
        assert_eq!(cfg.pvc_storage_size, "1Gi");
        assert!(cfg.enable_ingress);
        assert_eq!(cfg.image, "nextcloud:apache");
    }

    #[test]
    fn json_file_is_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"replicas": 1, "probe": {{"path": "/healthz"}}}}"#).unwrap();

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.probe.path, "/healthz");
        assert_eq!(cfg.probe.period_seconds, 10);
    }

    #[test]
    fn unknown_type_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "replicas: many").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ManifestError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/nextcloud.yaml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn dotenv_outcome_separates_missing_from_unreadable() {
        let loaded = DotenvOutcome::classify(Ok(PathBuf::from("/srv/chart/.env")));
        assert_eq!(loaded, DotenvOutcome::Loaded(PathBuf::from("/srv/chart/.env")));

        let missing = DotenvOutcome::classify(Err(dotenvy::Error::Io(io::Error::from(
            ErrorKind::NotFound,
        ))));
        assert_eq!(missing, DotenvOutcome::NotFound);

        let denied = DotenvOutcome::classify(Err(dotenvy::Error::Io(io::Error::from(
            ErrorKind::PermissionDenied,
        ))));
        assert!(matches!(denied, DotenvOutcome::Unreadable(_)));
    }
}
