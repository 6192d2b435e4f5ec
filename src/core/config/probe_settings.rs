use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// HTTP health check timing shared by liveness, readiness and startup probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProbeSettings {
    #[validate(custom(function = "validate_http_path"))]
    pub path: String,
    #[validate(range(min = 0))]
    pub initial_delay_seconds: i32,
    #[validate(range(min = 1))]
    pub period_seconds: i32,
    #[validate(range(min = 1))]
    pub timeout_seconds: i32,
    #[validate(range(min = 1))]
    pub success_threshold: i32,
    #[validate(range(min = 1))]
    pub failure_threshold: i32,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            path: "/status.php".into(),
            initial_delay_seconds: 10,
            period_seconds: 10,
            timeout_seconds: 5,
            success_threshold: 1,
            failure_threshold: 3,
        }
    }
}

fn validate_http_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') && !path.contains(char::is_whitespace) {
        Ok(())
    } else {
        Err(ValidationError::new("http_path")
            .with_message(format!("probe path '{path}' must start with '/'").into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_status_page() {
        let settings = ProbeSettings::default();
        assert_eq!(settings.path, "/status.php");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_zero_period_and_relative_path() {
        let settings = ProbeSettings {
            path: "status.php".into(),
            period_seconds: 0,
            ..ProbeSettings::default()
        };
        let errors = settings.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("path"));
        assert!(fields.contains_key("period_seconds"));
    }
}
