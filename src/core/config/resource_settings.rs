use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::core::util::quantity_util::QuantityUtil;

/// CPU and memory requests/limits for one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_limits_cover_requests", skip_on_field_errors = false))]
pub struct ResourceSettings {
    #[validate(custom(function = "validate_quantity"))]
    pub cpu_request: String,
    #[validate(custom(function = "validate_quantity"))]
    pub cpu_limit: String,
    #[validate(custom(function = "validate_quantity"))]
    pub memory_request: String,
    #[validate(custom(function = "validate_quantity"))]
    pub memory_limit: String,
}

impl ResourceSettings {
    /// Requests equal to limits (Guaranteed QoS), the way the chart sizes both containers.
    pub fn guaranteed(cpu: &str, memory: &str) -> Self {
        Self {
            cpu_request: cpu.into(),
            cpu_limit: cpu.into(),
            memory_request: memory.into(),
            memory_limit: memory.into(),
        }
    }

    /// Main application container.
    pub fn app_default() -> Self {
        Self::guaranteed("1", "1Gi")
    }

    /// Background-jobs sidecar.
    pub fn cron_default() -> Self {
        Self::guaranteed("100m", "128Mi")
    }
}

/// Partial resource block from a config file; unset keys keep the container's default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResourceSettingsOverride {
    cpu_request: Option<String>,
    cpu_limit: Option<String>,
    memory_request: Option<String>,
    memory_limit: Option<String>,
}

impl ResourceSettingsOverride {
    fn merge_into(self, mut base: ResourceSettings) -> ResourceSettings {
        if let Some(v) = self.cpu_request {
            base.cpu_request = v;
        }
        if let Some(v) = self.cpu_limit {
            base.cpu_limit = v;
        }
        if let Some(v) = self.memory_request {
            base.memory_request = v;
        }
        if let Some(v) = self.memory_limit {
            base.memory_limit = v;
        }
        base
    }
}

pub(crate) fn deserialize_app_resources<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ResourceSettings, D::Error> {
    Ok(ResourceSettingsOverride::deserialize(deserializer)?.merge_into(ResourceSettings::app_default()))
}

pub(crate) fn deserialize_cron_resources<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ResourceSettings, D::Error> {
    Ok(ResourceSettingsOverride::deserialize(deserializer)?.merge_into(ResourceSettings::cron_default()))
}

pub(crate) fn validate_quantity(value: &str) -> Result<(), ValidationError> {
    if QuantityUtil::parse_non_negative(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("quantity")
            .with_message(format!("'{value}' is not a valid resource quantity").into()))
    }
}

fn validate_limits_cover_requests(settings: &ResourceSettings) -> Result<(), ValidationError> {
    let pairs = [
        ("cpu", &settings.cpu_request, &settings.cpu_limit),
        ("memory", &settings.memory_request, &settings.memory_limit),
    ];

    for (resource, request, limit) in pairs {
        // Unparseable values are already reported by the field validators
        let (Some(req), Some(lim)) = (
            QuantityUtil::parse_non_negative(request),
            QuantityUtil::parse_non_negative(limit),
        ) else {
            continue;
        };

        if lim < req {
            return Err(ValidationError::new("limit_below_request").with_message(
                format!("{resource} limit {limit} is lower than request {request}").into(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ResourceSettings::app_default().validate().is_ok());
        assert!(ResourceSettings::cron_default().validate().is_ok());
    }

    #[test]
    fn limit_lower_than_request_is_rejected() {
        let settings = ResourceSettings {
            cpu_request: "500m".into(),
            cpu_limit: "250m".into(),
            memory_request: "128Mi".into(),
            memory_limit: "128Mi".into(),
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("cpu limit 250m is lower than request 500m"));
    }

    #[test]
    fn mixed_units_are_compared_by_value() {
        let settings = ResourceSettings {
            cpu_request: "1".into(),
            cpu_limit: "1500m".into(),
            memory_request: "1G".into(),
            memory_limit: "1Gi".into(),
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn limit_check_still_runs_next_to_a_malformed_field() {
        let settings = ResourceSettings {
            cpu_request: "1".into(),
            cpu_limit: "500m".into(),
            memory_request: "1Gi".into(),
            memory_limit: "lots".into(),
        };
        let err = settings.validate().unwrap_err();
        let message = err.to_string();
        assert!(err.field_errors().contains_key("memory_limit"));
        assert!(message.contains("cpu limit 500m is lower than request 1"), "{message}");
    }

    #[test]
    fn partial_block_merges_into_matching_default() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_app_resources")]
            app: ResourceSettings,
            #[serde(deserialize_with = "deserialize_cron_resources")]
            cron: ResourceSettings,
        }

        let holder: Holder =
            serde_yaml::from_str("app:\n  cpu_limit: \"2\"\ncron:\n  memory_limit: 256Mi\n").unwrap();
        assert_eq!(holder.app.cpu_limit, "2");
        assert_eq!(holder.app.cpu_request, "1");
        assert_eq!(holder.app.memory_limit, "1Gi");
        assert_eq!(holder.cron.memory_limit, "256Mi");
        assert_eq!(holder.cron.cpu_limit, "100m");
    }

    #[test]
    fn malformed_quantity_is_reported_on_the_field() {
        let mut settings = ResourceSettings::app_default();
        settings.memory_limit = "lots".into();
        let err = settings.validate().unwrap_err();
        assert!(err.field_errors().contains_key("memory_limit"));
    }
}
