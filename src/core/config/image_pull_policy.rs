use serde::{Deserialize, Serialize};

/// Container image pull policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImagePullPolicy {
    Always,
    #[default]
    IfNotPresent,
    Never,
}

impl ImagePullPolicy {
    pub fn as_code(&self) -> &'static str {
        match self {
            ImagePullPolicy::Always => "Always",
            ImagePullPolicy::IfNotPresent => "IfNotPresent",
            ImagePullPolicy::Never => "Never",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ALWAYS" => Some(ImagePullPolicy::Always),
            "IFNOTPRESENT" | "IF-NOT-PRESENT" | "IF_NOT_PRESENT" => Some(ImagePullPolicy::IfNotPresent),
            "NEVER" => Some(ImagePullPolicy::Never),
            _ => None,
        }
    }
}
