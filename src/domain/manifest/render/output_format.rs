use serde::{Deserialize, Serialize};

/// Serialization format of emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "yaml")]
    Yaml,
    #[serde(rename = "json")]
    Json,
}

impl OutputFormat {
    pub fn as_code(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_code()
    }
}

/// How documents are split across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputLayout {
    /// One file holding every resource.
    #[default]
    #[serde(rename = "single")]
    Single,
    /// One file per resource.
    #[serde(rename = "per-resource")]
    PerResource,
}

impl OutputLayout {
    pub fn as_code(&self) -> &'static str {
        match self {
            OutputLayout::Single => "single",
            OutputLayout::PerResource => "per-resource",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "single" => Some(OutputLayout::Single),
            "per-resource" | "per_resource" | "split" => Some(OutputLayout::PerResource),
            _ => None,
        }
    }
}
