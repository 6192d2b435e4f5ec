use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Manifest invariant violated: {}", .0.join("; "))]
    Invariant(Vec<String>),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Helper for mapping any serializer error into a serialization error
pub fn serialization_error<E: ToString>(err: E) -> ManifestError {
    ManifestError::Serialization(err.to_string())
}

/// Helper for mapping any deserializer error into a parse error
pub fn parse_error<E: ToString>(err: E) -> ManifestError {
    ManifestError::Parse(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_message_lists_every_violation() {
        let err = ManifestError::Invariant(vec!["first".into(), "second".into()]);
        assert_eq!(
            err.to_string(),
            "Manifest invariant violated: first; second"
        );
    }

    #[test]
    fn helpers_keep_source_message() {
        let err = serialization_error("bad map key");
        assert!(matches!(err, ManifestError::Serialization(ref m) if m == "bad map key"));
        let err = parse_error("missing kind");
        assert_eq!(err.to_string(), "Parse error: missing kind");
    }
}
