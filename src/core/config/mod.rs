pub mod config_loader;
pub mod image_pull_policy;
pub mod manifest_config_entity;
pub mod probe_settings;
pub mod resource_settings;
