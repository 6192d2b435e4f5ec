pub mod manifest_set;
pub mod resource_names;
