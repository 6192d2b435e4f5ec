pub mod manifest_fs_adapter;
pub mod manifest_output_adapter_trait;
