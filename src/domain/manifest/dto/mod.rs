pub mod manifest_config_patch_request;
