pub mod manifest;
pub mod storage_path;
