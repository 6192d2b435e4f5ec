pub mod manifest_parser;
pub mod manifest_renderer;
pub mod output_format;
