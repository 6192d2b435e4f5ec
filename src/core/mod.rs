pub mod config;
pub mod logging;
pub mod persistence;
pub mod schema;
pub mod util;
