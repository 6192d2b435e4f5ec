use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use nextcloud_k8s::api::cli::{commands, Cli};
use nextcloud_k8s::core::config::config_loader::load_dotenv;
use nextcloud_k8s::core::logging::init_tracing;

fn main() -> ExitCode {
    // .env must be loaded before clap reads env-bound flags
    let dotenv = load_dotenv();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    dotenv.log();

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
