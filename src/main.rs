use std::process::ExitCode;

use roi_marker::app;
use roi_marker::config::AnnotatorConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Ctrl+C handler
    ctrlc::set_handler(|| {
        log::warn!("interrupted, discarding the current session");
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    let config = AnnotatorConfig::from_args(std::env::args().skip(1));
    match app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
