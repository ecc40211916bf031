mod app;

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match app::run() {
        Ok(result) => {
            if !result.failures.is_empty() {
                log::warn!(
                    "{} file(s) could not be read; see warnings above",
                    result.failures.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
