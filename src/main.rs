mod allocator;

use std::process::ExitCode;

use crypto_cli::app::{App, init_logging};
use crypto_cli::settings::Settings;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("failed to initialise logging: {err:#}");
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(settings, tokio::io::stdout());
    app.run(std::env::args_os().skip(1)).await
}
