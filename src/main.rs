use clap::Parser;
use pencilbox::cli::{self, Cli};
use pencilbox::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = init_logging(args.log_format) {
        eprintln!("Failed to initialise logging: {e}");
    }
    tracing::debug!("pencilbox {} built {}", pencilbox::VERSION, pencilbox::BUILD_DATE);

    match cli::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = cli::exit_code(&e);
            if code == cli::EXIT_DOES_NOT_FIT {
                eprintln!("Try smaller dimensions, thinner material or more sheets.");
            }
            ExitCode::from(code as u8)
        }
    }
}
