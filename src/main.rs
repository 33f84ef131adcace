//! Binary entrypoint for the `driverkit` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    match driverkit::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
