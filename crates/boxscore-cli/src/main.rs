use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = boxscore_cli::Cli::parse();
    match boxscore_cli::run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(boxscore_cli::exit_code(&err))
        }
    }
}
