use rdstation_cli::commands::{Cli, run};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rdstation-cli [{}]: {e}", e.category());
            e.exit_code()
        }
    }
}
