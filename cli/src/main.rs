use clap::Parser;
use presentation::cli::{Cli, CliApp};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    shared::logging::init(cli.verbose)?;
    let mut app = CliApp::new(&cli)?;
    let code = app.run(cli).await?;
    Ok(code)
}
