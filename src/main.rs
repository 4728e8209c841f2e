use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use clap::Parser;

use deskshell::cli::Cli;
use deskshell::constants::POLL_INTERVAL_MS;
use deskshell::drivers::OutputDriver;
use deskshell::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use deskshell::error::Result;
use deskshell::runner::{DesktopApp, run_desktop};
use deskshell::tracing_sub;

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log_file.as_deref(), cli.verbose)?;

    let (width, height) = crossterm::terminal::size()?;
    let config = cli.shell_config(width, height)?;
    tracing::debug!(?config, "starting desktop");

    let mut app = DesktopApp::new(config);
    for &id in &cli.open {
        app.shell_mut().open(id);
    }

    let mut output = ConsoleOutputDriver::new()?;
    let mut input = ConsoleInputDriver::new();
    output.enter()?;
    let result = run_desktop(
        output.terminal_mut(),
        &mut input,
        &mut app,
        Duration::from_millis(POLL_INTERVAL_MS),
    );
    output.exit()?;
    result?;

    if let Some(path) = &cli.snapshot {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &app.shell().snapshot())?;
        tracing::debug!(path = %path.display(), "wrote snapshot");
    }
    Ok(())
}
