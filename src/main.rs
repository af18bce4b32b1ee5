mod editor;
mod error;
mod terminal;

use std::io;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use editor::Editor;
use terminal::RawMode;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => die(&err),
    }
}

fn run() -> error::Result<()> {
    let raw_mode = RawMode::enable(io::stdin())?;

    // An error here drops `raw_mode`, which restores the terminal on its own.
    Editor::new(raw_mode.input()?, io::stdout().lock()).run()?;

    raw_mode.restore()
}

fn die(e: &error::Error) -> ExitCode {
    eprintln!("{}", e);
    ExitCode::FAILURE
}
