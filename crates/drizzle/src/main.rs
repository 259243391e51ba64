use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use drizzle_config::Config;
use ratatui::DefaultTerminal;
use tracing_subscriber::EnvFilter;

mod engine;
mod rain;

use engine::EngineApp;
use rain::RainApp;

/// Rain clouds and a piston engine, animated in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Place clouds with the mouse and tune their rain.
    Rain,
    /// Watch pistons ride on a crankshaft.
    Engine,
    /// Print the effective settings as TOML.
    Config {
        /// Also write them to the settings file.
        #[arg(long)]
        write: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging()?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Rain => run_tui(|terminal| RainApp::new(config.rain).run(terminal)),
        Command::Engine => run_tui(|terminal| EngineApp::new(config.engine).run(terminal)),
        Command::Config { write } => {
            print!("{}", config.to_toml()?);
            if write {
                let path = write_target(cli.config, Config::default_path())?;
                config.save_to(&path)?;
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}

/// Where `config --write` saves: the explicit path, else the platform default.
fn write_target(
    explicit: Option<PathBuf>,
    default: Option<PathBuf>,
) -> color_eyre::Result<PathBuf> {
    explicit
        .or(default)
        .ok_or_else(|| eyre!("no settings file location on this platform; pass --config PATH"))
}

/// Run an app on the alternate screen with mouse capture, restoring the
/// terminal whatever the outcome.
fn run_tui<F>(app: F) -> color_eyre::Result<()>
where
    F: FnOnce(DefaultTerminal) -> color_eyre::Result<()>,
{
    let terminal = ratatui::init();
    let result = crossterm::execute!(io::stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| app(terminal));
    if let Err(err) = crossterm::execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(%err, "failed to release mouse capture");
    }
    ratatui::restore();
    result
}

/// Log to a file in the data directory when `RUST_LOG` is set; the terminal
/// belongs to the UI.
fn init_logging() -> color_eyre::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let Some(path) = Config::log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_without_location_fails() {
        let err = write_target(None, None).unwrap_err();
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn test_write_prefers_explicit_path() {
        let explicit = PathBuf::from("/tmp/mine.toml");
        let default = PathBuf::from("/home/user/.config/drizzle/config.toml");
        assert_eq!(
            write_target(Some(explicit.clone()), Some(default.clone())).unwrap(),
            explicit
        );
        assert_eq!(write_target(None, Some(default.clone())).unwrap(), default);
    }
}
