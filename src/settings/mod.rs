use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

pub const DEFAULT_SCALE: f32 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "bzen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspects the assets and worlds of a game installation")]
pub struct CliArgs {
    #[arg(long, env = "BZEN_GAME_DIR", default_value_t = default_game_dir())]
    pub game_dir: String,

    /// -v warnings, -vv info, -vvv debug. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Duplicate the log into this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub operation_mode: OperationMode,
}

pub fn default_game_dir() -> String {
    std::env::current_dir()
        .map(|dir| dir.to_string_lossy().to_string())
        .unwrap_or_else(|_| ".".to_string())
}

#[derive(Subcommand, Debug)]
pub enum OperationMode {
    /// Build the asset index and print statistics
    Index {
        /// Print every indexed key with its source
        #[arg(long)]
        list: bool,
    },
    /// List the files of a .vdf archive
    Archive { path: PathBuf },
    /// Resolve a world name (`v:NEWWORLD.ZEN`, `w:NEWWORLD.ZEN`, a file name or a path)
    Locate { world: String },
}

/// Settings of a single conversion run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConversionSettings {
    /// Engine units to target units, the engine works in centimeters
    pub scale: f32,
    /// Convert the waypoints into marker objects
    pub waynet: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            waynet: false,
        }
    }
}

pub fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Writes to stderr and a log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()?;
        self.file.flush()
    }
}

pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(verbosity_level(verbosity));
    builder.parse_default_env();

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(TeeWriter { file })));
    }

    builder.try_init()?;
    Ok(())
}
