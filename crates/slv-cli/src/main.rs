/// slv command-line tool: look inside little-endian binary files through the
/// `slv-stream` decoders.
///
/// # Command overview
///
/// ```text
/// slv <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Decode fields described by a JSON layout manifest
///   strings    List the nul-terminated strings packed in a file
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log stream activity (debug level) to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                    |
/// |------|--------------------------------------------|
/// | 0    | Success                                    |
/// | 1    | Error (I/O failure, truncated data, etc.)  |
///
/// All error details are written to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the level picked by `--verbose`.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_inspect;
mod cmd_strings;
mod layout;
mod source;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Inspect little-endian binary files field by field.
#[derive(Parser)]
#[command(name = "slv", version, about = "Binary stream inspection tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log stream activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode fields described by a JSON layout manifest.
    Inspect(InspectArgs),
    /// List the nul-terminated strings packed in a file.
    Strings(StringsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Input selection shared by every command.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────────────────────┐
/// │ Flag          │ Effect                                               │
/// ├───────────────┼──────────────────────────────────────────────────────┤
/// │ --memory      │ Load the whole file, decode from a memory stream     │
/// │ --chunk-size  │ String buffer growth step (default 32)               │
/// │ --buffer-size │ File read buffer capacity (default 8192)             │
/// └───────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct StreamArgs {
    /// Path to the binary file.
    pub file: PathBuf,

    /// Read the file into memory first and decode from the memory backend.
    #[arg(long)]
    pub memory: bool,

    /// Growth step of the string decoder, in bytes.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Capacity of the buffered file reader, in bytes.
    #[arg(long)]
    pub buffer_size: Option<usize>,
}

/// Arguments for `slv inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: StreamArgs,

    /// JSON layout manifest describing the fields to decode.
    #[arg(short, long)]
    pub layout: PathBuf,

    /// Echo every underlying read (offset, length, hex preview) to stderr.
    #[arg(long)]
    pub trace: bool,

    /// Print the decoded fields as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `slv strings`.
#[derive(clap::Args)]
pub struct StringsArgs {
    #[command(flatten)]
    pub input: StreamArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Strings(args) => cmd_strings::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
