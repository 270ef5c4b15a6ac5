// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use karaoke_vtt::app_config::{self, Config};
use karaoke_vtt::app_controller::{parse_time_arg, Controller};
use karaoke_vtt::vtt::format_timestamp;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a subtitle file, or every .vtt file under a directory, and report
    Check {
        /// Subtitle file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Show the karaoke line displayed at a given time
    At {
        /// Subtitle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Playback position, as HH:MM:SS.mmm or milliseconds
        #[arg(short, long)]
        time: String,
    },

    /// Write the parsed cues as JSON
    Export {
        /// Subtitle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <stem>.cues.json next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of an existing output file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Play the karaoke line against a real-time clock
    Play {
        /// Subtitle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Playback speed (0.5, 0.75 or 1.0)
        #[arg(short, long)]
        rate: Option<f32>,

        /// Stop after this many milliseconds (default: end of the last cue)
        #[arg(short, long)]
        duration: Option<u64>,
    },

    /// Generate shell completions for karaoke-vtt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// karaoke-vtt - strict WebVTT karaoke cue tool
///
/// Parses WebVTT files whose cues mark the spoken word with <b>…</b> and
/// shows the spoken/pending split at any playback position.
#[derive(Parser, Debug)]
#[command(name = "karaoke-vtt")]
#[command(version)]
#[command(about = "Strict WebVTT karaoke cue tool")]
#[command(long_about = "karaoke-vtt parses karaoke WebVTT files and answers which cue is shown at a given time.

EXAMPLES:
    karaoke-vtt check song.vtt                  # Validate one file
    karaoke-vtt check lyrics/                   # Validate every .vtt file in a directory
    karaoke-vtt at song.vtt -t 00:00:38.850     # Show the line at 38.85s
    karaoke-vtt export song.vtt -o song.json    # Dump the cues as JSON
    karaoke-vtt play song.vtt -r 0.75           # Play the line at three-quarter speed
    karaoke-vtt completions bash > kvtt.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
// Filtering is left to `log::max_level`, which changes after the config loads.
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {:<5} {}\x1B[0m", color, now, record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "karaoke-vtt", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Check { path } => run_check(&controller, &path),
        Commands::At { file, time } => run_at(&controller, &file, &time),
        Commands::Export {
            file,
            output,
            force_overwrite,
        } => {
            controller.export_json(&file, output, force_overwrite)?;
            Ok(())
        }
        Commands::Play { file, rate, duration } => controller.play(&file, rate, duration).await,
        Commands::Completions { .. } => unreachable!("completions are generated before the config loads"),
    }
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    // Command line wins over the config file
    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn run_check(controller: &Controller, path: &Path) -> Result<()> {
    if path.is_dir() {
        let report = controller.check_folder(path)?;
        for file in &report.passed {
            println!("ok    {} ({} cues)", file.path.display(), file.cue_count);
        }
        for (file, error) in &report.failed {
            println!("FAIL  {}: {}", file.display(), error);
        }
        info!("Finished: {} passed, {} failed", report.passed.len(), report.failed.len());
        if !report.failed.is_empty() {
            return Err(anyhow!("{} file(s) failed to parse", report.failed.len()));
        }
        return Ok(());
    }

    let report = controller.check(path)?;
    println!(
        "ok    {} ({} cues, {} --> {})",
        report.path.display(),
        report.cue_count,
        format_timestamp(report.first_start_ms),
        format_timestamp(report.last_end_ms)
    );
    Ok(())
}

fn run_at(controller: &Controller, file: &Path, time: &str) -> Result<()> {
    let time_ms = parse_time_arg(time)?;
    match controller.query(file, time_ms)? {
        Some(cue) => {
            println!("{}", cue);
        }
        None => {
            warn!("No cue has started by {}", format_timestamp(time_ms));
        }
    }
    Ok(())
}
