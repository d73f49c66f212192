//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::{CommandFactory, Parser, ValueEnum};

/// Default deadline record name, stored beside the executable
pub const DATA_FILE_NAME: &str = "timer_data.json";

/// Default cleanup script name, stored beside the executable
pub const CLEANUP_SCRIPT_NAME: &str = "cleanup.sh";

/// How the timer should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Live countdown indicator (falls back to cli without a display)
    Indicator,
    /// Blocking loop that reports once a minute
    Cli,
    /// Start a new 12-hour window and exit
    Reset,
    /// Show the current deadline and remaining time
    Status,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "cleanup-timer")]
#[command(about = "A persistent 12-hour countdown that runs a cleanup script on expiry")]
#[command(version)]
pub struct Config {
    /// Run mode
    #[arg(value_enum, ignore_case = true, default_value = "indicator")]
    pub mode: Mode,

    /// Deadline record location [default: timer_data.json beside the executable]
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Script run on expiry [default: cleanup.sh beside the executable]
    #[arg(short, long)]
    pub cleanup_script: Option<PathBuf>,

    /// Kill the cleanup script after this many seconds
    #[arg(long, value_name = "SECS")]
    pub cleanup_timeout: Option<u64>,

    /// Print status as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    ///
    /// Usage errors are followed by the usage line before exiting.
    pub fn parse() -> Self {
        match Self::try_parse() {
            Ok(config) => config,
            Err(e) => {
                if let Some(usage) = usage_for_error(&e) {
                    let _ = e.print();
                    eprintln!("\n{}", usage);
                    std::process::exit(e.exit_code());
                }
                e.exit()
            }
        }
    }

    /// Resolved deadline record path
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| app_dir().join(DATA_FILE_NAME))
    }

    /// Resolved cleanup script path
    pub fn cleanup_script(&self) -> PathBuf {
        self.cleanup_script
            .clone()
            .unwrap_or_else(|| app_dir().join(CLEANUP_SCRIPT_NAME))
    }

    pub fn cleanup_timeout(&self) -> Option<Duration> {
        self.cleanup_timeout.map(Duration::from_secs)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Usage text to show after a parse error; `None` for help and version output
fn usage_for_error(err: &clap::Error) -> Option<String> {
    err.use_stderr()
        .then(|| Config::command().render_usage().to_string())
}

/// Directory holding the executable, or the working directory if unknown
fn app_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
