//! Cleanup Timer - persistent countdown with cleanup on expiry
//!
//! This is the main entry point for the cleanup-timer application.

use tracing::{error, info, warn};

use cleanup_timer::{
    config::{Config, Mode},
    services::{detect_capability, CleanupScript, DisplayCapability},
    state::{deadline::format_timestamp, DeadlineStore, SystemClock, TimerController},
    tasks::{cli_loop_task, indicator_task, TerminalIndicator, CLI_TICK, INDICATOR_TICK},
    utils::shutdown_channel,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("cleanup_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let store = DeadlineStore::new(config.data_file());
    let cleanup = CleanupScript::new(config.cleanup_script()).with_timeout(config.cleanup_timeout());
    let mut timer = TimerController::open(store, cleanup, SystemClock);

    match config.mode {
        Mode::Reset => {
            let deadline = timer.reset()?;
            println!("Timer reset, new deadline: {}", format_timestamp(deadline));
            Ok(())
        }
        Mode::Status => {
            let status = timer.status();
            if config.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Deadline:  {}", format_timestamp(status.end_time));
                println!("Remaining: {}", status.remaining);
            }
            Ok(())
        }
        Mode::Indicator | Mode::Cli => {
            info!("Starting cleanup-timer v{}", env!("CARGO_PKG_VERSION"));
            info!(
                "Configuration: data_file={}, cleanup_script={}",
                timer.store().path().display(),
                timer.cleanup().path().display()
            );

            if let Err(e) = timer.cleanup().check_available() {
                warn!("{}", e);
            }

            let shutdown = shutdown_channel();

            let use_indicator = match (config.mode, detect_capability()) {
                (Mode::Indicator, DisplayCapability::TrayCapable) => true,
                (Mode::Indicator, DisplayCapability::CliOnly) => {
                    warn!("No display available, running in cli mode");
                    false
                }
                _ => false,
            };

            let result = if use_indicator {
                let mut surface = TerminalIndicator::new();
                indicator_task(&mut timer, &mut surface, shutdown, INDICATOR_TICK).await
            } else {
                cli_loop_task(&mut timer, shutdown, CLI_TICK).await
            };

            if let Err(e) = &result {
                error!("Timer loop failed: {:#}", e);
            }
            info!("Timer stopped");
            result
        }
    }
}
