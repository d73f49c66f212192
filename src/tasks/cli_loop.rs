//! Blocking command-line timer loop

use std::time::Duration;
use tokio::{sync::watch, time::sleep};
use tracing::info;

use crate::state::{deadline::format_timestamp, Clock, TimerController};

/// Poll the timer every `tick`, cleaning up and rearming on expiry, until
/// the shutdown channel flips to `true`.
pub async fn cli_loop_task<C: Clock>(
    timer: &mut TimerController<C>,
    mut shutdown: watch::Receiver<bool>,
    tick: Duration,
) -> anyhow::Result<()> {
    info!("Timer started, deadline: {}", format_timestamp(timer.deadline()));
    info!("Remaining: {}", timer.label());

    loop {
        if *shutdown.borrow() {
            break;
        }

        if !timer.phase().is_armed() {
            info!("Timer expired");
            let outcome = timer.handle_expiry().await;
            if !outcome.cleanup_succeeded {
                info!("Timer rearmed despite cleanup failure");
            }
        }

        tokio::select! {
            _ = sleep(tick) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    anyhow::bail!("Shutdown channel closed unexpectedly");
                }
                if *shutdown.borrow() {
                    break;
                }
            }
        }

        info!("Remaining: {}", timer.label());
    }

    info!("Stopping timer");
    Ok(())
}
