//! Indicator timer loop driven by a short periodic tick

use std::{
    io::{self, Write},
    time::Duration,
};
use tokio::{sync::watch, time::interval};
use tracing::{debug, error, info};

use crate::state::{Clock, TimerController};

/// Where the indicator shows its countdown label.
///
/// A tray binding implements this; the crate ships a terminal status line.
pub trait IndicatorSurface {
    /// Show the current `HH:MM:SS` label
    fn set_label(&mut self, label: &str);

    /// Whether the user asked for a reset since the last tick
    fn take_reset_request(&mut self) -> bool {
        false
    }

    /// Called once when the loop stops
    fn close(&mut self) {}
}

/// Single rewritten line on stdout
#[derive(Debug, Default)]
pub struct TerminalIndicator {
    last_label: Option<String>,
}

impl TerminalIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndicatorSurface for TerminalIndicator {
    fn set_label(&mut self, label: &str) {
        if self.last_label.as_deref() == Some(label) {
            return;
        }
        let mut out = io::stdout().lock();
        // A broken stdout should not stop the timer.
        let _ = write!(out, "\r⏳ {} ", label).and_then(|_| out.flush());
        self.last_label = Some(label.to_string());
    }

    fn close(&mut self) {
        if self.last_label.is_some() {
            println!();
        }
    }
}

/// Refresh the indicator every `tick`, cleaning up and rearming on expiry,
/// until the shutdown channel flips to `true`.
pub async fn indicator_task<C: Clock, S: IndicatorSurface>(
    timer: &mut TimerController<C>,
    surface: &mut S,
    mut shutdown: watch::Receiver<bool>,
    tick: Duration,
) -> anyhow::Result<()> {
    info!("Indicator started, remaining: {}", timer.label());
    surface.set_label(&timer.label());

    let mut ticker = interval(tick);
    let result = loop {
        if *shutdown.borrow() {
            break Ok(());
        }

        tokio::select! {
            _ = ticker.tick() => {
                if surface.take_reset_request() {
                    debug!("Reset requested from indicator");
                    if let Err(e) = timer.reset() {
                        error!("Failed to persist new deadline: {}", e);
                    }
                }

                if !timer.phase().is_armed() {
                    info!("Timer expired");
                    timer.handle_expiry().await;
                }

                surface.set_label(&timer.label());
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break Err(anyhow::anyhow!("Shutdown channel closed unexpectedly"));
                }
            }
        }
    };

    surface.close();
    info!("Indicator stopped");
    result
}
