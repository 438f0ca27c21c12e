//! Process-wide shutdown notification.
//! `send_exit()` is called from the signal handler. Long-running code subscribes with `subscribe_exit()`
//! before it starts, so an exit requested while it is busy is still delivered.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tokio::sync::broadcast;

static APPLICATION_EXIT_SENDER: Lazy<broadcast::Sender<()>> = Lazy::new(|| broadcast::channel(2).0);

/// Notify every subscriber of [`subscribe_exit`] that the bridge is shutting down.
pub fn send_exit() -> Result<()> {
    APPLICATION_EXIT_SENDER.send(()).context("Failed to send exit lifecycle event")?;
    Ok(())
}

/// A receiver that yields once [`send_exit`] is called after this point.
pub fn subscribe_exit() -> broadcast::Receiver<()> {
    APPLICATION_EXIT_SENDER.subscribe()
}

/// Install a SIGINT/SIGTERM handler that triggers [`send_exit`].
pub fn install_signal_handler() {
    simple_signal::set_handler(&[simple_signal::Signal::Int, simple_signal::Signal::Term], move |_| {
        log::info!("Shutting down nuvola-bridge...");
        if let Err(e) = send_exit() {
            log::error!("Failed to send shutdown event: {:?}", e);
            std::process::exit(1);
        }
    });
}

/// Select in a loop, breaking once `$exit` (see `crate::application_lifecycle::subscribe_exit`)
/// receives an exit event.
#[macro_export]
macro_rules! loop_select_exiting {
    ($exit:ident; $($content:tt)*) => {
        loop {
            ::tokio::select! {
                Ok(()) = $exit.recv() => {
                    break;
                }
                $($content)*
            }
        }
    };
}
