//! Debouncing for search input
//!
//! Keystrokes are pushed into the debouncer as they arrive. Only the text
//! that has been stable for the configured delay is forwarded, so a burst
//! of typing yields a single recompute.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// Background task that forwards settled search text
#[derive(Debug)]
pub struct SearchDebouncer {
    input: UnboundedSender<String>,
    handle: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Spawn the debounce task; settled text arrives on the returned receiver
    pub fn spawn(delay: Duration) -> (Self, UnboundedReceiver<String>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(delay, input_rx, output_tx));

        (Self { input, handle }, output)
    }

    /// Record the latest search text, restarting the quiet period
    ///
    /// Returns `false` once the task has stopped.
    pub fn push(&self, text: impl Into<String>) -> bool {
        self.input.send(text.into()).is_ok()
    }

    /// Close the input and wait for any pending text to be flushed
    pub async fn finish(self) {
        drop(self.input);
        if let Err(e) = self.handle.await {
            warn!("Search debounce task ended abnormally: {}", e);
        }
    }
}

async fn run(
    delay: Duration,
    mut input: UnboundedReceiver<String>,
    output: UnboundedSender<String>,
) {
    let mut pending: Option<String> = None;
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            received = input.recv() => match received {
                Some(text) => {
                    pending = Some(text);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                None => {
                    if let Some(text) = pending.take() {
                        let _ = output.send(text);
                    }
                    break;
                }
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(text) = pending.take() {
                    debug!("Search settled on {:?}", text);
                    if output.send(text).is_err() {
                        break;
                    }
                }
            }
        }
    }
}
