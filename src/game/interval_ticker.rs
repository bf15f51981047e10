use std::time::Duration;

use tokio::sync::mpsc::WeakSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::game::actor::SessionCommand;
use crate::game::timer::TickSource;

/// Sends a tick to the owning session actor once per period while a countdown runs.
///
/// Holds a weak sender so a running countdown never keeps an abandoned session alive.
pub struct IntervalTicker {
    session_tx: WeakSender<SessionCommand>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    pub(crate) fn new(session_tx: WeakSender<SessionCommand>, period: Duration) -> Self {
        Self {
            session_tx,
            period,
            task: None,
        }
    }
}

impl TickSource for IntervalTicker {
    fn start(&mut self, run: u64) {
        self.stop();

        let session_tx = self.session_tx.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let Some(session_tx) = session_tx.upgrade() else {
                    log::debug!("Session is gone, stopping the ticker. Run: '{run}'.");
                    break;
                };
                if session_tx.send(SessionCommand::Tick { run }).await.is_err() {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
