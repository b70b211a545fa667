use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Countdown events, one per second of session time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Seconds remaining after this tick.
    Tick(u64),
    /// The countdown reached zero; triggers the same end transition as an
    /// explicit end action.
    Expired,
}

/// Fixed-duration one-second-granularity session countdown.
///
/// Starts immediately, cannot be paused, and fires `Expired` exactly once.
/// One instance exists per interview phase.
pub struct Countdown {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl Countdown {
    pub fn start(duration: Duration, events: mpsc::Sender<CountdownEvent>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut remaining = duration.as_secs();
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval is immediate; consume it so
            // the countdown holds its full duration.
            interval.tick().await;

            while remaining > 0 {
                tokio::select! {
                    () = token.cancelled() => return,
                    _ = interval.tick() => {
                        remaining -= 1;
                        if events.send(CountdownEvent::Tick(remaining)).await.is_err() {
                            return;
                        }
                    }
                }
            }
            let _ = events.send(CountdownEvent::Expired).await;
        });
        Self { handle, cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn stopped(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_down_then_expires_once() {
        let (tx, mut rx) = mpsc::channel(16);
        let _countdown = Countdown::start(Duration::from_secs(3), tx);

        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(2)));
        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(1)));
        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(0)));
        assert_eq!(rx.recv().await, Some(CountdownEvent::Expired));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks_without_expiry() {
        let (tx, mut rx) = mpsc::channel(16);
        let countdown = Countdown::start(Duration::from_secs(60), tx);

        assert_eq!(rx.recv().await, Some(CountdownEvent::Tick(59)));
        countdown.stopped().await;

        // Drain anything already queued; the channel must close with no
        // Expired event.
        let mut saw_expired = false;
        while let Some(event) = rx.recv().await {
            saw_expired |= event == CountdownEvent::Expired;
        }
        assert!(!saw_expired);
    }
}
