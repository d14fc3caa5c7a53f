use crate::state::AppState;
use std::time::Duration;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The single repeating task that refreshes every tracker.
pub struct RefreshDriver {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RefreshDriver {
    /// First refresh runs immediately, then once per `period`.
    pub fn spawn(state: AppState, period: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = interval.tick() => {
                        let reached = state.refresh().await;
                        debug!(reached = reached.len(), "refreshed trackers");
                    }
                }
            }
            info!("refresh driver stopped");
        });
        Self { stop, handle }
    }

    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.handle.await;
    }
}
