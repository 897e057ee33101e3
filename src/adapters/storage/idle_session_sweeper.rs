//! IdleSessionSweeper - Background service that evicts abandoned sessions.
//!
//! Sessions are created by anonymous clients and nothing else forces them to
//! end, so the registry is swept on a fixed interval and every session that
//! has not been looked up for `max_idle` is dropped.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `max_idle` | 1h | Time since last use before a session is evicted |
//! | `sweep_interval` | 60s | How often the registry is swept |

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::ports::SessionRegistry;

/// Configuration for the IdleSessionSweeper service.
#[derive(Debug, Clone)]
pub struct IdleSessionSweeperConfig {
    pub max_idle: Duration,
    pub sweep_interval: Duration,
}

impl Default for IdleSessionSweeperConfig {
    fn default() -> Self {
        Self {
            max_idle: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl IdleSessionSweeperConfig {
    pub fn with_max_idle(mut self, max_idle: Duration) -> Self {
        self.max_idle = max_idle;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Background service evicting idle sessions from a registry.
pub struct IdleSessionSweeper {
    registry: Arc<dyn SessionRegistry>,
    config: IdleSessionSweeperConfig,
}

impl IdleSessionSweeper {
    pub fn new(registry: Arc<dyn SessionRegistry>, config: IdleSessionSweeperConfig) -> Self {
        Self { registry, config }
    }

    /// Sweep until the shutdown signal flips to true.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// Run one sweep; returns the number of evicted sessions.
    pub async fn sweep_once(&self) -> usize {
        let evicted = self.registry.evict_idle(self.config.max_idle).await;
        for session_id in &evicted {
            tracing::info!(%session_id, "Evicted idle practice session");
        }
        evicted.len()
    }
}
