//! Periodic Stats Reporter
//!
//! This module implements a background task that logs a snapshot of the
//! server counters at a fixed interval. The reporter only *reads* the
//! counters; nothing in the request path depends on it, and stopping it
//! loses nothing but the log line.

use crate::stats::ServerStats;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Configuration for the stats reporter.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Interval between report lines (default: 10s)
    pub interval: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
        }
    }
}

/// A handle to the running stats reporter.
///
/// When this handle is dropped, the reporter task will be stopped.
#[derive(Debug)]
pub struct StatsReporter {
    /// Sender to signal shutdown
    shutdown_tx: watch::Sender<bool>,
}

impl StatsReporter {
    /// Starts the stats reporter as a background task.
    ///
    /// # Returns
    ///
    /// Returns a handle that can be used to stop the reporter. The reporter
    /// will automatically stop when the handle is dropped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tuplespace::stats::{ServerStats, StatsReporter, ReporterConfig};
    /// use std::sync::Arc;
    ///
    /// let stats = Arc::new(ServerStats::new());
    /// let reporter = StatsReporter::start(Arc::clone(&stats), ReporterConfig::default());
    ///
    /// // Reporter logs in the background...
    ///
    /// // Dropping the reporter will stop it
    /// drop(reporter);
    /// ```
    pub fn start(stats: Arc<ServerStats>, config: ReporterConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(reporter_loop(stats, config, shutdown_rx));

        Self { shutdown_tx }
    }

    /// Stops the stats reporter.
    ///
    /// This is called automatically when the handle is dropped.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for StatsReporter {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The main reporter loop.
async fn reporter_loop(
    stats: Arc<ServerStats>,
    config: ReporterConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        // Wait for the interval or shutdown signal
        tokio::select! {
            _ = tokio::time::sleep(config.interval) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("Stats reporter received shutdown signal");
                    return;
                }
            }
        }

        let snapshot = stats.snapshot();
        info!(%snapshot, "Server stats");
    }
}

/// Starts the stats reporter with default configuration.
///
/// This is a convenience function for simple use cases.
pub fn start_stats_reporter(stats: Arc<ServerStats>) -> StatsReporter {
    StatsReporter::start(stats, ReporterConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reporter_runs_and_stops_on_drop() {
        let stats = Arc::new(ServerStats::new());
        stats.insert_recorded(3, 5);

        let config = ReporterConfig {
            interval: Duration::from_millis(10),
        };

        {
            let _reporter = StatsReporter::start(Arc::clone(&stats), config);
            tokio::time::sleep(Duration::from_millis(50)).await;
            // Reporter is dropped here
        }

        // After the handle is gone the task exits; counters are untouched.
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(stats.snapshot().tuples, 1);
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(ReporterConfig::default().interval, Duration::from_secs(10));
    }
}
