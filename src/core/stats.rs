//! Shared counters for translation runs

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::models::{Strategy, TranslationStats};

/// Tracker shared between a translator and its callers
#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
    stats: Arc<RwLock<TranslationStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a node handled with `strategy`
    pub async fn record(&self, strategy: Strategy) {
        let mut stats = self.stats.write().await;
        stats.record(strategy);
        debug!("Node handled via {} strategy", strategy);
    }

    /// Count one oracle invocation
    pub async fn record_oracle_call(&self) {
        self.stats.write().await.oracle_calls += 1;
    }

    /// Count an injection attempt that fell back
    pub async fn record_fallback(&self) {
        self.stats.write().await.fallbacks += 1;
    }

    /// Snapshot of the counters
    pub async fn get_stats(&self) -> TranslationStats {
        self.stats.read().await.clone()
    }

    /// Reset all counters
    pub async fn reset(&self) {
        *self.stats.write().await = TranslationStats::default();
        info!("Translation stats reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracker_counts() {
        let tracker = StatsTracker::new();
        tracker.record(Strategy::Leaf).await;
        tracker.record(Strategy::Leaf).await;
        tracker.record_oracle_call().await;
        tracker.record_fallback().await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.leaves_translated, 2);
        assert_eq!(stats.oracle_calls, 1);
        assert_eq!(stats.fallbacks, 1);

        tracker.reset().await;
        assert_eq!(tracker.get_stats().await, TranslationStats::default());
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let tracker = StatsTracker::new();
        let other = tracker.clone();
        other.record(Strategy::Injection).await;
        assert_eq!(tracker.get_stats().await.injections, 1);
    }
}
