//! View and share tracking for a result screen

use std::sync::Arc;
use verity_domain::{ClaimStore, ShareMethod, Slug, TierProgress, TierTable};

/// Cumulative views after a tracked view, placed on the tier ladder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementUpdate {
    /// Cumulative view count reported by the backend
    pub views: u64,
    /// Tier standing for that count
    pub progress: TierProgress,
}

/// Records at most one view per result screen
///
/// The guard lives on the tracker, so a new screen gets a new tracker and a
/// fresh guard. Failures are logged and otherwise ignored.
pub struct EngagementTracker<S> {
    store: Arc<S>,
    slug: Slug,
    tiers: TierTable,
    tracked: bool,
}

impl<S: ClaimStore> EngagementTracker<S> {
    /// Create a tracker for one screen showing `slug`
    pub fn new(store: Arc<S>, slug: Slug, tiers: TierTable) -> Self {
        Self {
            store,
            slug,
            tiers,
            tracked: false,
        }
    }

    /// Whether the view has already been sent
    pub fn has_tracked(&self) -> bool {
        self.tracked
    }

    /// Send the view, once
    ///
    /// Returns `None` on every call after the first, and when the backend
    /// could not record the view. A failed view is not retried.
    pub async fn track(&mut self) -> Option<EngagementUpdate> {
        if self.tracked {
            return None;
        }
        self.tracked = true;

        match self.store.record_view(&self.slug).await {
            Ok(views) => {
                tracing::debug!("Recorded view of {} ({} total)", self.slug, views);
                Some(EngagementUpdate {
                    views,
                    progress: self.tiers.progress(views),
                })
            }
            Err(e) => {
                tracing::debug!("Ignoring failed view of {}: {}", self.slug, e);
                None
            }
        }
    }

    /// Record a share; best effort
    pub async fn record_share(&self, method: ShareMethod) -> bool {
        match self.store.record_share(&self.slug, method).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    "Ignoring failed {} share of {}: {}",
                    method.as_str(),
                    self.slug,
                    e
                );
                false
            }
        }
    }
}
