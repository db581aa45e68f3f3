//! Sharer statistics and leaderboard entries

use crate::tier::{Tier, TierProgress, TierTable};

/// A user's aggregate engagement
///
/// The tier is always derived from `total_views` through a [`TierTable`];
/// `rank` is supplied by the backend, which owns the global ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct SharerStats {
    /// Public name
    pub display_name: String,

    /// Views across every shared fact-check, as counted by the backend
    pub total_views: u64,

    /// Number of fact-checks shared
    pub claims_shared: u64,

    /// Tier derived from `total_views`
    pub tier: Tier,

    /// 1-based leaderboard position, if ranked
    pub rank: Option<u32>,
}

impl SharerStats {
    /// Build stats, deriving the tier from the view count
    pub fn new(
        tiers: &TierTable,
        display_name: impl Into<String>,
        total_views: u64,
        claims_shared: u64,
        rank: Option<u32>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            total_views,
            claims_shared,
            tier: tiers.tier_for(total_views).clone(),
            rank,
        }
    }

    /// Ladder position for the current total
    pub fn progress(&self, tiers: &TierTable) -> TierProgress {
        tiers.progress(self.total_views)
    }
}

/// How a fact-check was shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShareMethod {
    /// Link copied to the clipboard
    #[default]
    CopyLink,
    /// Platform share sheet
    Native,
    /// Posted to Twitter/X
    Twitter,
    /// Anything else
    Other,
}

impl ShareMethod {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareMethod::CopyLink => "copy-link",
            ShareMethod::Native => "native",
            ShareMethod::Twitter => "twitter",
            ShareMethod::Other => "other",
        }
    }
}

/// One row of the public leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: u32,
    /// Sharer's stats
    pub stats: SharerStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_is_derived() {
        let tiers = TierTable::standard();
        let stats = SharerStats::new(&tiers, "ana", 250, 4, Some(3));
        assert_eq!(stats.tier.name, "Enlightened Bro");
        assert_eq!(stats.rank, Some(3));
    }

    #[test]
    fn test_progress() {
        let tiers = TierTable::standard();
        let stats = SharerStats::new(&tiers, "ana", 59, 2, None);
        let progress = stats.progress(&tiers);
        assert_eq!(progress.percent, 6);
        assert_eq!(progress.views_to_next, 141);
    }
}
