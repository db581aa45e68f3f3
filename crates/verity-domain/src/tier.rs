//! Tier module - the engagement ladder sharers climb with views
//!
//! A [`TierTable`] is an immutable, ordered list of tiers. Construction
//! validates that thresholds start at zero and strictly increase, so every
//! non-negative view count maps to exactly one tier.

/// A rung on the engagement ladder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tier {
    /// Display name
    pub name: String,

    /// Inclusive lower bound on total views
    pub min_views: u64,

    /// Foreground colour (hex)
    pub color: String,

    /// Badge background colour (hex)
    pub bg_color: String,
}

impl Tier {
    /// Create a tier
    pub fn new(
        name: impl Into<String>,
        min_views: u64,
        color: impl Into<String>,
        bg_color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            min_views,
            color: color.into(),
            bg_color: bg_color.into(),
        }
    }
}

/// The standard ladder: (name, min views, colour, background)
const STANDARD_TIERS: [(&str, u64, &str, &str); 7] = [
    ("Curious Bro", 0, "#6b7280", "#f3f4f6"),
    ("Fact Finder", 10, "#cd7f32", "#fef3e2"),
    ("Truth Seeker", 50, "#9ca3af", "#f0f0f0"),
    ("Enlightened Bro", 200, "#f59e0b", "#fef3c7"),
    ("Myth Buster", 500, "#a78bfa", "#ede9fe"),
    ("Truth Sage", 1000, "#60a5fa", "#dbeafe"),
    ("Reality Guardian", 5000, "#8b5cf6", "#f3e8ff"),
];

/// Ordered tier ladder
///
/// # Examples
///
/// ```
/// use verity_domain::TierTable;
///
/// let tiers = TierTable::standard();
/// assert_eq!(tiers.tier_for(0).name, "Curious Bro");
/// assert_eq!(tiers.tier_for(59).name, "Truth Seeker");
/// assert_eq!(tiers.progress_to_next_tier(59), 6);
/// assert_eq!(tiers.views_to_next_tier(59), 141);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Build a ladder from tiers in ascending order
    ///
    /// Fails if the list is empty, the first threshold is not 0, or the
    /// thresholds are not strictly increasing.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, String> {
        let first = tiers.first().ok_or("Tier table must not be empty")?;
        if first.min_views != 0 {
            return Err(format!(
                "First tier '{}' must start at 0 views, not {}",
                first.name, first.min_views
            ));
        }

        for pair in tiers.windows(2) {
            if pair[1].min_views <= pair[0].min_views {
                return Err(format!(
                    "Tier '{}' ({}) must start above '{}' ({})",
                    pair[1].name, pair[1].min_views, pair[0].name, pair[0].min_views
                ));
            }
        }

        Ok(Self { tiers })
    }

    /// The standard seven-rung ladder
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS
                .iter()
                .map(|(name, min, color, bg)| Tier::new(*name, *min, *color, *bg))
                .collect(),
        }
    }

    /// All tiers, lowest first
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    fn index_for(&self, views: u64) -> usize {
        // The first tier starts at 0, so at least one tier always qualifies.
        self.tiers
            .partition_point(|t| t.min_views <= views)
            .saturating_sub(1)
    }

    /// Highest tier whose threshold is at or below `views`
    pub fn tier_for(&self, views: u64) -> &Tier {
        &self.tiers[self.index_for(views)]
    }

    /// Tier directly above the one `views` falls in, if any
    pub fn next_tier(&self, views: u64) -> Option<&Tier> {
        self.tiers.get(self.index_for(views) + 1)
    }

    /// Percent of the way from the current tier to the next (0-100)
    ///
    /// Rounds half up and is 100 at the top tier.
    pub fn progress_to_next_tier(&self, views: u64) -> u8 {
        let current = self.tier_for(views);
        let Some(next) = self.next_tier(views) else {
            return 100;
        };

        let in_band = u128::from(views - current.min_views);
        let span = u128::from(next.min_views - current.min_views);
        let percent = (200 * in_band + span) / (2 * span);

        percent.min(100) as u8
    }

    /// Views still needed to reach the next tier, or 0 at the top
    pub fn views_to_next_tier(&self, views: u64) -> u64 {
        self.next_tier(views)
            .map(|next| next.min_views - views)
            .unwrap_or(0)
    }

    /// All ranking figures for `views` in one snapshot
    pub fn progress(&self, views: u64) -> TierProgress {
        TierProgress {
            views,
            tier: self.tier_for(views).clone(),
            next: self.next_tier(views).cloned(),
            percent: self.progress_to_next_tier(views),
            views_to_next: self.views_to_next_tier(views),
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Where a view count sits on the ladder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierProgress {
    /// Cumulative views this was computed from
    pub views: u64,
    /// Current tier
    pub tier: Tier,
    /// Next tier, if not at the top
    pub next: Option<Tier>,
    /// Progress toward `next` (0-100)
    pub percent: u8,
    /// Views still needed to reach `next`
    pub views_to_next: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_views() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(0).name, "Curious Bro");
        assert_eq!(tiers.progress_to_next_tier(0), 0);
        assert_eq!(tiers.views_to_next_tier(0), 10);
    }

    #[test]
    fn test_exact_threshold() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(10).name, "Fact Finder");
        assert_eq!(tiers.progress_to_next_tier(10), 0);
        assert_eq!(tiers.views_to_next_tier(10), 40);
    }

    #[test]
    fn test_mid_band() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(59).name, "Truth Seeker");
        assert_eq!(tiers.next_tier(59).unwrap().name, "Enlightened Bro");
        assert_eq!(tiers.progress_to_next_tier(59), 6);
        assert_eq!(tiers.views_to_next_tier(59), 141);
    }

    #[test]
    fn test_rounds_half_up() {
        // 5 of 10 views into Curious Bro is exactly 50%
        let tiers = TierTable::standard();
        assert_eq!(tiers.progress_to_next_tier(5), 50);

        // 1 of 40 is 2.5% -> 3
        assert_eq!(tiers.progress_to_next_tier(11), 3);
    }

    #[test]
    fn test_top_tier() {
        let tiers = TierTable::standard();
        let progress = tiers.progress(1_000_000);
        assert_eq!(progress.tier.name, "Reality Guardian");
        assert!(progress.next.is_none());
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.views_to_next, 0);
    }

    #[test]
    fn test_one_before_threshold() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.views_to_next_tier(49), 1);
        assert_eq!(tiers.tier_for(49).name, "Fact Finder");
        assert_eq!(tiers.progress_to_next_tier(49), 98);
    }

    #[test]
    fn test_max_u64_does_not_overflow() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(u64::MAX).name, "Reality Guardian");
        assert_eq!(tiers.progress_to_next_tier(u64::MAX), 100);
    }

    #[test]
    fn test_table_validation() {
        assert!(TierTable::new(vec![]).is_err());
        assert!(TierTable::new(vec![Tier::new("a", 5, "", "")]).is_err());
        assert!(TierTable::new(vec![
            Tier::new("a", 0, "", ""),
            Tier::new("b", 10, "", ""),
            Tier::new("c", 10, "", ""),
        ])
        .is_err());
        assert!(TierTable::new(vec![
            Tier::new("a", 0, "", ""),
            Tier::new("b", 1, "", ""),
        ])
        .is_ok());
    }

    #[test]
    fn test_single_tier_table() {
        let tiers = TierTable::new(vec![Tier::new("Only", 0, "", "")]).unwrap();
        assert_eq!(tiers.tier_for(42).name, "Only");
        assert!(tiers.next_tier(42).is_none());
        assert_eq!(tiers.progress_to_next_tier(42), 100);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the chosen tier is reachable and no higher tier is
        #[test]
        fn test_tier_maximality(views in 0u64..20_000) {
            let tiers = TierTable::standard();
            let tier = tiers.tier_for(views);

            prop_assert!(tier.min_views <= views);
            for other in tiers.tiers() {
                prop_assert!(!(other.min_views > tier.min_views && other.min_views <= views));
            }
        }

        /// Property: progress never falls within a band and stays in range
        #[test]
        fn test_progress_monotonic_in_band(views in 0u64..6_000) {
            let tiers = TierTable::standard();
            let here = tiers.progress_to_next_tier(views);
            prop_assert!(here <= 100);

            if tiers.tier_for(views + 1) == tiers.tier_for(views) {
                prop_assert!(tiers.progress_to_next_tier(views + 1) >= here);
            }
        }

        /// Property: crossing a threshold resets progress and re-targets the next tier
        #[test]
        fn test_boundary_crossing(index in 1usize..7) {
            let tiers = TierTable::standard();
            let threshold = tiers.tiers()[index].min_views;

            prop_assert_eq!(tiers.views_to_next_tier(threshold - 1), 1);
            prop_assert_eq!(tiers.progress_to_next_tier(threshold), if index == 6 { 100 } else { 0 });

            let expected = tiers
                .tiers()
                .get(index + 1)
                .map(|t| t.min_views - threshold)
                .unwrap_or(0);
            prop_assert_eq!(tiers.views_to_next_tier(threshold), expected);
        }

        /// Property: identical input gives identical output
        #[test]
        fn test_deterministic(views: u64) {
            let tiers = TierTable::standard();
            prop_assert_eq!(tiers.progress(views), tiers.progress(views));
        }
    }
}
