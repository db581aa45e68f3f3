//! Reveal phases - the staged disclosure of a verdict

use std::fmt;

/// Phase of the verdict reveal
///
/// Phases only move forward: `Loading → Typing → Commentary → Revealing →
/// Complete`, with a single shortcut `Loading → Complete` for returning viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RevealPhase {
    /// Waiting for a resolved claim
    Loading,
    /// Typing out the query
    Typing,
    /// Showing an editorial aside
    Commentary,
    /// Showing the verdict badge
    Revealing,
    /// Full result is visible
    Complete,
}

impl RevealPhase {
    /// Phase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RevealPhase::Loading => "loading",
            RevealPhase::Typing => "typing",
            RevealPhase::Commentary => "commentary",
            RevealPhase::Revealing => "revealing",
            RevealPhase::Complete => "complete",
        }
    }

    /// The phase that normally follows this one
    pub fn successor(&self) -> Option<Self> {
        match self {
            RevealPhase::Loading => Some(RevealPhase::Typing),
            RevealPhase::Typing => Some(RevealPhase::Commentary),
            RevealPhase::Commentary => Some(RevealPhase::Revealing),
            RevealPhase::Revealing => Some(RevealPhase::Complete),
            RevealPhase::Complete => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_advance_to(&self, next: RevealPhase) -> bool {
        self.successor() == Some(next)
            || (*self == RevealPhase::Loading && next == RevealPhase::Complete)
    }

    /// Whether this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        *self == RevealPhase::Complete
    }
}

impl fmt::Display for RevealPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editorial asides shown during the commentary phase
pub const COMMENTARY: [&str; 6] = [
    "It's really not that hard to check primary sources...",
    "A 10-second search would have saved you this embarrassment...",
    "Let me do the research you couldn't be bothered to do...",
    "Here's what actually happened, with receipts...",
    "The internet has a memory. Let me remind you...",
    "Facts don't care about your viral tweet...",
];
