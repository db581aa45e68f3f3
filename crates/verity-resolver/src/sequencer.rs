//! Timed reveal of a resolved verdict
//!
//! The reveal is a chain of named phases, each held for a fixed duration:
//! the query types out, a commentary line plays, the verdict badge shows,
//! then the full result. One spawned task drives the chain and one
//! cancellation token tears it down.

use crate::{RevealError, RevealTimings};
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use verity_domain::reveal::COMMENTARY;
use verity_domain::{Claim, RevealPhase, Verdict};

/// What the presentation layer shows at a point in the reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSnapshot {
    /// Current phase
    pub phase: RevealPhase,
    /// Portion of the query typed so far
    pub typed: String,
    /// Commentary line, from `Commentary` on
    pub commentary: Option<&'static str>,
    /// Verdict, from `Revealing` on
    pub verdict: Option<Verdict>,
}

impl Default for RevealSnapshot {
    fn default() -> Self {
        Self {
            phase: RevealPhase::Loading,
            typed: String::new(),
            commentary: None,
            verdict: None,
        }
    }
}

/// Drives one claim through the reveal phases
///
/// Each instance owns its own timers. Dropping the sequencer or calling
/// [`cancel`](Self::cancel) stops it; no transition fires afterwards.
pub struct RevealSequencer {
    timings: RevealTimings,
    state: Arc<watch::Sender<RevealSnapshot>>,
    observer: Option<mpsc::UnboundedSender<RevealPhase>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RevealSequencer {
    /// Create a sequencer in the `Loading` phase
    pub fn new(timings: RevealTimings) -> Self {
        Self::with_cancellation(timings, CancellationToken::new())
    }

    /// Create a sequencer stopped by `cancel`, typically a child of the
    /// owning view's token
    pub fn with_cancellation(timings: RevealTimings, cancel: CancellationToken) -> Self {
        let (state, _) = watch::channel(RevealSnapshot::default());
        Self {
            timings,
            state: Arc::new(state),
            observer: None,
            cancel,
            task: None,
        }
    }

    /// Report every phase entered on `observer`, starting with `Loading`
    ///
    /// Unlike [`subscribe`](Self::subscribe), no phase is ever coalesced away.
    pub fn with_observer(mut self, observer: mpsc::UnboundedSender<RevealPhase>) -> Self {
        let _ = observer.send(self.phase());
        self.observer = Some(observer);
        self
    }

    /// Watch the reveal as it progresses
    pub fn subscribe(&self) -> watch::Receiver<RevealSnapshot> {
        self.state.subscribe()
    }

    /// Current phase
    pub fn phase(&self) -> RevealPhase {
        self.state.borrow().phase
    }

    /// Current snapshot
    pub fn snapshot(&self) -> RevealSnapshot {
        self.state.borrow().clone()
    }

    /// Start revealing `claim`
    ///
    /// With `skip_to_complete`, the sequencer jumps straight from `Loading`
    /// to `Complete`. Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `Unresolved` if the claim has no verdict
    /// - `AlreadyStarted` on a second call
    pub fn begin(&mut self, claim: &Claim, skip_to_complete: bool) -> Result<(), RevealError> {
        if self.task.is_some() {
            return Err(RevealError::AlreadyStarted);
        }
        let verdict = claim.verdict.ok_or(RevealError::Unresolved)?;

        let commentary = COMMENTARY
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(COMMENTARY[0]);
        let chain = PhaseChain {
            timings: self.timings.clone(),
            query: claim.query.clone(),
            commentary,
            verdict,
            state: Arc::clone(&self.state),
            observer: self.observer.clone(),
            cancel: self.cancel.clone(),
        };

        tracing::debug!(
            "Starting reveal of {} (skip: {})",
            claim.slug,
            skip_to_complete
        );
        self.task = Some(tokio::spawn(chain.run(skip_to_complete)));
        Ok(())
    }

    /// Whether `begin` has been called
    pub fn is_started(&self) -> bool {
        self.task.is_some()
    }

    /// Stop the reveal where it is; idempotent
    pub fn cancel(&self) {
        self.cancel.cancel();
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

impl Drop for RevealSequencer {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct PhaseChain {
    timings: RevealTimings,
    query: String,
    commentary: &'static str,
    verdict: Verdict,
    state: Arc<watch::Sender<RevealSnapshot>>,
    observer: Option<mpsc::UnboundedSender<RevealPhase>>,
    cancel: CancellationToken,
}

impl PhaseChain {
    async fn run(self, skip_to_complete: bool) {
        if skip_to_complete {
            let query = self.query.clone();
            let verdict = self.verdict;
            self.enter(RevealPhase::Complete, move |s| {
                s.typed = query;
                s.verdict = Some(verdict);
            });
            return;
        }

        if !self.enter(RevealPhase::Typing, |_| {}) {
            return;
        }
        for ch in self.query.chars() {
            if !self.hold(self.timings.per_char()).await {
                return;
            }
            self.state.send_modify(|s| s.typed.push(ch));
        }
        if !self.hold(self.timings.settle()).await {
            return;
        }

        let commentary = self.commentary;
        if !self.enter(RevealPhase::Commentary, |s| s.commentary = Some(commentary))
            || !self.hold(self.timings.commentary()).await
        {
            return;
        }

        let verdict = self.verdict;
        if !self.enter(RevealPhase::Revealing, |s| s.verdict = Some(verdict))
            || !self.hold(self.timings.reveal()).await
        {
            return;
        }

        self.enter(RevealPhase::Complete, |_| {});
    }

    /// Move to `next`; false once cancelled
    fn enter(&self, next: RevealPhase, update: impl FnOnce(&mut RevealSnapshot)) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.state.send_modify(|s| {
            debug_assert!(
                s.phase.can_advance_to(next),
                "illegal reveal transition {} -> {}",
                s.phase,
                next
            );
            s.phase = next;
            update(s);
        });
        if let Some(observer) = &self.observer {
            let _ = observer.send(next);
        }
        tracing::trace!("Reveal entered {}", next);
        true
    }

    /// Wait out `duration`; false if cancelled meanwhile
    async fn hold(&self, duration: Duration) -> bool {
        if duration.is_zero() {
            tokio::task::yield_now().await;
            return !self.cancel.is_cancelled();
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use verity_domain::{ClaimId, Slug, Tone};

    fn claim(verdict: Option<Verdict>) -> Claim {
        Claim {
            id: ClaimId::new("c_1"),
            slug: Slug::parse("abc").unwrap(),
            query: "Sky is blue".to_string(),
            tone: Tone::Cordial,
            verdict,
            confidence: None,
            tldr: None,
            summary: None,
            sources: Vec::new(),
            created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
            checked_at: None,
        }
    }

    #[tokio::test]
    async fn test_begin_rejects_pending_claim() {
        let mut sequencer = RevealSequencer::new(RevealTimings::instant());
        assert_eq!(
            sequencer.begin(&claim(None), false),
            Err(RevealError::Unresolved)
        );
        assert!(!sequencer.is_started());
        assert_eq!(sequencer.phase(), RevealPhase::Loading);
    }

    #[tokio::test]
    async fn test_begin_twice() {
        let mut sequencer = RevealSequencer::new(RevealTimings::instant());
        let resolved = claim(Some(Verdict::True));
        sequencer.begin(&resolved, false).unwrap();
        assert_eq!(
            sequencer.begin(&resolved, false),
            Err(RevealError::AlreadyStarted)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_contents_at_complete() {
        let mut sequencer = RevealSequencer::new(RevealTimings::default());
        let mut rx = sequencer.subscribe();
        sequencer.begin(&claim(Some(Verdict::Misleading)), false).unwrap();

        let snapshot = rx
            .wait_for(|s| s.phase == RevealPhase::Complete)
            .await
            .unwrap()
            .clone();

        assert_eq!(snapshot.typed, "Sky is blue");
        assert_eq!(snapshot.verdict, Some(Verdict::Misleading));
        assert!(COMMENTARY.contains(&snapshot.commentary.unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_verdict_hidden_until_revealing() {
        let mut sequencer = RevealSequencer::new(RevealTimings::default());
        let mut rx = sequencer.subscribe();
        sequencer.begin(&claim(Some(Verdict::False)), false).unwrap();

        let snapshot = rx
            .wait_for(|s| s.phase == RevealPhase::Commentary)
            .await
            .unwrap()
            .clone();
        assert_eq!(snapshot.verdict, None);
        assert!(snapshot.commentary.is_some());
    }

    #[tokio::test]
    async fn test_commentary_varies_between_reveals() {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let mut sequencer = RevealSequencer::new(RevealTimings::instant());
            let mut rx = sequencer.subscribe();
            sequencer.begin(&claim(Some(Verdict::True)), false).unwrap();
            let snapshot = rx
                .wait_for(|s| s.phase == RevealPhase::Complete)
                .await
                .unwrap()
                .clone();
            seen.insert(snapshot.commentary.unwrap());
        }

        assert!(seen.len() > 1);
        assert!(seen.iter().all(|line| COMMENTARY.contains(line)));
    }
}
