//! One result screen: resolve, reveal, then count the view
//!
//! [`ResultView`] runs the whole flow in a background task and publishes a
//! [`ViewSnapshot`] after every change. Presentation code only reads
//! snapshots.

use crate::engagement::{EngagementTracker, EngagementUpdate};
use crate::poller::{ResolutionPoller, ResolutionSession};
use crate::sequencer::{RevealSequencer, RevealSnapshot};
use crate::{ResolutionError, ResolverConfig};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use verity_domain::{Claim, ClaimStore, Slug, TierTable};

/// How the viewer reached the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewOrigin {
    /// Straight after submitting the claim
    Submission,
    /// In-app navigation
    #[default]
    Navigation,
    /// Opened from a link someone shared
    SharedLink,
}

/// Kind of failure shown on a result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorKind {
    /// No verdict within the attempt budget
    TimedOut,
    /// The claim does not exist
    NotFound,
    /// The claim service could not be reached
    Transport,
}

/// User-visible failure of a result screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    /// What went wrong
    pub kind: ViewErrorKind,
    /// Text for the viewer
    pub message: String,
}

impl ViewError {
    /// Map a resolution failure; cancellation is never shown
    pub fn from_resolution(error: &ResolutionError) -> Option<Self> {
        let kind = match error {
            ResolutionError::Timeout { .. } => ViewErrorKind::TimedOut,
            ResolutionError::NotFound { .. } => ViewErrorKind::NotFound,
            ResolutionError::Transport { .. } | ResolutionError::Config(_) => {
                ViewErrorKind::Transport
            }
            ResolutionError::Cancelled => return None,
        };
        Some(Self {
            kind,
            message: error.user_message(),
        })
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a result screen shows at one moment
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Claim being shown
    pub slug: Slug,
    /// Poll progress
    pub session: ResolutionSession,
    /// The claim once resolved
    pub claim: Option<Claim>,
    /// Reveal progress
    pub reveal: RevealSnapshot,
    /// View count and tier once the view was recorded
    pub engagement: Option<EngagementUpdate>,
    /// Terminal error, if any
    pub error: Option<ViewError>,
    /// Nothing further will change
    pub finished: bool,
}

/// A live result screen
///
/// Dropping the view, or calling [`close`](Self::close), cancels polling,
/// the reveal, and view tracking. No snapshot is published afterwards.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use verity_domain::Slug;
/// use verity_resolver::{ResolverConfig, ResultView, ViewOrigin};
/// use verity_sdk::VerityClient;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(VerityClient::new("http://localhost:3000/api")?);
/// let mut view = ResultView::open(
///     client,
///     Slug::parse("k3x9a")?,
///     ViewOrigin::SharedLink,
///     ResolverConfig::default(),
/// )?;
///
/// let snapshot = view.settled().await;
/// match (&snapshot.claim, &snapshot.error) {
///     (_, Some(error)) => eprintln!("{}", error),
///     (Some(claim), None) => println!("{:?}", claim.verdict),
///     _ => {}
/// }
/// # Ok(())
/// # }
/// ```
pub struct ResultView {
    snapshots: watch::Receiver<ViewSnapshot>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ResultView {
    /// Open a result screen for `slug` using the standard tier ladder
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `config` fails validation.
    pub fn open<S>(
        store: Arc<S>,
        slug: Slug,
        origin: ViewOrigin,
        config: ResolverConfig,
    ) -> Result<Self, ResolutionError>
    where
        S: ClaimStore + 'static,
    {
        Self::open_with_tiers(store, slug, origin, config, TierTable::standard())
    }

    /// Open a result screen with a custom tier ladder
    pub fn open_with_tiers<S>(
        store: Arc<S>,
        slug: Slug,
        origin: ViewOrigin,
        config: ResolverConfig,
        tiers: TierTable,
    ) -> Result<Self, ResolutionError>
    where
        S: ClaimStore + 'static,
    {
        config.validate()?;

        let poller = ResolutionPoller::new(&config);
        let initial = ViewSnapshot {
            slug: slug.clone(),
            session: poller.session(slug.clone()),
            claim: None,
            reveal: RevealSnapshot::default(),
            engagement: None,
            error: None,
            finished: false,
        };
        let (tx, snapshots) = watch::channel(initial);
        let cancel = CancellationToken::new();

        tracing::info!("Opening result view for {} ({:?})", slug, origin);
        let driver = ViewDriver {
            store,
            slug,
            origin,
            config,
            tiers,
            publisher: Publisher {
                tx,
                cancel: cancel.clone(),
            },
        };
        let task = tokio::spawn(driver.run(poller));

        Ok(Self {
            snapshots,
            cancel,
            task,
        })
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Watch snapshots as they change
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until nothing further will change
    ///
    /// Returns the last published snapshot if the view was closed first.
    pub async fn settled(&mut self) -> ViewSnapshot {
        if let Ok(snapshot) = self.snapshots.wait_for(|s| s.finished).await {
            return snapshot.clone();
        }
        self.snapshot()
    }

    /// Tear the screen down; idempotent
    pub fn close(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("Closing result view");
        }
        self.cancel.cancel();
    }

    /// Whether the view has been closed
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ResultView {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Sends snapshot updates until the view is cancelled
struct Publisher {
    tx: watch::Sender<ViewSnapshot>,
    cancel: CancellationToken,
}

impl Publisher {
    fn update(&self, f: impl FnOnce(&mut ViewSnapshot)) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.tx.send_modify(f);
    }
}

struct ViewDriver<S> {
    store: Arc<S>,
    slug: Slug,
    origin: ViewOrigin,
    config: ResolverConfig,
    tiers: TierTable,
    publisher: Publisher,
}

impl<S: ClaimStore + 'static> ViewDriver<S> {
    async fn run(self, poller: ResolutionPoller) {
        let cancel = self.publisher.cancel.clone();
        let mut session = poller.session(self.slug.clone());

        let publisher = &self.publisher;
        let outcome = poller
            .resolve_with(&*self.store, &mut session, &cancel, |s| {
                let s = s.clone();
                publisher.update(move |snap| snap.session = s);
            })
            .await;

        let resolution = match outcome {
            Ok(resolution) => resolution,
            Err(e) => {
                if let Some(error) = ViewError::from_resolution(&e) {
                    tracing::info!("Result view for {} failed: {}", self.slug, e);
                    publisher.update(|snap| {
                        snap.error = Some(error);
                        snap.finished = true;
                    });
                }
                return;
            }
        };

        let skip = self.origin == ViewOrigin::SharedLink && resolution.resolved_on_first_fetch;
        let claim = resolution.claim;
        let mut sequencer =
            RevealSequencer::with_cancellation(self.config.reveal.clone(), cancel.child_token());
        let mut reveal = sequencer.subscribe();
        if let Err(e) = sequencer.begin(&claim, skip) {
            tracing::error!("Could not start reveal of {}: {}", self.slug, e);
            return;
        }
        publisher.update(|snap| snap.claim = Some(claim));

        loop {
            let current = reveal.borrow_and_update().clone();
            let complete = current.phase.is_terminal();
            publisher.update(|snap| snap.reveal = current);
            if complete {
                break;
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                changed = reveal.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let mut tracker =
            EngagementTracker::new(Arc::clone(&self.store), self.slug.clone(), self.tiers.clone());
        let engagement = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            update = tracker.track() => update,
        };
        publisher.update(|snap| {
            snap.engagement = engagement;
            snap.finished = true;
        });
        tracing::debug!("Result view for {} settled", self.slug);
    }
}
