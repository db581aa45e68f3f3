//! Poll a claim until the backend has produced a verdict

use crate::{ResolutionError, ResolverConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use verity_domain::{Claim, ClaimStore, Slug, StoreError};

/// Where a resolution session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Still waiting for a verdict
    Polling,
    /// A verdict arrived
    Resolved,
    /// The attempt budget ran out
    TimedOut,
    /// A fatal error ended the session
    Errored,
}

impl SessionStatus {
    /// Get the status name
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Polling => "polling",
            SessionStatus::Resolved => "resolved",
            SessionStatus::TimedOut => "timedOut",
            SessionStatus::Errored => "errored",
        }
    }
}

/// Client-side tracking of one slug's poll loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionSession {
    /// Claim being resolved
    pub slug: Slug,
    /// Poll attempts made after the initial fetch
    pub attempt_count: u32,
    /// Poll attempt ceiling
    pub max_attempts: u32,
    /// Wait between attempts
    pub poll_interval: Duration,
    /// Current status
    pub status: SessionStatus,
}

impl ResolutionSession {
    /// Start a session in the `Polling` state
    pub fn new(slug: Slug, config: &ResolverConfig) -> Self {
        Self {
            slug,
            attempt_count: 0,
            max_attempts: config.max_attempts,
            poll_interval: config.poll_interval(),
            status: SessionStatus::Polling,
        }
    }

    /// Whether the session reached a final status
    pub fn is_finished(&self) -> bool {
        self.status != SessionStatus::Polling
    }
}

/// A successfully resolved claim
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The claim, with its verdict set
    pub claim: Claim,
    /// Poll attempts it took (0 when the first fetch had the verdict)
    pub attempts: u32,
    /// Whether the verdict was already there on the initial fetch
    pub resolved_on_first_fetch: bool,
}

/// Fetches a claim until it has a verdict
///
/// One immediate fetch, then up to `max_attempts` further fetches spaced
/// `poll_interval` apart. Fetches are strictly sequential.
///
/// # Examples
///
/// ```no_run
/// use tokio_util::sync::CancellationToken;
/// use verity_domain::Slug;
/// use verity_resolver::{ResolutionPoller, ResolverConfig};
/// use verity_sdk::VerityClient;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = VerityClient::new("http://localhost:3000/api")?;
/// let poller = ResolutionPoller::new(&ResolverConfig::default());
/// let mut session = poller.session(Slug::parse("k3x9a")?);
///
/// let resolution = poller
///     .resolve(&client, &mut session, &CancellationToken::new())
///     .await?;
/// println!("{:?}", resolution.claim.verdict);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResolutionPoller {
    config: ResolverConfig,
}

impl ResolutionPoller {
    /// Create a poller with the given configuration
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Fresh session for `slug`
    pub fn session(&self, slug: Slug) -> ResolutionSession {
        ResolutionSession::new(slug, &self.config)
    }

    /// Resolve the session's claim
    ///
    /// # Errors
    ///
    /// - `NotFound` as soon as any fetch reports the claim missing
    /// - `Transport` if the initial fetch fails
    /// - `Timeout` once the attempt budget is spent
    /// - `Cancelled` if `cancel` fires first
    pub async fn resolve<S: ClaimStore>(
        &self,
        store: &S,
        session: &mut ResolutionSession,
        cancel: &CancellationToken,
    ) -> Result<Resolution, ResolutionError> {
        self.resolve_with(store, session, cancel, |_| {}).await
    }

    /// Like [`resolve`](Self::resolve), calling `observe` after every change
    /// to the session
    pub async fn resolve_with<S, F>(
        &self,
        store: &S,
        session: &mut ResolutionSession,
        cancel: &CancellationToken,
        mut observe: F,
    ) -> Result<Resolution, ResolutionError>
    where
        S: ClaimStore,
        F: FnMut(&ResolutionSession) + Send,
    {
        let slug = session.slug.clone();
        tracing::debug!("Resolving {} (interval: {:?})", slug, session.poll_interval);

        match fetch(store, &slug, cancel).await? {
            Ok(claim) if claim.is_resolved() => {
                tracing::info!("Claim {} already resolved", slug);
                session.status = SessionStatus::Resolved;
                observe(session);
                return Ok(Resolution {
                    claim,
                    attempts: 0,
                    resolved_on_first_fetch: true,
                });
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                session.status = SessionStatus::Errored;
                observe(session);
                return Err(ResolutionError::NotFound {
                    slug: slug.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("Initial fetch of {} failed: {}", slug, e);
                session.status = SessionStatus::Errored;
                observe(session);
                return Err(ResolutionError::Transport {
                    slug: slug.to_string(),
                    message: e.to_string(),
                });
            }
        }

        while session.attempt_count < session.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Resolution of {} cancelled", slug);
                    return Err(ResolutionError::Cancelled);
                }
                _ = tokio::time::sleep(session.poll_interval) => {}
            }

            session.attempt_count += 1;
            observe(session);

            match fetch(store, &slug, cancel).await? {
                Ok(claim) if claim.is_resolved() => {
                    tracing::info!(
                        "Claim {} resolved after {} attempts",
                        slug,
                        session.attempt_count
                    );
                    session.status = SessionStatus::Resolved;
                    observe(session);
                    return Ok(Resolution {
                        claim,
                        attempts: session.attempt_count,
                        resolved_on_first_fetch: false,
                    });
                }
                Ok(_) => {
                    tracing::debug!(
                        "Claim {} pending ({}/{})",
                        slug,
                        session.attempt_count,
                        session.max_attempts
                    );
                }
                Err(e) if e.is_not_found() => {
                    session.status = SessionStatus::Errored;
                    observe(session);
                    return Err(ResolutionError::NotFound {
                        slug: slug.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "Poll {}/{} for {} failed, retrying: {}",
                        session.attempt_count,
                        session.max_attempts,
                        slug,
                        e
                    );
                }
            }
        }

        tracing::warn!("Gave up on {} after {} attempts", slug, session.attempt_count);
        session.status = SessionStatus::TimedOut;
        observe(session);
        Err(ResolutionError::Timeout {
            slug: slug.to_string(),
            attempts: session.attempt_count,
        })
    }
}

/// One fetch, abandoned if `cancel` fires while it is in flight
async fn fetch<S: ClaimStore>(
    store: &S,
    slug: &Slug,
    cancel: &CancellationToken,
) -> Result<Result<Claim, S::Error>, ResolutionError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ResolutionError::Cancelled),
        result = store.get_claim(slug) => Ok(result),
    }
}
