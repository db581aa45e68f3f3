//! Verity Resolver
//!
//! Client-side flow between submitting a claim and showing its verdict.
//!
//! # Overview
//!
//! Fact-checking is asynchronous: a freshly submitted claim has no verdict yet.
//! The resolver is responsible for:
//! - **Resolution**: polling the backend until the verdict arrives, within an
//!   attempt budget
//! - **Reveal**: walking the verdict through timed phases before showing the
//!   full result
//! - **Engagement**: recording one view per result screen and placing the
//!   sharer on the tier ladder
//!
//! ## Reveal Phases
//!
//! | Phase | Shows | Held for |
//! |-------|-------|----------|
//! | **loading** | spinner | until the claim resolves |
//! | **typing** | the query, one character at a time | 30ms per char + 500ms |
//! | **commentary** | a random editorial line | 2500ms |
//! | **revealing** | the verdict badge | 1000ms |
//! | **complete** | the full result | terminal |
//!
//! A viewer arriving from a shared link whose claim was already resolved goes
//! straight from `loading` to `complete`.
//!
//! # Usage
//!
//! ## Result Screen
//!
//! ```no_run
//! use std::sync::Arc;
//! use verity_domain::Slug;
//! use verity_resolver::{ResolverConfig, ResultView, ViewOrigin};
//! use verity_sdk::VerityClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(VerityClient::new("http://localhost:3000/api")?);
//!     let slug = Slug::parse("k3x9a")?;
//!     let view = ResultView::open(client, slug, ViewOrigin::Navigation, ResolverConfig::default())?;
//!
//!     let mut snapshots = view.subscribe();
//!     while snapshots.changed().await.is_ok() {
//!         let snapshot = snapshots.borrow_and_update().clone();
//!         println!("{} {}", snapshot.reveal.phase, snapshot.reveal.typed);
//!         if snapshot.finished {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use verity_resolver::{ResolverConfig, RevealTimings};
//!
//! // Default: poll every 2s, up to 60 times
//! let config = ResolverConfig::default();
//!
//! // Patient: poll every 3s, up to 90 times
//! let config = ResolverConfig::patient();
//!
//! // No reveal delays, for non-interactive output
//! let config = ResolverConfig {
//!     reveal: RevealTimings::instant(),
//!     ..ResolverConfig::default()
//! };
//! ```
//!
//! # Configuration
//!
//! The resolver can be configured via TOML:
//!
//! ```toml
//! [resolver]
//! poll_interval_ms = 2000
//! max_attempts = 60
//!
//! [resolver.reveal]
//! per_char_ms = 30
//! settle_ms = 500
//! commentary_ms = 2500
//! reveal_ms = 1000
//! ```

#![warn(missing_docs)]

mod config;
mod engagement;
mod error;
mod poller;
mod sequencer;
mod view;

pub use config::{ResolverConfig, RevealTimings};
pub use engagement::{EngagementTracker, EngagementUpdate};
pub use error::{ResolutionError, RevealError};
pub use poller::{Resolution, ResolutionPoller, ResolutionSession, SessionStatus};
pub use sequencer::{RevealSequencer, RevealSnapshot};
pub use view::{ResultView, ViewError, ViewErrorKind, ViewOrigin, ViewSnapshot};
