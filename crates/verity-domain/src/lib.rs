//! Verity Domain Layer
//!
//! Core model for the Verity fact-checking client. This crate has no external
//! dependencies and defines the concepts every other layer builds on.
//!
//! ## Key Concepts
//!
//! - **Claim**: a submitted statement, pending until the backend reaches a verdict
//! - **Slug**: the URL-safe key claims are shared and looked up by
//! - **Reveal phases**: the staged disclosure of a verdict (loading → complete)
//! - **Tiers**: the engagement ladder sharers climb with views
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure logic only; timers and network live in other crates
//! - [`traits::ClaimStore`] is the boundary to the claim backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod reveal;
pub mod sharer;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, Slug, Source, SourceType, Tone, Verdict};
pub use reveal::RevealPhase;
pub use sharer::{LeaderboardEntry, ShareMethod, SharerStats};
pub use tier::{Tier, TierProgress, TierTable};
pub use traits::{ClaimStore, StoreError};
