//! Trait definitions for external interactions
//!
//! The claim backend is an opaque collaborator. These traits define the
//! boundary; the HTTP implementation lives in `verity-sdk`.

use crate::{Claim, ShareMethod, Slug, Tone};
use std::future::Future;

/// Failure reported by a [`ClaimStore`]
///
/// The resolution flow only needs to tell "this slug does not exist" apart
/// from every other (transient) failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
    /// Whether the backend definitively reported the claim as missing
    fn is_not_found(&self) -> bool;
}

/// Trait for creating and reading claims
///
/// Implemented by the SDK (`VerityClient`) and by in-memory stores in tests.
pub trait ClaimStore: Send + Sync {
    /// Error type for store operations
    type Error: StoreError;

    /// Submit a new claim; the returned claim is usually still pending
    fn create_claim(
        &self,
        query: &str,
        tone: Tone,
    ) -> impl Future<Output = Result<Claim, Self::Error>> + Send;

    /// Fetch the current state of a claim
    fn get_claim(&self, slug: &Slug) -> impl Future<Output = Result<Claim, Self::Error>> + Send;

    /// Record one view, returning the cumulative view count
    fn record_view(&self, slug: &Slug) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Record a share
    fn record_share(
        &self,
        slug: &Slug,
        method: ShareMethod,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
