//! Verity Rust SDK
//!
//! Client library for the Verity claims API. [`VerityClient`] implements the
//! domain's [`ClaimStore`](verity_domain::ClaimStore) boundary so the
//! resolution flow can run against the real backend.
//!
//! # Example
//!
//! ```no_run
//! use verity_domain::Tone;
//! use verity_sdk::VerityClient;
//!
//! # async fn demo() -> Result<(), verity_sdk::SdkError> {
//! let client = VerityClient::new("http://localhost:3000/api")?;
//! let submission = client
//!     .submit_claim("The Great Wall is visible from space", Tone::Cordial)
//!     .await?;
//! println!("Submitted {}", submission.claim.slug);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod wire;

pub use client::{share_url, Submission, VerityClient, DEFAULT_TIMEOUT_SECS};
pub use error::SdkError;
pub use wire::RateLimit;
