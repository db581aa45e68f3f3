//! Verity client implementation.

use crate::error::SdkError;
use crate::wire::{
    AckResponse, ClaimResponse, CreateClaimRequest, ErrorBody, LeaderboardResponse, RateLimit,
    ShareRequest, SharerResponse, ViewResponse,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use verity_domain::claim::validate_query;
use verity_domain::{
    Claim, ClaimStore, LeaderboardEntry, ShareMethod, SharerStats, Slug, TierTable, Tone,
};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// A freshly submitted claim
#[derive(Debug, Clone)]
pub struct Submission {
    /// The claim, usually still pending
    pub claim: Claim,
    /// Submission quota, if the backend reported one
    pub rate_limit: Option<RateLimit>,
}

/// HTTP client for the Verity claims API
#[derive(Debug, Clone)]
pub struct VerityClient {
    base_url: String,
    http: reqwest::Client,
}

impl VerityClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:3000/api`)
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(base_url, http))
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit a claim for checking
    pub async fn submit_claim(&self, query: &str, tone: Tone) -> Result<Submission, SdkError> {
        let query = validate_query(query).map_err(SdkError::InvalidInput)?;

        let request = CreateClaimRequest {
            query,
            tone: tone.as_str(),
        };

        let response = self
            .http
            .post(self.url("/claims"))
            .json(&request)
            .send()
            .await?;

        let body: ClaimResponse = read_json(response).await?;
        let claim = match body.claim {
            Some(claim) if body.success => Claim::try_from(claim)?,
            _ => return Err(SdkError::from_envelope(body.error, "Failed to create claim")),
        };

        tracing::info!(slug = %claim.slug, "Claim submitted");

        Ok(Submission {
            claim,
            rate_limit: body.rate_limit,
        })
    }

    /// Fetch the current state of a claim
    pub async fn fetch_claim(&self, slug: &Slug) -> Result<Claim, SdkError> {
        let response = self
            .http
            .get(self.url(&format!("/claims/{}", slug)))
            .send()
            .await?;

        let body: ClaimResponse = read_json(response).await?;
        match body.claim {
            Some(claim) if body.success => Claim::try_from(claim),
            _ => Err(SdkError::from_envelope(body.error, "Claim not found")),
        }
    }

    /// Record a view, returning the cumulative count
    pub async fn post_view(&self, slug: &Slug) -> Result<u64, SdkError> {
        let response = self
            .http
            .post(self.url(&format!("/claims/{}/view", slug)))
            .send()
            .await?;

        let body: ViewResponse = read_json(response).await?;
        match body.views {
            Some(views) if body.success => Ok(views),
            _ => Err(SdkError::from_envelope(body.error, "View was not recorded")),
        }
    }

    /// Record a share
    pub async fn post_share(&self, slug: &Slug, method: ShareMethod) -> Result<(), SdkError> {
        let response = self
            .http
            .post(self.url(&format!("/claims/{}/share", slug)))
            .json(&ShareRequest {
                method: method.as_str(),
            })
            .send()
            .await?;

        let body: AckResponse = read_json(response).await?;
        if body.success {
            Ok(())
        } else {
            Err(SdkError::from_envelope(body.error, "Share was not recorded"))
        }
    }

    /// Fetch the public leaderboard, deriving tiers from `tiers`
    pub async fn leaderboard(&self, tiers: &TierTable) -> Result<Vec<LeaderboardEntry>, SdkError> {
        let response = self.http.get(self.url("/leaderboard")).send().await?;

        let body: LeaderboardResponse = read_json(response).await?;
        if !body.success {
            return Err(SdkError::from_envelope(body.error, "Leaderboard unavailable"));
        }

        let mut entries: Vec<LeaderboardEntry> = body
            .leaderboard
            .into_iter()
            .map(|e| e.into_domain(tiers))
            .collect();
        entries.sort_by_key(|e| e.rank);

        Ok(entries)
    }

    /// Fetch the caller's own sharer stats
    pub async fn my_stats(&self, tiers: &TierTable) -> Result<SharerStats, SdkError> {
        let response = self.http.get(self.url("/sharers/me")).send().await?;

        let body: SharerResponse = read_json(response).await?;
        match body.sharer {
            Some(sharer) if body.success => Ok(sharer.into_domain(tiers)),
            _ => Err(SdkError::from_envelope(body.error, "Sharer stats unavailable")),
        }
    }
}

/// Public link for a claim (`<share_base>/r/<slug>`)
pub fn share_url(share_base: &str, slug: &Slug) -> String {
    format!("{}/r/{}", share_base.trim_end_matches('/'), slug)
}

/// Decode a JSON body, mapping 404 and other non-2xx statuses to errors
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SdkError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        if status == StatusCode::NOT_FOUND {
            return Err(SdkError::NotFound(message));
        }
        return Err(SdkError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl ClaimStore for VerityClient {
    type Error = SdkError;

    async fn create_claim(&self, query: &str, tone: Tone) -> Result<Claim, SdkError> {
        self.submit_claim(query, tone).await.map(|s| s.claim)
    }

    async fn get_claim(&self, slug: &Slug) -> Result<Claim, SdkError> {
        self.fetch_claim(slug).await
    }

    async fn record_view(&self, slug: &Slug) -> Result<u64, SdkError> {
        self.post_view(slug).await
    }

    async fn record_share(&self, slug: &Slug, method: ShareMethod) -> Result<(), SdkError> {
        self.post_share(slug, method).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = VerityClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/claims"), "http://localhost:3000/api/claims");
    }

    #[test]
    fn test_share_url() {
        let slug = Slug::parse("abc123").unwrap();
        assert_eq!(
            share_url("https://verity.example/", &slug),
            "https://verity.example/r/abc123"
        );
    }
}
