//! JSON request/response shapes for the claims API.

use crate::error::SdkError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verity_domain::{
    Claim, ClaimId, LeaderboardEntry, SharerStats, Slug, Source, SourceType, TierTable, Tone,
    Verdict,
};

/// Claim submission request
#[derive(Debug, Serialize)]
pub struct CreateClaimRequest<'a> {
    /// Statement to check
    pub query: &'a str,
    /// Requested tone
    pub tone: &'a str,
}

/// Share recording request
#[derive(Debug, Serialize)]
pub struct ShareRequest<'a> {
    /// Share method wire name
    pub method: &'a str,
}

/// Submission quota reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// Submissions left in the window
    pub remaining: u32,
    /// Submissions allowed per window
    pub limit: u32,
    /// When the window resets (RFC 3339)
    pub reset_at: String,
}

/// Envelope for claim endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    /// Whether the request succeeded
    #[serde(default)]
    pub success: bool,
    /// The claim, on success
    pub claim: Option<WireClaim>,
    /// Error text, on failure
    pub error: Option<String>,
    /// Submission quota, on create
    pub rate_limit: Option<RateLimit>,
}

/// Envelope for the view counter
#[derive(Debug, Deserialize)]
pub struct ViewResponse {
    /// Whether the request succeeded
    #[serde(default)]
    pub success: bool,
    /// Cumulative view count
    pub views: Option<u64>,
    /// Error text, on failure
    pub error: Option<String>,
}

/// Envelope for fire-and-forget endpoints
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    /// Whether the request succeeded
    #[serde(default)]
    pub success: bool,
    /// Error text, on failure
    pub error: Option<String>,
}

/// Body of a non-2xx response
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Error text
    pub error: Option<String>,
}

/// Claim as sent by the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireClaim {
    pub id: String,
    pub slug: String,
    pub query: String,
    pub tone: String,
    pub verdict: Option<String>,
    pub confidence: Option<f64>,
    pub tldr: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub sources: Vec<WireSource>,
    pub created_at: String,
    pub checked_at: Option<String>,
}

/// Source as sent by the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSource {
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub snippet: Option<String>,
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub credibility_score: f64,
    pub published_date: Option<String>,
}

/// Envelope for the leaderboard
#[derive(Debug, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub leaderboard: Vec<WireLeaderboardEntry>,
    pub error: Option<String>,
}

/// Leaderboard row as sent by the backend
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLeaderboardEntry {
    pub rank: u32,
    pub display_name: String,
    pub total_views: u64,
    pub claims_shared: u64,
}

/// Envelope for the caller's own stats
#[derive(Debug, Deserialize)]
pub struct SharerResponse {
    #[serde(default)]
    pub success: bool,
    pub sharer: Option<WireSharer>,
    pub error: Option<String>,
}

/// Sharer stats as sent by the backend
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSharer {
    pub display_name: String,
    pub total_views: u64,
    pub claims_shared: u64,
    pub rank: Option<u32>,
}

/// Parse an RFC 3339 timestamp, normalised to UTC
fn timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, SdkError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| SdkError::Decode(format!("Invalid {} '{}': {}", field, value, e)))
}

fn domain_source(source: WireSource) -> Source {
    let source_type = SourceType::parse(&source.source_type).unwrap_or_else(|| {
        tracing::debug!("Unknown source type '{}', treating as news", source.source_type);
        SourceType::News
    });

    Source {
        url: source.url,
        title: source.title,
        snippet: source.snippet,
        source_type,
        credibility_score: source.credibility_score,
        published_date: source.published_date,
    }
}

impl TryFrom<WireClaim> for Claim {
    type Error = SdkError;

    fn try_from(claim: WireClaim) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&claim.slug).map_err(SdkError::Decode)?;

        let tone = Tone::parse(&claim.tone).unwrap_or_else(|| {
            tracing::debug!("Unknown tone '{}', treating as cordial", claim.tone);
            Tone::default()
        });

        // Unrecognised verdicts still count as resolved.
        let verdict = claim.verdict.as_deref().map(|v| {
            Verdict::parse(v).unwrap_or_else(|| {
                tracing::debug!("Unknown verdict '{}', treating as unverified", v);
                Verdict::Unverified
            })
        });

        let created_at = timestamp("createdAt", &claim.created_at)?;
        let checked_at = claim
            .checked_at
            .as_deref()
            .map(|ts| timestamp("checkedAt", ts))
            .transpose()?;

        Ok(Claim {
            id: ClaimId::new(claim.id),
            slug,
            query: claim.query,
            tone,
            verdict,
            confidence: claim.confidence,
            tldr: claim.tldr,
            summary: claim.summary,
            sources: claim.sources.into_iter().map(domain_source).collect(),
            created_at,
            checked_at,
        })
    }
}

impl WireLeaderboardEntry {
    /// Convert to a domain entry, deriving the tier locally
    pub fn into_domain(self, tiers: &TierTable) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: self.rank,
            stats: SharerStats::new(
                tiers,
                self.display_name,
                self.total_views,
                self.claims_shared,
                Some(self.rank),
            ),
        }
    }
}

impl WireSharer {
    /// Convert to domain stats, deriving the tier locally
    pub fn into_domain(self, tiers: &TierTable) -> SharerStats {
        SharerStats::new(
            tiers,
            self.display_name,
            self.total_views,
            self.claims_shared,
            self.rank,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PENDING: &str = r#"{
        "success": true,
        "claim": {
            "id": "c_123",
            "slug": "moon-landing-x7f2",
            "query": "The moon landing was staged",
            "tone": "brutal",
            "sources": [],
            "createdAt": "2026-03-01T12:00:00Z"
        }
    }"#;

    const RESOLVED: &str = r#"{
        "success": true,
        "claim": {
            "id": "c_123",
            "slug": "moon-landing-x7f2",
            "query": "The moon landing was staged",
            "tone": "brutal",
            "verdict": "FALSE",
            "confidence": 0.97,
            "summary": "It happened.",
            "sources": [
                {
                    "url": "https://nasa.gov/apollo11",
                    "title": "Apollo 11",
                    "type": "primary",
                    "credibilityScore": 0.99
                },
                {
                    "url": "https://example.com",
                    "title": "Blog",
                    "type": "substack",
                    "credibilityScore": 0.2
                }
            ],
            "createdAt": "2026-03-01T12:00:00Z",
            "checkedAt": "2026-03-01T12:00:42Z"
        },
        "rateLimit": { "remaining": 4, "limit": 5, "resetAt": "2026-03-02T12:00:00Z" }
    }"#;

    #[test]
    fn test_pending_claim_parsing() {
        let response: ClaimResponse = serde_json::from_str(PENDING).unwrap();
        let claim = Claim::try_from(response.claim.unwrap()).unwrap();

        assert!(claim.is_pending());
        assert_eq!(claim.tone, Tone::Brutal);
        assert_eq!(claim.created_at.timestamp(), 1_772_366_400);
        assert!(claim.checked_at.is_none());
    }

    #[test]
    fn test_resolved_claim_parsing() {
        let response: ClaimResponse = serde_json::from_str(RESOLVED).unwrap();
        assert_eq!(response.rate_limit.as_ref().unwrap().remaining, 4);

        let claim = Claim::try_from(response.claim.unwrap()).unwrap();
        assert_eq!(claim.verdict, Some(Verdict::False));
        assert_eq!(claim.checked_at.map(|t| t.timestamp()), Some(1_772_366_442));
        assert_eq!(claim.sources.len(), 2);
        assert_eq!(claim.sources[0].source_type, SourceType::Primary);
        assert_eq!(claim.sources[1].source_type, SourceType::News);
    }

    #[test]
    fn test_timestamps_keep_precision_and_offset() {
        let json = RESOLVED
            .replace("2026-03-01T12:00:00Z", "1969-12-31T23:59:59.500Z")
            .replace("2026-03-01T12:00:42Z", "2026-03-01T14:00:42.125+02:00");
        let response: ClaimResponse = serde_json::from_str(&json).unwrap();
        let claim = Claim::try_from(response.claim.unwrap()).unwrap();

        assert_eq!(claim.created_at.timestamp(), -1);
        assert_eq!(claim.created_at.timestamp_subsec_millis(), 500);

        let checked = claim.checked_at.unwrap();
        assert_eq!(checked.timestamp(), 1_772_366_442);
        assert_eq!(checked.timestamp_subsec_millis(), 125);
    }

    #[test]
    fn test_unknown_verdict_is_unverified() {
        let json = RESOLVED.replace("\"FALSE\"", "\"PANTS_ON_FIRE\"");
        let response: ClaimResponse = serde_json::from_str(&json).unwrap();
        let claim = Claim::try_from(response.claim.unwrap()).unwrap();
        assert_eq!(claim.verdict, Some(Verdict::Unverified));
    }

    #[test]
    fn test_bad_timestamp_is_decode_error() {
        let json = PENDING.replace("2026-03-01T12:00:00Z", "yesterday");
        let response: ClaimResponse = serde_json::from_str(&json).unwrap();
        let result = Claim::try_from(response.claim.unwrap());
        assert!(matches!(result, Err(SdkError::Decode(_))));
    }

    #[test]
    fn test_leaderboard_tier_is_derived() {
        let entry = WireLeaderboardEntry {
            rank: 1,
            display_name: "ana".to_string(),
            total_views: 1200,
            claims_shared: 30,
        };
        let entry = entry.into_domain(&TierTable::standard());
        assert_eq!(entry.stats.tier.name, "Truth Sage");
        assert_eq!(entry.stats.rank, Some(1));
    }
}
