//! Claim module - a single fact-check request and its eventual verdict

use chrono::{DateTime, Utc};
use std::fmt;

/// Maximum length of a claim query, in characters
pub const MAX_QUERY_CHARS: usize = 2000;

/// Opaque backend identifier for a claim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimId(String);

impl ClaimId {
    /// Wrap a backend-issued identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL-safe lookup key for a claim, used in share links
///
/// # Examples
///
/// ```
/// use verity_domain::Slug;
///
/// let slug = Slug::parse("moon-landing-x7f2").unwrap();
/// assert_eq!(slug.as_str(), "moon-landing-x7f2");
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("has spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    /// Parse and validate a slug
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("Slug must not be empty".to_string());
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(format!("Invalid character '{}' in slug '{}'", bad, s));
        }

        Ok(Self(s.to_string()))
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Outcome of a fact-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Verified true
    True,
    /// Shown to be false
    False,
    /// True with minor caveats
    MostlyTrue,
    /// False with a grain of truth
    MostlyFalse,
    /// Both sides have merit
    Nuanced,
    /// Accurate only with missing context
    NeedsContext,
    /// Technically accurate but framed to mislead
    Misleading,
    /// Not enough evidence either way
    Unverified,
}

impl Verdict {
    /// All verdicts, in display order
    pub const ALL: [Verdict; 8] = [
        Verdict::True,
        Verdict::MostlyTrue,
        Verdict::Nuanced,
        Verdict::NeedsContext,
        Verdict::Misleading,
        Verdict::MostlyFalse,
        Verdict::False,
        Verdict::Unverified,
    ];

    /// Wire code (e.g. `MOSTLY_TRUE`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::MostlyTrue => "MOSTLY_TRUE",
            Verdict::MostlyFalse => "MOSTLY_FALSE",
            Verdict::Nuanced => "NUANCED",
            Verdict::NeedsContext => "NEEDS_CONTEXT",
            Verdict::Misleading => "MISLEADING",
            Verdict::Unverified => "UNVERIFIED",
        }
    }

    /// Parse a wire code, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TRUE" => Some(Verdict::True),
            "FALSE" => Some(Verdict::False),
            "MOSTLY_TRUE" => Some(Verdict::MostlyTrue),
            "MOSTLY_FALSE" => Some(Verdict::MostlyFalse),
            "NUANCED" => Some(Verdict::Nuanced),
            "NEEDS_CONTEXT" => Some(Verdict::NeedsContext),
            "MISLEADING" => Some(Verdict::Misleading),
            "UNVERIFIED" => Some(Verdict::Unverified),
            _ => None,
        }
    }

    /// Human-readable badge label
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::True => "Verified True",
            Verdict::False => "False",
            Verdict::MostlyTrue => "Mostly True",
            Verdict::MostlyFalse => "Mostly False",
            Verdict::Nuanced => "Nuanced",
            Verdict::NeedsContext => "Needs Context",
            Verdict::Misleading => "Misleading",
            Verdict::Unverified => "Unverified",
        }
    }

    /// Badge colour (hex)
    pub fn color(&self) -> &'static str {
        match self {
            Verdict::True | Verdict::MostlyTrue => "#16a34a",
            Verdict::False | Verdict::MostlyFalse => "#dc2626",
            Verdict::Nuanced | Verdict::Misleading => "#ca8a04",
            Verdict::NeedsContext => "#0891b2",
            Verdict::Unverified => "#7c3aed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation style requested for the write-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    /// Polite and even-handed
    #[default]
    Cordial,
    /// Citations first
    Academic,
    /// No mercy
    Brutal,
}

impl Tone {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Cordial => "cordial",
            Tone::Academic => "academic",
            Tone::Brutal => "brutal",
        }
    }

    /// Parse a wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cordial" => Some(Tone::Cordial),
            "academic" => Some(Tone::Academic),
            "brutal" => Some(Tone::Brutal),
            _ => None,
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tone: {}", s))
    }
}

/// Kind of publication a source comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Dedicated fact-checking outlet
    FactChecker,
    /// News reporting
    News,
    /// Peer-reviewed or academic
    Academic,
    /// Primary document or dataset
    Primary,
    /// Grounded AI search result
    AiGrounded,
}

impl SourceType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::FactChecker => "fact-checker",
            SourceType::News => "news",
            SourceType::Academic => "academic",
            SourceType::Primary => "primary",
            SourceType::AiGrounded => "ai-grounded",
        }
    }

    /// Parse a wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fact-checker" => Some(SourceType::FactChecker),
            "news" => Some(SourceType::News),
            "academic" => Some(SourceType::Academic),
            "primary" => Some(SourceType::Primary),
            "ai-grounded" => Some(SourceType::AiGrounded),
            _ => None,
        }
    }
}

/// A cited source backing a verdict
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Link to the source
    pub url: String,
    /// Title as published
    pub title: String,
    /// Relevant excerpt
    pub snippet: Option<String>,
    /// Publication kind
    pub source_type: SourceType,
    /// Credibility score assigned by the research pipeline
    pub credibility_score: f64,
    /// Publication date as reported by the backend
    pub published_date: Option<String>,
}

/// A fact-check request
///
/// A claim is *pending* while `verdict` is `None` and *resolved* once it is set.
/// The client never mutates a claim; a newer fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Backend identifier
    pub id: ClaimId,

    /// Lookup key
    pub slug: Slug,

    /// The statement being checked
    pub query: String,

    /// Requested write-up style
    pub tone: Tone,

    /// Outcome, absent until resolved
    pub verdict: Option<Verdict>,

    /// Model confidence in the verdict (0.0-1.0)
    pub confidence: Option<f64>,

    /// One-line takeaway
    pub tldr: Option<String>,

    /// Full write-up
    pub summary: Option<String>,

    /// Cited sources, in backend order
    pub sources: Vec<Source>,

    /// Submission time
    pub created_at: DateTime<Utc>,

    /// Time the verdict was reached
    pub checked_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Whether the backend has reached a verdict
    pub fn is_resolved(&self) -> bool {
        self.verdict.is_some()
    }

    /// Whether the claim is still being researched
    pub fn is_pending(&self) -> bool {
        self.verdict.is_none()
    }
}

/// Validate a query before submission, returning the trimmed text
///
/// # Examples
///
/// ```
/// use verity_domain::claim::validate_query;
///
/// assert_eq!(validate_query("  the moon is cheese ").unwrap(), "the moon is cheese");
/// assert!(validate_query("   ").is_err());
/// ```
pub fn validate_query(query: &str) -> Result<&str, String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err("Claim must not be empty".to_string());
    }

    let len = trimmed.chars().count();
    if len > MAX_QUERY_CHARS {
        return Err(format!(
            "Claim is {} characters; the limit is {}",
            len, MAX_QUERY_CHARS
        ));
    }

    Ok(trimmed)
}
