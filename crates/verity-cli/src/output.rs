//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::SecondsFormat;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use verity_domain::{Claim, LeaderboardEntry, SharerStats, TierProgress, TierTable, Verdict};
use verity_resolver::EngagementUpdate;
use verity_sdk::Submission;

const PROGRESS_WIDTH: usize = 20;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a resolved claim with its share link and view standing.
    pub fn format_claim(
        &self,
        claim: &Claim,
        share_url: &str,
        engagement: Option<&EngagementUpdate>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = claim_json(claim);
                value["shareUrl"] = json!(share_url);
                if let Some(update) = engagement {
                    value["views"] = json!(update.views);
                    value["tier"] = progress_json(&update.progress);
                }
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(self.claim_card(claim, share_url, engagement)),
            OutputFormat::Quiet => Ok(claim
                .verdict
                .map(|v| v.as_str().to_string())
                .unwrap_or_else(|| "PENDING".to_string())),
        }
    }

    fn claim_card(
        &self,
        claim: &Claim,
        share_url: &str,
        engagement: Option<&EngagementUpdate>,
    ) -> String {
        let mut lines = Vec::new();

        lines.push(format!("\"{}\"", claim.query));
        match claim.verdict {
            Some(verdict) => {
                let mut badge = self.verdict_badge(verdict);
                if let Some(confidence) = claim.confidence {
                    badge.push_str(&format!("  ({:.0}% confidence)", confidence * 100.0));
                }
                lines.push(badge);
            }
            None => lines.push(self.colorize("Still checking...", "yellow")),
        }

        if let Some(tldr) = &claim.tldr {
            lines.push(String::new());
            lines.push(self.bold(&format!("TL;DR: {}", tldr)));
        }
        if let Some(summary) = &claim.summary {
            lines.push(String::new());
            lines.push(summary.clone());
        }

        if !claim.sources.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Source", "Type", "Credibility", "URL"]);
            for source in &claim.sources {
                builder.push_record([
                    source.title.clone(),
                    source.source_type.as_str().to_string(),
                    format!("{:.0}%", source.credibility_score * 100.0),
                    source.url.clone(),
                ]);
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));

            lines.push(String::new());
            lines.push(table.to_string());
        }

        lines.push(String::new());
        lines.push(format!("Share: {}", self.colorize(share_url, "cyan")));

        if let Some(update) = engagement {
            lines.push(format!(
                "Views: {}  {}",
                update.views,
                self.tier_line(&update.progress)
            ));
        }

        lines.join("\n")
    }

    /// Format a claim that was submitted without waiting.
    pub fn format_submission(&self, submission: &Submission, share_url: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = claim_json(&submission.claim);
                value["shareUrl"] = json!(share_url);
                if let Some(limit) = &submission.rate_limit {
                    value["rateLimit"] = json!({
                        "remaining": limit.remaining,
                        "limit": limit.limit,
                        "resetAt": limit.reset_at,
                    });
                }
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(self.success(&format!(
                "Submitted {} ({})",
                submission.claim.slug, share_url
            ))),
            OutputFormat::Quiet => Ok(submission.claim.slug.to_string()),
        }
    }

    /// Format one view count's standing on the ladder.
    pub fn format_tier_progress(&self, progress: &TierProgress) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&progress_json(progress))?),
            OutputFormat::Table => Ok(self.tier_line(progress)),
            OutputFormat::Quiet => Ok(progress.tier.name.clone()),
        }
    }

    /// Format the whole tier ladder.
    pub fn format_tiers(&self, tiers: &TierTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = tiers
                    .tiers()
                    .iter()
                    .map(|t| {
                        json!({
                            "name": t.name,
                            "minViews": t.min_views,
                            "color": t.color,
                            "bgColor": t.bg_color,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Tier", "Views"]);
                for tier in tiers.tiers() {
                    builder.push_record([
                        self.hex(&tier.name, &tier.color),
                        tier.min_views.to_string(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(tiers
                .tiers()
                .iter()
                .map(|t| t.name.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format leaderboard entries.
    pub fn format_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        let mut value = stats_json(&e.stats);
                        value["rank"] = json!(e.rank);
                        value
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No sharers yet.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Sharer", "Tier", "Views", "Shared"]);
                for entry in entries {
                    builder.push_record([
                        entry.rank.to_string(),
                        entry.stats.display_name.clone(),
                        self.hex(&entry.stats.tier.name, &entry.stats.tier.color),
                        entry.stats.total_views.to_string(),
                        entry.stats.claims_shared.to_string(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.stats.display_name.clone())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the caller's own stats.
    pub fn format_sharer(&self, stats: &SharerStats, tiers: &TierTable) -> Result<String> {
        let progress = stats.progress(tiers);
        match self.format {
            OutputFormat::Json => {
                let mut value = stats_json(stats);
                value["progress"] = progress_json(&progress);
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let rank = stats
                    .rank
                    .map(|r| format!("#{}", r))
                    .unwrap_or_else(|| "unranked".to_string());
                Ok(format!(
                    "{} ({})\nViews: {}  Shared: {}\n{}",
                    self.bold(&stats.display_name),
                    rank,
                    stats.total_views,
                    stats.claims_shared,
                    self.tier_line(&progress)
                ))
            }
            OutputFormat::Quiet => Ok(stats.tier.name.clone()),
        }
    }

    /// Tier name with a progress bar toward the next tier.
    pub fn tier_line(&self, progress: &TierProgress) -> String {
        let name = self.hex(&progress.tier.name, &progress.tier.color);
        match &progress.next {
            Some(next) => format!(
                "{} {} {}% ({} to {})",
                name,
                progress_bar(progress.percent),
                progress.percent,
                progress.views_to_next,
                next.name
            ),
            None => format!("{} {} max tier", name, progress_bar(progress.percent)),
        }
    }

    /// Verdict label in its badge colour.
    pub fn verdict_badge(&self, verdict: Verdict) -> String {
        let label = format!(" {} ", verdict.label().to_uppercase());
        if !self.color_enabled {
            return format!("[{}]", label.trim());
        }
        match parse_hex(verdict.color()) {
            Some((r, g, b)) => label.white().bold().on_truecolor(r, g, b).to_string(),
            None => label.bold().to_string(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Dim italic text, for commentary.
    pub fn aside(&self, text: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.italic().dimmed().to_string()
    }

    fn bold(&self, text: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.bold().to_string()
    }

    fn hex(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match parse_hex(color) {
            Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
            None => text.to_string(),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn claim_json(claim: &Claim) -> serde_json::Value {
    json!({
        "id": claim.id.as_str(),
        "slug": claim.slug.as_str(),
        "query": claim.query,
        "tone": claim.tone.as_str(),
        "verdict": claim.verdict.map(|v| v.as_str()),
        "confidence": claim.confidence,
        "tldr": claim.tldr,
        "summary": claim.summary,
        "sources": claim.sources.iter().map(|s| json!({
            "url": s.url,
            "title": s.title,
            "snippet": s.snippet,
            "type": s.source_type.as_str(),
            "credibilityScore": s.credibility_score,
            "publishedDate": s.published_date,
        })).collect::<Vec<_>>(),
        "createdAt": claim.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        "checkedAt": claim
            .checked_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    })
}

fn progress_json(progress: &TierProgress) -> serde_json::Value {
    json!({
        "views": progress.views,
        "tier": progress.tier.name,
        "nextTier": progress.next.as_ref().map(|t| t.name.as_str()),
        "progressToNextTier": progress.percent,
        "viewsToNextTier": progress.views_to_next,
    })
}

fn stats_json(stats: &SharerStats) -> serde_json::Value {
    json!({
        "displayName": stats.display_name,
        "totalViews": stats.total_views,
        "claimsShared": stats.claims_shared,
        "tier": stats.tier.name,
        "rank": stats.rank,
    })
}

/// Fixed-width bar for a 0-100 percentage.
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * PROGRESS_WIDTH / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}

/// `#rrggbb` to an RGB triple.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
