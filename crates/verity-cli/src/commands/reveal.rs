//! Terminal rendering of a result screen.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::{self, Write};
use std::sync::Arc;
use verity_domain::{RevealPhase, Slug, TierTable};
use verity_resolver::{ResolverConfig, ResultView, RevealTimings, ViewOrigin, ViewSnapshot};
use verity_sdk::{share_url, VerityClient};

/// How to present a result.
#[derive(Debug, Clone)]
pub struct RevealOptions {
    /// Poll budget and reveal timings
    pub resolver: ResolverConfig,
    /// Public site for share links
    pub share_base: String,
    /// Play the reveal on the terminal
    pub animate: bool,
    /// Tier ladder for view standings
    pub tiers: TierTable,
}

/// Resolve `slug`, play the reveal if enabled, then print the result.
pub async fn present(
    client: Arc<VerityClient>,
    slug: Slug,
    origin: ViewOrigin,
    options: &RevealOptions,
    formatter: &Formatter,
) -> Result<()> {
    let mut resolver = options.resolver.clone();
    if !options.animate {
        resolver.reveal = RevealTimings::instant();
    }

    let mut view = ResultView::open_with_tiers(
        client,
        slug.clone(),
        origin,
        resolver,
        options.tiers.clone(),
    )?;

    let snapshot = if options.animate {
        let mut renderer = TerminalRenderer::new(formatter);
        let mut snapshots = view.subscribe();
        loop {
            let snapshot = snapshots.borrow_and_update().clone();
            renderer.render(&snapshot)?;
            if snapshot.finished {
                break snapshot;
            }
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break view.snapshot();
                    }
                }
                _ = tokio::signal::ctrl_c() => return Err(CliError::Interrupted),
            }
        }
    } else {
        tokio::select! {
            snapshot = view.settled() => snapshot,
            _ = tokio::signal::ctrl_c() => return Err(CliError::Interrupted),
        }
    };

    if let Some(error) = snapshot.error {
        return Err(CliError::Unresolved(error.message));
    }
    let claim = snapshot
        .claim
        .ok_or_else(|| CliError::Unresolved("The result view closed early".to_string()))?;

    let url = share_url(&options.share_base, &slug);
    println!(
        "{}",
        formatter.format_claim(&claim, &url, snapshot.engagement.as_ref())?
    );
    Ok(())
}

/// Writes each reveal step once, in order, as snapshots arrive.
struct TerminalRenderer<'a> {
    formatter: &'a Formatter,
    attempt: Option<u32>,
    live: bool,
    typed: usize,
    commentary_shown: bool,
    verdict_shown: bool,
}

impl<'a> TerminalRenderer<'a> {
    fn new(formatter: &'a Formatter) -> Self {
        Self {
            formatter,
            attempt: None,
            live: false,
            typed: 0,
            commentary_shown: false,
            verdict_shown: false,
        }
    }

    fn render(&mut self, snapshot: &ViewSnapshot) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let reveal = &snapshot.reveal;

        if reveal.phase == RevealPhase::Loading {
            if snapshot.error.is_none() && self.attempt != Some(snapshot.session.attempt_count) {
                self.attempt = Some(snapshot.session.attempt_count);
                write!(
                    out,
                    "\r{} ({}/{})",
                    self.formatter.info("Checking the facts..."),
                    snapshot.session.attempt_count,
                    snapshot.session.max_attempts
                )?;
            }
            if snapshot.finished && self.attempt.is_some() {
                writeln!(out)?;
            }
            return out.flush();
        }

        if self.attempt.take().is_some() {
            writeln!(out)?;
        }

        // A shared link to a finished claim skips straight to the result
        if reveal.phase == RevealPhase::Typing {
            self.live = true;
        }
        if !self.live {
            return out.flush();
        }

        let typed = reveal.typed.chars().count();
        if typed > self.typed {
            let fresh: String = reveal.typed.chars().skip(self.typed).collect();
            write!(out, "{}", fresh)?;
            self.typed = typed;
        }

        if reveal.phase >= RevealPhase::Commentary && !self.commentary_shown {
            self.commentary_shown = true;
            writeln!(out)?;
            if let Some(line) = reveal.commentary {
                writeln!(out, "{}", self.formatter.aside(line))?;
            }
        }

        if reveal.phase >= RevealPhase::Revealing && !self.verdict_shown {
            self.verdict_shown = true;
            if let Some(verdict) = reveal.verdict {
                writeln!(out, "{}", self.formatter.verdict_badge(verdict))?;
            }
        }

        if reveal.phase == RevealPhase::Complete && snapshot.finished {
            writeln!(out)?;
        }
        out.flush()
    }
}
