//! Check command implementation.

use super::reveal::{self, RevealOptions};
use crate::cli::CheckArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use std::sync::Arc;
use verity_resolver::ViewOrigin;
use verity_sdk::{share_url, VerityClient};

/// Execute the check command.
pub async fn execute_check(
    args: CheckArgs,
    client: Arc<VerityClient>,
    options: &RevealOptions,
    formatter: &Formatter,
) -> Result<()> {
    let query = args.query_text();
    let submission = client.submit_claim(&query, args.tone.into()).await?;
    let slug = submission.claim.slug.clone();
    tracing::info!("Submitted claim {}", slug);

    if let Some(limit) = &submission.rate_limit {
        tracing::debug!("Rate limit: {}/{} left", limit.remaining, limit.limit);
        if formatter.format() == OutputFormat::Table {
            eprintln!(
                "{}",
                formatter.info(&format!(
                    "{} of {} checks left until {}",
                    limit.remaining, limit.limit, limit.reset_at
                ))
            );
        }
    }

    if args.no_wait {
        let url = share_url(&options.share_base, &slug);
        println!("{}", formatter.format_submission(&submission, &url)?);
        return Ok(());
    }

    reveal::present(client, slug, ViewOrigin::Submission, options, formatter).await
}
