//! Share command implementation.

use crate::cli::ShareArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::sync::Arc;
use verity_domain::{ShareMethod, Slug, TierTable};
use verity_resolver::EngagementTracker;
use verity_sdk::{share_url, VerityClient};

/// Execute the share command.
pub async fn execute_share(
    args: ShareArgs,
    client: Arc<VerityClient>,
    share_base: &str,
    formatter: &Formatter,
) -> Result<()> {
    let slug = Slug::parse(&args.slug).map_err(CliError::InvalidInput)?;
    let method: ShareMethod = args.method.into();
    let url = share_url(share_base, &slug);

    let tracker = EngagementTracker::new(client, slug, TierTable::standard());
    let recorded = tracker.record_share(method).await;

    println!("{}", format_share(formatter, &url, method, recorded)?);
    Ok(())
}

fn format_share(
    formatter: &Formatter,
    url: &str,
    method: ShareMethod,
    recorded: bool,
) -> Result<String> {
    match formatter.format() {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "url": url,
            "method": method.as_str(),
            "recorded": recorded,
        }))?),
        OutputFormat::Table => {
            let mut out = formatter.success(&format!("Share link: {}", url));
            if !recorded {
                out.push('\n');
                out.push_str(&formatter.warning("Share was not recorded"));
            }
            Ok(out)
        }
        OutputFormat::Quiet => Ok(url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://verity.example.com/r/k3x9a";

    #[test]
    fn test_quiet_prints_url_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let out = format_share(&formatter, URL, ShareMethod::Twitter, false).unwrap();
        assert_eq!(out, URL);
    }

    #[test]
    fn test_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let out = format_share(&formatter, URL, ShareMethod::CopyLink, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["method"], "copy-link");
        assert_eq!(value["recorded"], true);
    }

    #[test]
    fn test_unrecorded_share_warns() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let out = format_share(&formatter, URL, ShareMethod::Native, false).unwrap();
        assert!(out.contains(URL));
        assert!(out.contains("not recorded"));
    }
}
