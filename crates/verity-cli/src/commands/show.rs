//! Show command implementation.

use super::reveal::{self, RevealOptions};
use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::sync::Arc;
use verity_domain::Slug;
use verity_resolver::ViewOrigin;
use verity_sdk::VerityClient;

/// Execute the show command.
pub async fn execute_show(
    args: ShowArgs,
    client: Arc<VerityClient>,
    options: &RevealOptions,
    formatter: &Formatter,
) -> Result<()> {
    let slug = Slug::parse(&args.slug).map_err(CliError::InvalidInput)?;
    reveal::present(client, slug, origin(args.shared), options, formatter).await
}

fn origin(shared: bool) -> ViewOrigin {
    if shared {
        ViewOrigin::SharedLink
    } else {
        ViewOrigin::Navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_explicit() {
        assert_eq!(origin(true), ViewOrigin::SharedLink);
        assert_eq!(origin(false), ViewOrigin::Navigation);
    }
}
