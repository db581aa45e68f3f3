//! Tier command implementations.

use crate::cli::TierArgs;
use crate::error::Result;
use crate::output::Formatter;
use verity_domain::TierTable;

/// Execute the tier command.
pub fn execute_tier(args: TierArgs, tiers: &TierTable, formatter: &Formatter) -> Result<()> {
    let progress = tiers.progress(args.views);
    println!("{}", formatter.format_tier_progress(&progress)?);
    Ok(())
}

/// Execute the tiers command.
pub fn execute_tiers(tiers: &TierTable, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_tiers(tiers)?);
    Ok(())
}
