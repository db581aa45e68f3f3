//! Leaderboard and personal stats commands.

use crate::cli::LeaderboardArgs;
use crate::error::Result;
use crate::output::Formatter;
use verity_domain::TierTable;
use verity_sdk::VerityClient;

/// Execute the leaderboard command.
pub async fn execute_leaderboard(
    args: LeaderboardArgs,
    client: &VerityClient,
    tiers: &TierTable,
    formatter: &Formatter,
) -> Result<()> {
    let mut entries = client.leaderboard(tiers).await?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    println!("{}", formatter.format_leaderboard(&entries)?);
    Ok(())
}

/// Execute the me command.
pub async fn execute_me(
    client: &VerityClient,
    tiers: &TierTable,
    formatter: &Formatter,
) -> Result<()> {
    let stats = client.my_stats(tiers).await?;
    println!("{}", formatter.format_sharer(&stats, tiers)?);
    Ok(())
}
