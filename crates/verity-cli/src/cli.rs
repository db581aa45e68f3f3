//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use verity_domain::{ShareMethod, Tone};

/// Verity CLI - Fact-check claims and share the verdict.
#[derive(Debug, Parser)]
#[command(name = "verity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show the verdict right away instead of playing the reveal
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VERITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a claim and wait for its verdict
    Check(CheckArgs),

    /// Show the verdict for an existing claim
    Show(ShowArgs),

    /// Print a share link for a claim
    Share(ShareArgs),

    /// Show the tier for a view count
    Tier(TierArgs),

    /// List the sharer tiers
    Tiers,

    /// Show the top sharers
    Leaderboard(LeaderboardArgs),

    /// Show your sharer stats
    Me,

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// The claim to fact-check
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Tone of the write-up
    #[arg(short, long, value_enum, default_value = "cordial")]
    pub tone: ToneArg,

    /// Submit and print the slug without waiting for the verdict
    #[arg(long)]
    pub no_wait: bool,
}

impl CheckArgs {
    /// The query words joined back into one claim.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Claim slug
    pub slug: String,

    /// Opened from a shared link; skips the reveal for finished claims
    #[arg(long)]
    pub shared: bool,
}

/// Arguments for the share command.
#[derive(Debug, Parser)]
pub struct ShareArgs {
    /// Claim slug
    pub slug: String,

    /// How the link is being shared
    #[arg(short, long, value_enum, default_value = "copy-link")]
    pub method: ShareMethodArg,
}

/// Arguments for the tier command.
#[derive(Debug, Parser)]
pub struct TierArgs {
    /// Cumulative view count
    pub views: u64,
}

/// Arguments for the leaderboard command.
#[derive(Debug, Parser)]
pub struct LeaderboardArgs {
    /// Maximum number of entries
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// API URL
        #[arg(short, long)]
        url: String,
        /// Public site for share links
        #[arg(short, long)]
        share_url: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Tone argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ToneArg {
    /// Friendly and measured
    Cordial,
    /// Formal, citation-heavy
    Academic,
    /// No mercy
    Brutal,
}

/// Share method argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ShareMethodArg {
    /// Copied the link
    CopyLink,
    /// Native share sheet
    Native,
    /// Posted to Twitter
    Twitter,
    /// Anything else
    Other,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ToneArg> for Tone {
    fn from(tone: ToneArg) -> Self {
        match tone {
            ToneArg::Cordial => Tone::Cordial,
            ToneArg::Academic => Tone::Academic,
            ToneArg::Brutal => Tone::Brutal,
        }
    }
}

impl From<ShareMethodArg> for ShareMethod {
    fn from(method: ShareMethodArg) -> Self {
        match method {
            ShareMethodArg::CopyLink => ShareMethod::CopyLink,
            ShareMethodArg::Native => ShareMethod::Native,
            ShareMethodArg::Twitter => ShareMethod::Twitter,
            ShareMethodArg::Other => ShareMethod::Other,
        }
    }
}
