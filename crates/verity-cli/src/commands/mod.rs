//! Command implementations.

pub mod check;
pub mod leaderboard;
pub mod profile;
pub mod reveal;
pub mod share;
pub mod show;
pub mod tier;

pub use self::check::execute_check;
pub use self::leaderboard::{execute_leaderboard, execute_me};
pub use self::profile::execute_profile;
pub use self::reveal::RevealOptions;
pub use self::share::execute_share;
pub use self::show::execute_show;
pub use self::tier::{execute_tier, execute_tiers};
