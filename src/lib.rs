//! Maximal lotteries over Condorcet tournaments.
//!
//! Pairwise majority comparison can cycle (the Condorcet paradox), in which
//! case no candidate beats every other. This crate resolves such elections
//! by computing a Nash equilibrium of the symmetric zero-sum "margin game"
//! induced by the majority relation: a lottery over candidates that no bloc
//! of voters can improve upon by shifting probability mass.
//!
//! # Module Structure
//!
//! - `tally` — Pairwise win counts accumulated from ballots
//! - `ballot` — Preorder ballots with rank intervals
//! - `dominance` — The strict majority relation and its sources
//! - `partition` — Weakly-connected components of the relation
//! - `simplex` — Linear program description and solver seam
//! - `game` — Equilibrium of one component's margin game
//! - `summation` — Ascending-order floating point summation
//! - `mixture` — Uniform mixture of per-component equilibria
//! - `strategy` — Pure/mixed strategies and sampling
//! - `lottery` — Top-level resolver tying the pipeline together

mod ballot;
mod dominance;
mod failure;
mod game;
mod lottery;
mod mixture;
mod partition;
mod simplex;
mod strategy;
mod tally;

pub mod summation;

pub use ballot::*;
pub use dominance::*;
pub use failure::*;
pub use game::*;
pub use lottery::*;
pub use mixture::*;
pub use partition::*;
pub use simplex::*;
pub use strategy::*;
pub use tally::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Index of a candidate in `[0, n)`.
pub type Candidate = usize;
/// Lottery weights and expected payoffs.
pub type Probability = f64;
/// Ballot counts for one ordered pair of candidates.
pub type Votes = u64;

// ============================================================================
// ELECTION PARAMETERS
// ============================================================================
/// Largest election the solver accepts by default.
///
/// Every solve materializes square `f64` buffers (payoff rows, embedded
/// component strategies), so `n * n * size_of::<f64>()` must stay within
/// `isize::MAX` bytes. Use [`Lottery::limit`] to lower it.
pub const MAX_CANDIDATES: usize = (isize::MAX as usize / std::mem::size_of::<f64>()).isqrt();
/// Absolute tolerance on the L1 distance between lotteries.
pub const TOLERANCE: Probability = 1e-6;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
