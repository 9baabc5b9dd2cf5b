use thiserror::Error;

/// Why an election could not be resolved.
///
/// Every fallible operation in the crate reports one of these to its
/// immediate caller. None of them is retried internally: solving the same
/// program twice cannot succeed where the first attempt failed, and a
/// failed solve never leaves a partially populated lottery behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Empty or oversized election, mis-shaped relation, or malformed ballot.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A working buffer could not be reserved.
    #[error("could not reserve working memory")]
    Allocation,
    /// The linear program was infeasible, unbounded, or numerically broken.
    #[error("linear program failed: {0}")]
    Solver(String),
}

impl From<std::collections::TryReserveError> for Failure {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::Allocation
    }
}

/// Reserve a buffer of `n` copies of `fill`, reporting exhaustion instead
/// of aborting.
pub fn buffer<T: Clone>(n: usize, fill: T) -> Result<Vec<T>, Failure> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(n)?;
    vec.resize(n, fill);
    Ok(vec)
}
