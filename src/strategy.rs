use crate::*;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// Outcome of resolving an election.
///
/// - `Pure` — a single candidate wins outright
/// - `Mixed` — a lottery over all candidates, indexed by candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Pure(Candidate),
    Mixed(Vec<Probability>),
}

impl Strategy {
    pub fn is_pure(&self) -> bool {
        matches!(self, Self::Pure(_))
    }
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed(_))
    }

    /// Probability that `candidate` is elected.
    ///
    /// A pure strategy answers for any index; a mixed one only for the
    /// candidates it covers.
    pub fn probability(&self, candidate: Candidate) -> Option<Probability> {
        match self {
            Self::Pure(winner) if *winner == candidate => Some(1.),
            Self::Pure(_) => Some(0.),
            Self::Mixed(lottery) => lottery.get(candidate).copied(),
        }
    }

    /// Candidates with positive probability.
    pub fn support(&self) -> Vec<Candidate> {
        match self {
            Self::Pure(winner) => vec![*winner],
            Self::Mixed(lottery) => lottery
                .iter()
                .enumerate()
                .filter(|(_, p)| **p > 0.)
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Draw a winner.
    ///
    /// Rounding may leave the roll above the last cumulative weight, in
    /// which case the last candidate is returned.
    pub fn play<R: Rng + ?Sized>(&self, rng: &mut R) -> Candidate {
        match self {
            Self::Pure(winner) => *winner,
            Self::Mixed(lottery) => {
                let mut roll = rng.random::<Probability>();
                for (i, &p) in lottery.iter().enumerate() {
                    if roll < p {
                        return i;
                    }
                    roll -= p;
                }
                lottery.len().saturating_sub(1)
            }
        }
    }
}

#[rustfmt::skip]
impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pure(winner) => writeln!(f, "Condorcet winner: {}", winner),
            Self::Mixed(lottery) => {
                writeln!(f, "┌───────────┬─────────────┐")?;
                writeln!(f, "│ Candidate │ Probability │")?;
                writeln!(f, "├───────────┼─────────────┤")?;
                for (i, p) in lottery.iter().enumerate() {
                    writeln!(f, "│ {:>9} │ {:>11.6} │", i, p)?;
                }
                writeln!(f, "└───────────┴─────────────┘")
            }
        }
    }
}
