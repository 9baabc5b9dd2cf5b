use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Rank position on a ballot. Higher is better.
pub type Rank = u64;

/// A ballot expressing a preorder over candidates.
///
/// Each ranked candidate occupies an inclusive interval of rank positions,
/// which lets a voter express indifference between overlapping candidates
/// without committing to a strict order. Candidates left unranked tie with
/// everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking(BTreeMap<Candidate, (Rank, Rank)>);

impl Ranking {
    /// Place `candidate` somewhere in `[low, high]`.
    pub fn rank(&mut self, candidate: Candidate, low: Rank, high: Rank) -> Result<(), Failure> {
        if low > high {
            return Err(Failure::InvalidInput(format!(
                "rank bounds [{}, {}] for candidate {} are inverted",
                low, high, candidate
            )));
        }
        self.0.insert(candidate, (low, high));
        Ok(())
    }
    pub fn unrank(&mut self, candidate: Candidate) {
        self.0.remove(&candidate);
    }
    pub fn is_ranked(&self, candidate: Candidate) -> bool {
        self.0.contains_key(&candidate)
    }
    /// Ranked candidates in ascending order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.0.keys().copied()
    }

    /// Strict preference requires disjoint intervals.
    pub fn compare(&self, i: Candidate, j: Candidate) -> Ordering {
        match (self.0.get(&i), self.0.get(&j)) {
            (Some((li, _)), Some((_, hj))) if li > hj => Ordering::Greater,
            (Some((_, hi)), Some((lj, _))) if hi < lj => Ordering::Less,
            _ => Ordering::Equal,
        }
    }

    /// Count this ballot. Ranking a candidate the tally has no row for is
    /// an error, and leaves the tally untouched.
    pub fn cast_into(&self, tally: &mut Tally) -> Result<(), Failure> {
        if let Some(candidate) = self.candidates().find(|&c| c >= tally.size()) {
            return Err(Failure::InvalidInput(format!(
                "candidate {} ranked in a {}-candidate election",
                candidate,
                tally.size()
            )));
        }
        tally.cast(|i, j| self.compare(i, j));
        Ok(())
    }

    /// Check every interval before the ballot is counted.
    pub fn validate(&self) -> Result<(), Failure> {
        match self.0.iter().find(|(_, (low, high))| low > high) {
            Some((candidate, (low, high))) => Err(Failure::InvalidInput(format!(
                "rank bounds [{}, {}] for candidate {} are inverted",
                low, high, candidate
            ))),
            None => Ok(()),
        }
    }
}

impl TryFrom<BTreeMap<Candidate, (Rank, Rank)>> for Ranking {
    type Error = Failure;
    fn try_from(ranks: BTreeMap<Candidate, (Rank, Rank)>) -> Result<Self, Self::Error> {
        let ranking = Self(ranks);
        ranking.validate()?;
        Ok(ranking)
    }
}
