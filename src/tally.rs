use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;

/// Pairwise win counts accumulated from ballots.
///
/// Cell `(i, j)` counts the ballots that strictly preferred candidate `i`
/// over candidate `j`. Counts only ever grow; overflow past [`Votes::MAX`]
/// is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Ledger")]
pub struct Tally {
    n: usize,
    duels: Vec<Votes>,
}

/// Unchecked wire shape of a [`Tally`].
#[derive(Deserialize)]
struct Ledger {
    n: usize,
    duels: Vec<Votes>,
}

impl Tally {
    pub fn new(n: usize) -> Result<Self, Failure> {
        let size = Self::cells(n)?;
        Ok(Self {
            n,
            duels: buffer(size, 0)?,
        })
    }
    /// Adopt row-major counts over `n` candidates.
    pub fn with_counts(n: usize, duels: Vec<Votes>) -> Result<Self, Failure> {
        if Self::cells(n)? != duels.len() {
            return Err(Failure::InvalidInput(format!(
                "tally of {} cells for {} candidates",
                duels.len(),
                n
            )));
        }
        Ok(Self { n, duels })
    }
    fn cells(n: usize) -> Result<usize, Failure> {
        if n == 0 {
            return Err(Failure::InvalidInput("an election needs candidates".into()));
        }
        n.checked_mul(n)
            .ok_or_else(|| Failure::InvalidInput(format!("{} candidates overflow", n)))
    }
    pub fn size(&self) -> usize {
        self.n
    }
    /// Ballots preferring `i` over `j`.
    pub fn count(&self, i: Candidate, j: Candidate) -> Votes {
        self.duels[i * self.n + j]
    }

    /// Record one ballot. `ballot(i, j)` is `Greater` when the voter
    /// prefers `i` over `j`, `Less` for the converse, `Equal` on a tie.
    pub fn cast<F>(&mut self, mut ballot: F)
    where
        F: FnMut(Candidate, Candidate) -> Ordering,
    {
        let n = self.n;
        for i in 1..n {
            for j in 0..i {
                match ballot(i, j) {
                    Ordering::Greater => self.duels[i * n + j] += 1,
                    Ordering::Less => self.duels[j * n + i] += 1,
                    Ordering::Equal => {}
                }
            }
        }
    }

    /// Record one ballot whose comparisons may fail.
    ///
    /// Comparisons accumulate into a scratch matrix that is merged only
    /// once every pair has been compared, so a failing ballot leaves the
    /// tally untouched.
    pub fn try_cast<F, E>(&mut self, mut ballot: F) -> Result<(), E>
    where
        F: FnMut(Candidate, Candidate) -> Result<Ordering, E>,
        E: From<Failure>,
    {
        let n = self.n;
        let mut scratch = buffer(self.duels.len(), false)?;
        for i in 1..n {
            for j in 0..i {
                match ballot(i, j)? {
                    Ordering::Greater => scratch[i * n + j] = true,
                    Ordering::Less => scratch[j * n + i] = true,
                    Ordering::Equal => {}
                }
            }
        }
        self.duels
            .iter_mut()
            .zip(scratch)
            .filter(|(_, won)| *won)
            .for_each(|(cell, _)| *cell += 1);
        Ok(())
    }

    /// Add another tally over the same candidates.
    pub fn absorb(&mut self, other: &Self) -> Result<(), Failure> {
        if self.n != other.n {
            return Err(Failure::InvalidInput(format!(
                "cannot merge tallies of {} and {} candidates",
                self.n, other.n
            )));
        }
        self.duels
            .iter_mut()
            .zip(other.duels.iter())
            .for_each(|(a, b)| *a += b);
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Votes>>> for Tally {
    type Error = Failure;
    fn try_from(rows: Vec<Vec<Votes>>) -> Result<Self, Self::Error> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(Failure::InvalidInput(format!(
                "tally row of length {} in a {}-candidate election",
                row.len(),
                n
            )));
        }
        Self::with_counts(n, rows.into_iter().flatten().collect())
    }
}

impl TryFrom<Ledger> for Tally {
    type Error = Failure;
    fn try_from(Ledger { n, duels }: Ledger) -> Result<Self, Self::Error> {
        Self::with_counts(n, duels)
    }
}
