use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// The strict majority relation between candidates.
///
/// Stored row-major: `beats(i, j)` holds when more ballots prefer `i` over
/// `j` than the converse. Neither direction holding is a tie; a candidate
/// never beats itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Relation")]
pub struct Dominance {
    n: usize,
    relation: Vec<bool>,
}

/// Unchecked wire shape of a [`Dominance`].
#[derive(Deserialize)]
struct Relation {
    n: usize,
    relation: Vec<bool>,
}

impl Dominance {
    /// Validate a row-major relation over `n` candidates.
    pub fn new(n: usize, relation: Vec<bool>) -> Result<Self, Failure> {
        if n == 0 {
            return Err(Failure::InvalidInput("an election needs candidates".into()));
        }
        if n.checked_mul(n) != Some(relation.len()) {
            return Err(Failure::InvalidInput(format!(
                "relation of {} cells for {} candidates",
                relation.len(),
                n
            )));
        }
        if let Some(i) = (0..n).find(|&i| relation[i * n + i]) {
            return Err(Failure::InvalidInput(format!("candidate {} beats itself", i)));
        }
        Ok(Self { n, relation })
    }
    pub fn size(&self) -> usize {
        self.n
    }
    pub fn beats(&self, i: Candidate, j: Candidate) -> bool {
        self.relation[i * self.n + j]
    }
    /// Signed payoff of `i` against `j` in the margin game.
    pub fn margin(&self, i: Candidate, j: Candidate) -> Probability {
        match (self.beats(i, j), self.beats(j, i)) {
            (true, _) => 1.,
            (_, true) => -1.,
            _ => 0.,
        }
    }
    /// Either direction dominates.
    pub fn adjacent(&self, i: Candidate, j: Candidate) -> bool {
        self.beats(i, j) || self.beats(j, i)
    }

    /// Candidates nobody beats, in ascending order.
    pub fn sources(&self) -> Vec<Candidate> {
        (0..self.n)
            .filter(|&j| (0..self.n).all(|i| !self.beats(i, j)))
            .collect()
    }

    /// The sub-relation induced by `members`, renumbered in the given order.
    pub fn restrict(&self, members: &[Candidate]) -> Result<Self, Failure> {
        let m = members.len();
        let mut relation = buffer(m * m, false)?;
        for (a, &i) in members.iter().enumerate() {
            for (b, &j) in members.iter().enumerate() {
                relation[a * m + b] = self.beats(i, j);
            }
        }
        Self::new(m, relation)
    }

    /// The same relation with candidate `i` renamed to `order[i]`.
    pub fn relabel(&self, order: &[Candidate]) -> Result<Self, Failure> {
        let n = self.n;
        if order.len() != n {
            return Err(Failure::InvalidInput(format!(
                "relabeling {} candidates with {} names",
                n,
                order.len()
            )));
        }
        let mut relation = buffer(n * n, false)?;
        for i in 0..n {
            for j in 0..n {
                relation[order[i] * n + order[j]] = self.beats(i, j);
            }
        }
        Self::new(n, relation)
    }
}

impl TryFrom<&Tally> for Dominance {
    type Error = Failure;
    fn try_from(tally: &Tally) -> Result<Self, Self::Error> {
        let n = tally.size();
        let mut relation = buffer(n.saturating_mul(n), false)?;
        for i in 0..n {
            for j in 0..n {
                relation[i * n + j] = tally.count(i, j) > tally.count(j, i);
            }
        }
        Self::new(n, relation)
    }
}

impl TryFrom<Relation> for Dominance {
    type Error = Failure;
    fn try_from(Relation { n, relation }: Relation) -> Result<Self, Self::Error> {
        Self::new(n, relation)
    }
}

impl TryFrom<Vec<Vec<bool>>> for Dominance {
    type Error = Failure;
    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(Failure::InvalidInput(format!(
                "relation row of length {} in a {}-candidate election",
                row.len(),
                n
            )));
        }
        Self::new(n, rows.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> Dominance {
        Dominance::try_from(vec![
            vec![false, true, false],
            vec![false, false, true],
            vec![true, false, false],
        ])
        .unwrap()
    }

    #[test]
    fn rejects_malformed_relations() {
        assert!(Dominance::new(0, vec![]).is_err());
        assert!(Dominance::new(2, vec![false; 3]).is_err());
        assert!(Dominance::new(1, vec![true]).is_err());
        assert!(Dominance::try_from(vec![vec![false, true], vec![false]]).is_err());
    }

    #[test]
    fn margins_are_antisymmetric() {
        let graph = cycle();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(graph.margin(i, j), -graph.margin(j, i));
            }
        }
        assert_eq!(graph.margin(0, 1), 1.);
        assert_eq!(graph.margin(0, 0), 0.);
    }

    #[test]
    fn sources() {
        assert!(cycle().sources().is_empty());
        let graph = Dominance::new(3, vec![false, true, false, false, false, false, false, false, false]).unwrap();
        assert_eq!(graph.sources(), vec![0, 2]);
    }

    #[test]
    fn restrict_renumbers_members() {
        let graph = cycle();
        let sub = graph.restrict(&[0, 2]).unwrap();
        assert_eq!(sub.size(), 2);
        assert!(sub.beats(1, 0));
        assert!(!sub.beats(0, 1));
    }

    #[test]
    fn relabel_moves_edges() {
        let graph = cycle().relabel(&[2, 0, 1]).unwrap();
        assert!(graph.beats(2, 0));
        assert!(graph.beats(0, 1));
        assert!(graph.beats(1, 2));
        assert!(cycle().relabel(&[0, 1]).is_err());
    }

    #[test]
    fn from_tally_thresholds_majorities() {
        let tally = Tally::try_from(vec![vec![0, 5, 2], vec![3, 0, 4], vec![2, 4, 0]]).unwrap();
        let graph = Dominance::try_from(&tally).unwrap();
        assert!(graph.beats(0, 1));
        assert!(!graph.beats(1, 0));
        assert!(!graph.adjacent(0, 2));
        assert!(!graph.adjacent(1, 2));
        assert!(!graph.beats(0, 0));
    }

    #[test]
    fn deserialization_validates() {
        let graph = cycle();
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(serde_json::from_str::<Dominance>(&json).unwrap(), graph);
        assert!(serde_json::from_str::<Dominance>(r#"{"n":3,"relation":[false,true]}"#).is_err());
        assert!(serde_json::from_str::<Dominance>(r#"{"n":1,"relation":[true]}"#).is_err());
        assert!(serde_json::from_str::<Dominance>(r#"{"n":0,"relation":[]}"#).is_err());
    }
}
