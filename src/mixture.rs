use crate::*;

/// Uniform mixture of per-component equilibria.
///
/// Picking a component uniformly at random and then playing its internal
/// equilibrium yields candidate `i` with probability `σ_c(i) / k`, where `c`
/// is the component containing `i` and `k` the number of components.
#[derive(Debug, Clone, Default)]
pub struct Mixture {
    n: usize,
    strategies: Vec<Vec<Probability>>,
}

impl Mixture {
    pub fn new(n: usize, components: usize) -> Result<Self, Failure> {
        let mut strategies = Vec::new();
        strategies.try_reserve_exact(components)?;
        Ok(Self { n, strategies })
    }

    /// Embed one component's strategy over `members` into the full space.
    pub fn push(&mut self, members: &[Candidate], strategy: &[Probability]) -> Result<(), Failure> {
        if members.len() != strategy.len() {
            return Err(Failure::InvalidInput(format!(
                "{} weights for {} members",
                strategy.len(),
                members.len()
            )));
        }
        let mut embedded = buffer(self.n, 0.)?;
        for (&v, &p) in members.iter().zip(strategy) {
            embedded[v] = p;
        }
        self.strategies.try_reserve(1)?;
        self.strategies.push(embedded);
        Ok(())
    }

    /// Average the embedded strategies candidate by candidate.
    pub fn combine(self) -> Result<Vec<Probability>, Failure> {
        let k = self.strategies.len();
        let mut terms = buffer(k, 0.)?;
        let mut lottery = buffer(self.n, 0.)?;
        for (i, p) in lottery.iter_mut().enumerate() {
            for (term, strategy) in terms.iter_mut().zip(self.strategies.iter()) {
                *term = strategy[i];
            }
            *p = summation::ascending(&terms) / k as Probability;
        }
        Ok(lottery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_share_weight_equally() {
        let mut mixture = Mixture::new(5, 2).unwrap();
        mixture.push(&[0, 3], &[0.5, 0.5]).unwrap();
        mixture.push(&[1, 2, 4], &[0.25, 0.5, 0.25]).unwrap();
        let lottery = mixture.combine().unwrap();
        assert_eq!(lottery, vec![0.25, 0.125, 0.25, 0.25, 0.125]);
        assert_eq!(lottery.iter().sum::<Probability>(), 1.);
    }

    #[test]
    fn single_component_is_unchanged() {
        let mut mixture = Mixture::new(3, 1).unwrap();
        mixture.push(&[0, 1, 2], &[0.2, 0.3, 0.5]).unwrap();
        assert_eq!(mixture.combine().unwrap(), vec![0.2, 0.3, 0.5]);
    }

    #[test]
    fn mismatched_weights_are_rejected() {
        let mut mixture = Mixture::new(3, 1).unwrap();
        assert!(mixture.push(&[0, 1], &[1.]).is_err());
    }
}
