use crate::*;

/// Resolves elections into maximal lotteries.
///
/// # Pipeline
///
/// 1. **Sources** — candidates nobody beats settle the election outright:
///    one source is a Condorcet winner, several share the lottery equally.
/// 2. **Components** — otherwise every candidate sits on a cycle, and the
///    relation splits into weakly-connected components of at least two
///    candidates each.
/// 3. **Equilibria** — each component is solved as a [`MarginGame`].
/// 4. **Mixture** — the component equilibria are averaged uniformly.
///
/// A `Lottery` holds only configuration and its solver handle, so separate
/// threads can resolve separate elections with separate instances.
#[derive(Debug, Clone)]
pub struct Lottery<S = Microlp>
where
    S: Simplex,
{
    limit: usize,
    simplex: S,
}

impl Lottery<Microlp> {
    pub fn new() -> Self {
        Self {
            limit: MAX_CANDIDATES,
            simplex: Microlp,
        }
    }
}

impl Default for Lottery<Microlp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Lottery<S>
where
    S: Simplex,
{
    /// Refuse elections with more than `limit` candidates.
    pub fn limit(self, limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_CANDIDATES),
            ..self
        }
    }
    /// Solve margin games with a different linear program solver.
    pub fn simplex<T>(self, simplex: T) -> Lottery<T>
    where
        T: Simplex,
    {
        Lottery {
            limit: self.limit,
            simplex,
        }
    }
    pub fn bound(&self) -> usize {
        self.limit
    }

    /// Resolve a validated dominance relation.
    pub fn solve(&self, graph: &Dominance) -> Result<Strategy, Failure> {
        let n = graph.size();
        self.admit(n)?;
        let sources = graph.sources();
        match sources.len() {
            0 => self.components(graph).map(Strategy::Mixed),
            1 => {
                log::debug!("candidate {} is a Condorcet winner", sources[0]);
                Ok(Strategy::Pure(sources[0]))
            }
            k => {
                log::debug!("{} undominated candidates share the lottery", k);
                let mut lottery = buffer(n, 0.)?;
                for source in sources {
                    lottery[source] = 1. / k as Probability;
                }
                Ok(Strategy::Mixed(lottery))
            }
        }
    }

    /// Resolve a raw row-major relation over `n` candidates.
    pub fn resolve(&self, n: usize, relation: Option<&[bool]>) -> Result<Strategy, Failure> {
        self.admit(n)?;
        let relation = relation.ok_or_else(|| Failure::InvalidInput("missing relation".into()))?;
        let mut owned = Vec::new();
        owned.try_reserve_exact(relation.len())?;
        owned.extend_from_slice(relation);
        self.solve(&Dominance::new(n, owned)?)
    }

    /// Count `ballots` over `n` candidates, refusing oversized elections
    /// before any cells are reserved.
    pub fn tally(&self, n: usize, ballots: &[Ranking]) -> Result<Tally, Failure> {
        self.admit(n)?;
        let mut tally = Tally::new(n)?;
        for ballot in ballots {
            ballot.cast_into(&mut tally)?;
        }
        log::info!("tallied {} ballots over {} candidates", ballots.len(), n);
        Ok(tally)
    }

    fn admit(&self, n: usize) -> Result<(), Failure> {
        match n {
            0 => Err(Failure::InvalidInput("an election needs candidates".into())),
            n if n > self.limit => Err(Failure::InvalidInput(format!(
                "{} candidates exceed the limit of {}",
                n, self.limit
            ))),
            _ => Ok(()),
        }
    }

    /// Equilibrium of a source-free relation, component by component.
    fn components(&self, graph: &Dominance) -> Result<Vec<Probability>, Failure> {
        let partition = Partition::from(graph);
        log::info!(
            "resolving {} candidates across {} components (largest {})",
            graph.size(),
            partition.count(),
            partition.largest()
        );
        let mut mixture = Mixture::new(graph.size(), partition.count())?;
        for component in 0..partition.count() {
            let members = partition.members(component);
            debug_assert!(members.len() >= 2, "isolated candidates are sources");
            let ref subgraph = graph.restrict(&members)?;
            let strategy = MarginGame::from(subgraph).solve(&self.simplex)?;
            mixture.push(&members, &strategy)?;
        }
        mixture.combine()
    }
}
