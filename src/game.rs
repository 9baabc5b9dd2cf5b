use crate::*;

/// The symmetric zero-sum game played inside one component.
///
/// Playing `i` against `j` pays +1 if `i` beats `j`, −1 if `j` beats `i`,
/// and 0 on a tie. Adding 2 to every payoff keeps the matrix positive, so
/// the classical LP reduction applies with the game value fixed at 2.
///
/// # Dual solve
///
/// A game may have a convex set of optimal strategies, and a simplex solver
/// will return whichever vertex of that set it reaches first. Two programs
/// are solved:
///
/// - **minimax**: `max Σx` s.t. `Σ_c (2 + M[r][c]) x_c ≤ 1` for every row `r`
/// - **maximin**: `min Σx` s.t. `Σ_c (2 + M[c][r]) x_c ≥ 1` for every row `r`
///
/// Each vertex divided by its objective is an optimal mixed strategy. The
/// minimax strategy is kept unless it scores strictly positively against the
/// maximin strategy, in which case the latter is returned.
///
/// This is a heuristic against one class of dominated vertex choices, not a
/// canonical selection among all equilibria.
pub struct MarginGame<'a> {
    graph: &'a Dominance,
}

impl<'a> From<&'a Dominance> for MarginGame<'a> {
    fn from(graph: &'a Dominance) -> Self {
        Self { graph }
    }
}

impl MarginGame<'_> {
    /// Optimal mixed strategy over the component's members.
    ///
    /// The component must already be free of sources; this never falls back
    /// to source detection.
    pub fn solve(&self, simplex: &impl Simplex) -> Result<Vec<Probability>, Failure> {
        debug_assert!(self.graph.size() >= 2);
        match self.equilibrium(simplex, Sense::Maximize) {
            Ok(minimax) => match self.equilibrium(simplex, Sense::Minimize) {
                Ok(maximin) if self.payoff(&minimax, &maximin) > 0. => {
                    log::debug!("maximin strategy preferred over minimax vertex");
                    Ok(maximin)
                }
                Ok(_) => Ok(minimax),
                Err(e) => {
                    log::warn!("maximin program failed ({}), keeping minimax", e);
                    Ok(minimax)
                }
            },
            Err(e) => {
                log::warn!("minimax program failed ({}), retrying as maximin", e);
                self.equilibrium(simplex, Sense::Minimize)
            }
        }
    }

    /// Expected payoff of `left` against `right`.
    pub fn payoff(&self, left: &[Probability], right: &[Probability]) -> Probability {
        let n = self.graph.size();
        (0..n)
            .map(|i| {
                left[i]
                    * (0..n)
                        .map(|j| self.graph.margin(i, j) * right[j])
                        .sum::<Probability>()
            })
            .sum()
    }

    fn equilibrium(&self, simplex: &impl Simplex, sense: Sense) -> Result<Vec<Probability>, Failure> {
        let ref program = self.program(sense)?;
        let Vertex { objective, values } = simplex.optimize(program)?;
        if objective <= 0. || values.len() != self.graph.size() {
            return Err(Failure::Solver(format!(
                "degenerate vertex with objective {}",
                objective
            )));
        }
        Ok(values.into_iter().map(|x| (x / objective).max(0.)).collect())
    }

    /// Shifted payoff rows: 3 for a win, 2 for a tie, 1 for a loss, read from
    /// the opponent's side when minimizing.
    fn program(&self, sense: Sense) -> Result<Program, Failure> {
        let n = self.graph.size();
        let mut program = Program::new(sense, buffer(n, 1.)?);
        for r in 0..n {
            let mut row = buffer(n, 0.)?;
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = 2. + match sense {
                    Sense::Maximize => self.graph.margin(r, c),
                    Sense::Minimize => self.graph.margin(c, r),
                };
            }
            let comparison = match sense {
                Sense::Maximize => Comparison::Le,
                Sense::Minimize => Comparison::Ge,
            };
            program.constrain(row, comparison, 1.)?;
        }
        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cycle() -> Dominance {
        Dominance::new(3, vec![false, true, false, false, false, true, true, false, false]).unwrap()
    }

    fn close(actual: &[Probability], expected: &[Probability]) -> bool {
        actual
            .iter()
            .zip(expected)
            .map(|(a, b)| (a - b).abs())
            .sum::<Probability>()
            < TOLERANCE
    }

    /// Fails every program of one sense, delegating the rest.
    struct Refuse(Sense);
    impl Simplex for Refuse {
        fn optimize(&self, program: &Program) -> Result<Vertex, Failure> {
            match program.sense == self.0 {
                true => Err(Failure::Solver("refused".into())),
                false => Microlp.optimize(program),
            }
        }
    }

    /// Records which senses were requested.
    #[derive(Default)]
    struct Spy(Cell<usize>, Cell<usize>);
    impl Simplex for Spy {
        fn optimize(&self, program: &Program) -> Result<Vertex, Failure> {
            match program.sense {
                Sense::Maximize => self.0.set(self.0.get() + 1),
                Sense::Minimize => self.1.set(self.1.get() + 1),
            }
            Microlp.optimize(program)
        }
    }

    /// Returns a fixed vertex regardless of the program.
    struct Fixed(f64, Vec<f64>);
    impl Simplex for Fixed {
        fn optimize(&self, _: &Program) -> Result<Vertex, Failure> {
            Ok(Vertex {
                objective: self.0,
                values: self.1.clone(),
            })
        }
    }

    #[test]
    fn rows_encode_shifted_payoffs() {
        let graph = cycle();
        let game = MarginGame::from(&graph);
        let minimax = game.program(Sense::Maximize).unwrap();
        assert_eq!(minimax.rows[0].coefficients, vec![2., 3., 1.]);
        assert_eq!(minimax.rows[0].comparison, Comparison::Le);
        let maximin = game.program(Sense::Minimize).unwrap();
        assert_eq!(maximin.rows[0].coefficients, vec![2., 1., 3.]);
        assert_eq!(maximin.rows[0].comparison, Comparison::Ge);
        assert_eq!(maximin.objective, vec![1., 1., 1.]);
    }

    #[test]
    fn cycle_is_uniform() {
        let graph = cycle();
        let strategy = MarginGame::from(&graph).solve(&Microlp).unwrap();
        assert!(close(&strategy, &[1. / 3., 1. / 3., 1. / 3.]), "{:?}", strategy);
    }

    #[test]
    fn both_senses_are_solved() {
        let graph = cycle();
        let ref spy = Spy::default();
        MarginGame::from(&graph).solve(spy).unwrap();
        assert_eq!((spy.0.get(), spy.1.get()), (1, 1));
    }

    #[test]
    fn falls_back_when_one_sense_fails() {
        let graph = cycle();
        let game = MarginGame::from(&graph);
        for sense in [Sense::Maximize, Sense::Minimize] {
            let strategy = game.solve(&Refuse(sense)).unwrap();
            assert!(close(&strategy, &[1. / 3., 1. / 3., 1. / 3.]), "{:?}", strategy);
        }
    }

    #[test]
    fn degenerate_vertex_is_a_failure() {
        let graph = cycle();
        let game = MarginGame::from(&graph);
        assert!(matches!(game.solve(&Fixed(0., vec![0.; 3])), Err(Failure::Solver(_))));
        assert!(matches!(game.solve(&Fixed(1., vec![1.])), Err(Failure::Solver(_))));
    }

    #[test]
    fn payoff_is_antisymmetric() {
        let graph = cycle();
        let game = MarginGame::from(&graph);
        let a = [1., 0., 0.];
        let b = [0., 1., 0.];
        assert_eq!(game.payoff(&a, &b), 1.);
        assert_eq!(game.payoff(&b, &a), -1.);
        assert_eq!(game.payoff(&a, &a), 0.);
    }
}
