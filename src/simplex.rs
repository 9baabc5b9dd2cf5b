//! Linear programs and the solver seam.
//!
//! The equilibrium computation only needs to describe a small dense linear
//! program and read back an optimal vertex. [`Simplex`] is the boundary:
//! [`Microlp`] delegates to the `microlp` crate's simplex implementation,
//! and tests substitute their own solvers to exercise failure paths.
use crate::*;

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Direction of a row constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Le,
    Ge,
}

/// One constraint `Σ coefficients[c] · x[c] (≤|≥) bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub coefficients: Vec<f64>,
    pub comparison: Comparison,
    pub bound: f64,
}

/// A dense linear program over non-negative variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub sense: Sense,
    pub objective: Vec<f64>,
    pub rows: Vec<Row>,
}

impl Program {
    pub fn new(sense: Sense, objective: Vec<f64>) -> Self {
        Self {
            sense,
            objective,
            rows: Vec::new(),
        }
    }
    pub fn variables(&self) -> usize {
        self.objective.len()
    }
    pub fn constrain(&mut self, coefficients: Vec<f64>, comparison: Comparison, bound: f64) -> Result<(), Failure> {
        if coefficients.len() != self.variables() {
            return Err(Failure::InvalidInput(format!(
                "row of {} coefficients for {} variables",
                coefficients.len(),
                self.variables()
            )));
        }
        self.rows.try_reserve(1)?;
        self.rows.push(Row {
            coefficients,
            comparison,
            bound,
        });
        Ok(())
    }
}

/// An optimal solution: objective value and variable assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub objective: f64,
    pub values: Vec<f64>,
}

/// Anything that can find an optimal vertex of a [`Program`].
///
/// Infeasible, unbounded, and numerically failed programs are reported as
/// [`Failure::Solver`].
pub trait Simplex {
    fn optimize(&self, program: &Program) -> Result<Vertex, Failure>;
}

/// Pure-Rust dense simplex backed by `microlp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Microlp;

impl Simplex for Microlp {
    fn optimize(&self, program: &Program) -> Result<Vertex, Failure> {
        let mut problem = microlp::Problem::new(match program.sense {
            Sense::Maximize => microlp::OptimizationDirection::Maximize,
            Sense::Minimize => microlp::OptimizationDirection::Minimize,
        });
        let variables = program
            .objective
            .iter()
            .map(|&cost| problem.add_var(cost, (0., f64::INFINITY)))
            .collect::<Vec<_>>();
        for row in program.rows.iter() {
            let mut expr = microlp::LinearExpr::empty();
            for (&variable, &coefficient) in variables.iter().zip(row.coefficients.iter()) {
                expr.add(variable, coefficient);
            }
            let comparison = match row.comparison {
                Comparison::Le => microlp::ComparisonOp::Le,
                Comparison::Ge => microlp::ComparisonOp::Ge,
            };
            problem.add_constraint(expr, comparison, row.bound);
        }
        let solution = problem
            .solve()
            .map_err(|e| Failure::Solver(e.to_string()))?;
        let objective = solution.objective();
        let values = variables.iter().map(|&v| solution[v]).collect::<Vec<_>>();
        if !objective.is_finite() || values.iter().any(|x| !x.is_finite()) {
            return Err(Failure::Solver("non-finite solution".into()));
        }
        Ok(Vertex { objective, values })
    }
}
