//! High-level reports on a context.

/// A report on the satisfiability of the formula in a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The formula is satisfiable, e.g. a complete consistent valuation was found.
    Satisfiable,

    /// The formula is unsatisfiable, e.g. an unsatisfiable clause was identified.
    Unsatisfiable,

    /// Satisfiability was not determined, e.g. the time limit expired.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Summary statistics of a solve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveStats {
    /// A count of every conflict seen.
    pub conflicts: usize,

    /// A count of all decisions made.
    pub decisions: usize,

    /// A count of all assignments made by propagation.
    pub propagations: usize,

    /// A count of restarts.
    pub restarts: usize,

    /// The time taken, in seconds.
    pub elapsed_seconds: f64,
}

impl std::fmt::Display for SolveStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "conflicts: {} decisions: {} propagations: {} restarts: {} time: {:.3}s",
            self.conflicts, self.decisions, self.propagations, self.restarts, self.elapsed_seconds
        )
    }
}
