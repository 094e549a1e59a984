/*!
The context --- to which formulas are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over its source of randomness, which helps distinguish
generic context methods from those intended for a particular application.
The [Context] type fixes the source of randomness to [Xoroshiro128Plus], seeded from
the configuration, so a run of a solve is reproducible from its configuration alone.

# Example

```rust
# use magpie_sat::config::Config;
# use magpie_sat::context::Context;
# use magpie_sat::reports::Report;
let mut ctx = Context::from_config(Config::default());

ctx.add_clause_ints(&[1, 2]).unwrap();
ctx.add_clause_ints(&[-1, 2]).unwrap();
ctx.add_clause_ints(&[-2, 1]).unwrap();

assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
assert_eq!(ctx.value_of(1), Some(true));
assert_eq!(ctx.value_of(2), Some(true));
```
*/

mod counters;
pub use counters::Counters;

use rand::SeedableRng;
use rand_xoshiro::Xoroshiro128Plus;

use crate::{
    config::{Config, Selection},
    db::{atom::AtomDB, clause::ClauseDB, consequence_q::ConsequenceQ, trail::Trail},
    epoch::{BanditDriver, EpochRecord, Selector},
    heuristics::HeuristicBank,
    reports::{Report, SolveStats},
    resolution_buffer::ResolutionBuffer,
    structures::{atom::Atom, literal::Literal},
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// No formula is present.
    Configuration,

    /// Clauses are being added, and the database is consistent so far as observed.
    Input,

    /// The database is known to be consistent, e.g. with a complete valuation.
    Satisfiable,

    /// The database is known to be inconsistent, e.g. with an unsatisfiable clause
    /// identified.
    Unsatisfiable,

    /// The consistency of the database is unknown.
    Solving,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Solving => write!(f, "Solving"),
        }
    }
}

/// A generic context, parameterised to a source of randomness.
pub struct GenericContext<R: rand::Rng> {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to the context/solve.
    pub counters: Counters,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// The trail of assignments.
    pub trail: Trail,

    /// The queue of observed consequences to be propagated.
    pub consequence_q: ConsequenceQ,

    /// A buffer for resolution during conflict analysis, reused between conflicts.
    pub(crate) resolution_buffer: ResolutionBuffer,

    /// The branching heuristics, of which one is active.
    pub heuristics: HeuristicBank,

    /// How the active heuristic is chosen, and the controller when chosen online.
    pub selector: Selector,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,
}

/// A context which uses [Xoroshiro128Plus] as its source of randomness.
pub type Context = GenericContext<Xoroshiro128Plus>;

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        let selector = match config.selection {
            Selection::Bandit => Selector::Bandit(BanditDriver::new(config.alpha)),
            Selection::Fixed(_) => Selector::Fixed,
        };

        let mut heuristics = HeuristicBank::default();
        if let Selection::Fixed(arm) = config.selection {
            heuristics.set_active(arm.index());
        }

        Self {
            counters: Counters::new(config.lbd_window),

            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::default(),
            trail: Trail::default(),
            consequence_q: ConsequenceQ::default(),

            resolution_buffer: ResolutionBuffer::default(),

            heuristics,
            selector,

            state: ContextState::Configuration,

            rng: Xoroshiro128Plus::seed_from_u64(config.seed),

            config,
        }
    }
}

impl<R: rand::Rng> GenericContext<R> {
    /// A report on the satisfiability of the formula of the context.
    pub fn report(&self) -> Report {
        match self.state {
            ContextState::Satisfiable => Report::Satisfiable,
            ContextState::Unsatisfiable => Report::Unsatisfiable,
            ContextState::Configuration | ContextState::Input | ContextState::Solving => {
                Report::Unknown
            }
        }
    }

    /// Summary statistics of the solve, so far.
    pub fn stats(&self) -> SolveStats {
        SolveStats {
            conflicts: self.counters.conflicts,
            decisions: self.counters.decisions,
            propagations: self.counters.propagations,
            restarts: self.counters.restarts,
            elapsed_seconds: self.counters.time.as_secs_f64(),
        }
    }

    /// The value of the given atom on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// The current valuation as a DIMACS-style string of literals.
    pub fn valuation_string(&self) -> String {
        let mut string = String::default();
        for atom in 1..self.atom_db.count() as Atom {
            if let Some(value) = self.atom_db.value_of(atom) {
                let literal = crate::structures::literal::CLiteral::new(atom, value);
                string.push_str(format!("{literal} ").as_str());
            }
        }
        string.pop();
        string
    }

    /// The per-epoch records of the controller, empty when no controller runs.
    pub fn epoch_records(&self) -> &[EpochRecord] {
        match &self.selector {
            Selector::Bandit(driver) => &driver.records,
            Selector::Fixed => &[],
        }
    }

    /// Writes the per-epoch records as CSV, one row per epoch.
    pub fn write_epoch_csv(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
        crate::epoch::write_epoch_csv(self.epoch_records(), writer)
    }
}
