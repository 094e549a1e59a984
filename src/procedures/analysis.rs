/*!
Analysis of an unsatisfiable clause.

Takes a key to a clause which is unsatisfiable on the current valuation and applies
resolution with the clauses used to (eventually) observe the conflict, given the
decisions made --- stopping at the first unique implication point.
For details on resolution, see the [resolution buffer](crate::resolution_buffer).

The derived clause is guaranteed to:
- Contain exactly one literal assigned at the current decision level, placed at
  position 0 --- the asserting literal.
- Otherwise contain only literals false on the current valuation, from levels at or
  below the backjump level of the clause.

Analysis handles the consequences of the derivation itself:
the activity of every atom used in the derivation is bumped and the bump decayed, the
LBD of the derived clause (the count of distinct decision levels among its literals)
is recorded, a backjump is made to the clause's backjump level, the clause is stored
with watches set, and each heuristic is notified of the addition.
The caller is left to queue the asserted literal, with the stored clause as reason.

# Example

```rust,ignore
match self.conflict_analysis(&key)? {
    AnalysisOk::UnitClause(literal) => {
        self.q_consequence(literal, ClauseKey::Unit(literal), QPosition::Front);
    }

    AnalysisOk::AssertingClause { key, literal } => {
        self.q_consequence(literal, key, QPosition::Front);
    }
}
```
*/

use std::collections::HashSet;

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets::{self},
    structures::{
        clause::{Clause, ClauseSource},
        literal::{CLiteral, Literal},
    },
    types::err::{self, AnalysisError},
};

/// Possible 'Ok' results from conflict analysis.
pub enum AnalysisOk {
    /// The result of analysis is a unit clause, asserting at the root level.
    UnitClause(CLiteral),

    /// The result of analysis is a (non-unit) asserting clause.
    AssertingClause {
        /// The key of the asserting clause.
        key: ClauseKey,

        /// The literal asserted by the clause.
        literal: CLiteral,
    },
}

impl<R: rand::Rng> GenericContext<R> {
    /// Derives an asserting clause from the conflict at `key` and prepares the
    /// context for its consequence.
    /// See [procedures::analysis](crate::procedures::analysis) for details.
    pub fn conflict_analysis(&mut self, key: &ClauseKey) -> Result<AnalysisOk, err::ErrorKind> {
        log::info!(target: targets::ANALYSIS, "Analysis of {key} at level {}", self.trail.level());

        // The buffer is taken to appease the borrow checker, and always returned.
        let mut buffer = std::mem::take(&mut self.resolution_buffer);
        buffer.refresh(self.atom_db.valuation());

        for assignment in self.trail.top_level_assignments() {
            buffer.clear_value(assignment.literal.atom());
        }

        let conflict = self.clause_db.get(key)?.literals();
        let resolution = buffer.resolve_through_current_level(
            conflict,
            &self.clause_db,
            self.trail.top_level_assignments(),
        );

        if let Err(error) = resolution {
            self.resolution_buffer = buffer;
            return Err(error.into());
        }

        self.atom_db.bump_atoms(buffer.atoms_used());

        let clause = buffer.to_assertion_clause();
        self.resolution_buffer = buffer;

        if clause.is_empty() {
            return Err(AnalysisError::EmptyResolution.into());
        }

        log::info!(target: targets::ANALYSIS, "Addition clause: {}", clause.as_dimacs(false));

        let lbd = self.clause_lbd(&clause);
        self.counters.record_lbd(lbd);

        let literal = clause[0];

        match clause.len() {
            1 => {
                self.backjump(0);
                self.heuristics.notify_learnt(&clause);
                self.clause_db
                    .store(clause, ClauseSource::Resolution, &mut self.atom_db)?;

                Ok(AnalysisOk::UnitClause(literal))
            }

            _ => {
                let target = self.backjump_level(&clause)?;
                self.backjump(target);

                self.heuristics.notify_learnt(&clause);
                let key = self
                    .clause_db
                    .store(clause, ClauseSource::Resolution, &mut self.atom_db)?;

                Ok(AnalysisOk::AssertingClause { key, literal })
            }
        }
    }

    /// The LBD of a clause: the count of distinct decision levels among its
    /// literals, on the current valuation.
    fn clause_lbd(&self, clause: &[CLiteral]) -> u32 {
        let mut levels = HashSet::new();
        for literal in clause {
            if let Some(level) = self.atom_db.level_of(literal.atom()) {
                levels.insert(level);
            }
        }
        levels.len() as u32
    }
}
