/*!
A structure to derive the resolution of some collection of clauses, with a stopping
point.

Resolution allows the derivation of a clause from a pair of clauses:
the *resolution* of φ ∨ *p* and ψ ∨ *-p* is the formula φ ∨ ψ, with *p* the 'pivot'.
Resolution may be chained indefinitely so long as some pivot is present, and during
conflict analysis the chain starts at a clause unsatisfiable on the current valuation
and pivots on the propagated literals of the current decision level, in reverse trail
order.

It is useful to stop as soon as the derived clause *asserts* on the valuation of the
previous levels --- that is, when exactly one literal of the derived clause belongs
to the current level.
That literal is the first unique implication point, and stopping there keeps learnt
clauses short and their backjumps deep.

The structure allows an arbitrary resolution chain with this stopping point by:
- Setting up a cell for every atom, seeded with the atom's value on the current
  valuation.
- Clearing the value of each cell assigned at the current level, so a count of
  'valueless' cells merged into the derivation tracks exactly the unresolved
  current-level literals.
- Updating each cell to note whether its atom is part of the derived clause or has
  been used as a pivot.

A cell for every atom is simple, though likely inefficient for a large collection of
atoms relative to the clauses relevant to a conflict.
*/

use crate::{
    db::clause::ClauseDB,
    structures::{
        atom::Atom,
        clause::CClause,
        consequence::{Assignment, AssignmentSource},
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
    types::err::AnalysisError,
};

/// The role an atom plays in the derived clause.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Cell {
    /// The atom is not (yet) part of the derivation, with its background value.
    Value(Option<bool>),

    /// The atom is part of the derived clause, with a value from a previous level.
    Conflict(bool),

    /// The atom is part of the derived clause and valueless on the buffer, i.e.
    /// assigned at the current level and not yet resolved away.
    Asserts(bool),

    /// The atom was used as a pivot, and is no longer part of the derived clause.
    Pivot,
}

/// A buffer for resolution, reused between conflicts.
#[derive(Default)]
pub struct ResolutionBuffer {
    /// A cell per atom.
    cells: Vec<Cell>,

    /// A count of merged literals which are valueless on the buffer.
    valueless_count: usize,

    /// The length of the derived clause.
    clause_length: usize,
}

impl ResolutionBuffer {
    /// Resets the buffer to the given valuation.
    pub fn refresh(&mut self, valuation: &impl Valuation) {
        self.valueless_count = 0;
        self.clause_length = 0;

        self.cells.clear();
        self.cells.extend(valuation.values().map(Cell::Value));
    }

    /// Clears the buffered value of an atom.
    ///
    /// Used to 'roll back' the buffer to the valuation of the previous levels, one
    /// current-level assignment at a time.
    pub fn clear_value(&mut self, atom: Atom) {
        self.cells[atom as usize] = Cell::Value(None);
    }

    /// Applies resolution from the given conflicting clause through the assignments
    /// of the current level, in reverse order, stopping at the first unique
    /// implication point.
    pub fn resolve_through_current_level(
        &mut self,
        conflict: &[CLiteral],
        clause_db: &ClauseDB,
        top_assignments: &[Assignment],
    ) -> Result<(), AnalysisError> {
        self.merge_clause(conflict)?;

        for assignment in top_assignments.iter().rev() {
            if self.valueless_count <= 1 {
                break;
            }

            match self.cells[assignment.literal.atom() as usize] {
                Cell::Asserts(_) => match assignment.source {
                    AssignmentSource::BCP(key) => {
                        let reason = match clause_db.get(&key) {
                            Ok(stored) => stored.literals(),
                            Err(_) => return Err(AnalysisError::LostClause),
                        };
                        self.resolve_clause(reason, assignment.literal)?;
                    }

                    // Every other current-level literal has been resolved away, so
                    // the decision is the unique implication point.
                    AssignmentSource::Decision => break,
                },

                _ => {}
            }
        }

        match self.valueless_count {
            0 | 1 => Ok(()),
            _ => Err(AnalysisError::Exhausted),
        }
    }

    /// Returns the derived clause, with the asserted literal first.
    pub fn to_assertion_clause(&self) -> CClause {
        let mut clause = Vec::with_capacity(self.clause_length);
        let mut asserted = None;

        for (atom, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Conflict(value) => clause.push(CLiteral::new(atom as Atom, *value)),
                Cell::Asserts(value) => asserted = Some(CLiteral::new(atom as Atom, *value)),
                Cell::Value(_) | Cell::Pivot => {}
            }
        }

        if let Some(literal) = asserted {
            clause.insert(0, literal);
        }

        clause
    }

    /// The atoms used during the derivation: every atom merged in, pivots included.
    pub fn atoms_used(&self) -> impl Iterator<Item = Atom> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(atom, cell)| match cell {
                Cell::Value(_) => None,
                _ => Some(atom as Atom),
            })
    }
}

// Private methods.

impl ResolutionBuffer {
    /// Merges a clause into the buffer, updating relevant value cells to note their
    /// relation to the clause.
    ///
    /// Cells already merged from some other clause are skipped, and merging a clause
    /// satisfied on the buffered valuation is an error.
    fn merge_clause(&mut self, clause: &[CLiteral]) -> Result<(), AnalysisError> {
        for literal in clause {
            let cell = &mut self.cells[literal.atom() as usize];
            match cell {
                Cell::Conflict(_) | Cell::Asserts(_) | Cell::Pivot => {}

                Cell::Value(None) => {
                    self.clause_length += 1;
                    self.valueless_count += 1;
                    *cell = Cell::Asserts(literal.polarity());
                }

                Cell::Value(Some(value)) if *value != literal.polarity() => {
                    self.clause_length += 1;
                    *cell = Cell::Conflict(literal.polarity());
                }

                Cell::Value(Some(_)) => return Err(AnalysisError::SatisfiedClause),
            }
        }
        Ok(())
    }

    /// Resolves a reason clause into the buffer, on the given pivot.
    fn resolve_clause(&mut self, clause: &[CLiteral], pivot: CLiteral) -> Result<(), AnalysisError> {
        self.merge_clause(clause)?;
        self.cells[pivot.atom() as usize] = Cell::Pivot;
        self.clause_length -= 1;
        self.valueless_count -= 1;
        Ok(())
    }
}
