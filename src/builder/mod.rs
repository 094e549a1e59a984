/*!
Methods to place a formula in a context.

Clauses are added one at a time, programatically or via [DIMACS](dimacs), with atoms
created on demand.
On addition each clause is normalised: literals are sorted and deduplicated, and a
tautological clause (one containing a literal and its negation) is skipped, as it
holds on every valuation.

The consequence of a unit clause is queued at the root level as soon as the clause is
added, so a formula whose units conflict is identified as unsatisfiable during input.
Likewise, a clause with every literal false on the root valuation makes the context
unsatisfiable, and a clause with a single non-false literal queues that literal.
Once a context is unsatisfiable it stays unsatisfiable: subsequent additions are
skipped and subsequent solves return immediately.
*/

pub mod dimacs;

use crate::{
    context::{ContextState, GenericContext},
    db::{atom::AtomValue, consequence_q::QPosition},
    structures::{
        atom::Atom,
        clause::{CClause, ClauseSource},
        literal::{CLiteral, Literal},
    },
    types::err::{self, BuildError, ClauseDBError},
};

impl crate::context::Context {
    /// A context over `atom_count` atoms holding the given clauses, each clause in
    /// its signed-integer representation.
    ///
    /// A formula identified as unsatisfiable during input is kept, with the
    /// unsatisfiability reported by the first solve.
    pub fn from_parts(
        atom_count: Atom,
        clauses: &[Vec<i32>],
        config: crate::config::Config,
    ) -> Result<Self, err::ErrorKind> {
        let mut ctx = Self::from_config(config);
        ctx.ensure_atom(atom_count)?;

        for ints in clauses {
            match ctx.add_clause_ints(ints) {
                Ok(_) => {}

                Err(err::ErrorKind::Build(_))
                | Err(err::ErrorKind::ClauseDB(ClauseDBError::EmptyClause)) => break,

                Err(error) => return Err(error),
            }
        }

        Ok(ctx)
    }
}

/// Ok results of adding a clause to a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the clause database.
    Added,

    /// The clause was skipped, as adding it could not change satisfiability ---
    /// a tautology, or any clause offered once the context is unsatisfiable.
    Skipped,
}

impl<R: rand::Rng> GenericContext<R> {
    /// A fresh atom, in the language of the context.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::ErrorKind> {
        Ok(self.atom_db.fresh_atom()?)
    }

    /// Ensures `atom` (and every atom below it) is in the language of the context.
    pub fn ensure_atom(&mut self, atom: Atom) -> Result<(), err::ErrorKind> {
        while self.atom_db.count() <= atom as usize {
            self.atom_db.fresh_atom()?;
        }
        Ok(())
    }

    /// Adds a clause given in its signed-integer representation.
    ///
    /// ```rust
    /// # use magpie_sat::config::Config;
    /// # use magpie_sat::context::Context;
    /// let mut ctx = Context::from_config(Config::default());
    /// assert!(ctx.add_clause_ints(&[1, -2]).is_ok());
    /// ```
    pub fn add_clause_ints(&mut self, ints: &[i32]) -> Result<ClauseOk, err::ErrorKind> {
        let clause = ints.iter().map(|int| CLiteral::from(*int)).collect();
        self.add_clause(clause)
    }

    /// Adds a clause to the context.
    ///
    /// An empty clause, or a clause false on the root valuation, makes the context
    /// unsatisfiable and returns an error noting this.
    pub fn add_clause(&mut self, mut clause: CClause) -> Result<ClauseOk, err::ErrorKind> {
        if self.state == ContextState::Unsatisfiable {
            return Ok(ClauseOk::Skipped);
        }

        if self.state == ContextState::Configuration {
            self.state = ContextState::Input;
        }

        clause.sort_unstable();
        clause.dedup();

        // After sorting, a tautology pairs polarities of an atom in adjacent cells.
        for pair in clause.windows(2) {
            if pair[0].atom() == pair[1].atom() {
                return Ok(ClauseOk::Skipped);
            }
        }

        if clause.is_empty() {
            self.state = ContextState::Unsatisfiable;
            return Err(ClauseDBError::EmptyClause.into());
        }

        for literal in &clause {
            self.ensure_atom(literal.atom())?;
        }

        if clause.len() == 1 {
            let literal = clause[0];
            let key = self
                .clause_db
                .store(clause, ClauseSource::Original, &mut self.atom_db)?;

            return match self.q_consequence(literal, key, QPosition::Back) {
                AtomValue::NotSet | AtomValue::Same => Ok(ClauseOk::Added),

                AtomValue::Different => {
                    self.state = ContextState::Unsatisfiable;
                    Err(BuildError::Unsatisfiable.into())
                }
            };
        }

        // Units queued by earlier additions may have already settled the clause.
        let mut satisfied = false;
        let mut unvalued_count = 0;
        let mut unvalued_literal = None;

        for literal in &clause {
            match self.atom_db.value_of(literal.atom()) {
                None => {
                    unvalued_count += 1;
                    unvalued_literal = Some(*literal);
                }

                Some(value) if value == literal.polarity() => satisfied = true,

                Some(_) => {}
            }
        }

        let key = self
            .clause_db
            .store(clause, ClauseSource::Original, &mut self.atom_db)?;

        if !satisfied {
            match (unvalued_count, unvalued_literal) {
                (0, _) => {
                    self.state = ContextState::Unsatisfiable;
                    return Err(BuildError::Unsatisfiable.into());
                }

                (1, Some(literal)) => {
                    self.q_consequence(literal, key, QPosition::Back);
                }

                _ => {}
            }
        }

        Ok(ClauseOk::Added)
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{config::Config, context::Context};

    #[test]
    fn fresh_atoms_are_sequential() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(ctx.fresh_atom(), Ok(1));
        assert_eq!(ctx.fresh_atom(), Ok(2));
        assert!(ctx.ensure_atom(5).is_ok());
        assert_eq!(ctx.atom_db.count(), 6);
    }

    #[test]
    fn a_context_from_parts() {
        let clauses = vec![vec![1, -2], vec![-1, 2, 3]];
        let mut ctx =
            Context::from_parts(3, &clauses, Config::default()).expect("a built context");

        assert_eq!(ctx.atom_db.count(), 4);
        assert!(ctx.solve().is_ok());
    }

    #[test]
    fn from_parts_keeps_an_unsatisfiable_formula() {
        let clauses = vec![vec![1], vec![-1], vec![2]];
        let mut ctx =
            Context::from_parts(2, &clauses, Config::default()).expect("a built context");

        assert_eq!(ctx.solve(), Ok(crate::reports::Report::Unsatisfiable));
    }

    #[test]
    fn unit_consequences_settle_later_clauses() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause_ints(&[-1]).is_ok());
        // With atom 1 false the clause below asserts atom 2 on addition.
        assert_eq!(ctx.add_clause_ints(&[1, 2]), Ok(ClauseOk::Added));

        assert_eq!(ctx.value_of(2), Some(true));
    }

    #[test]
    fn a_clause_false_at_the_root_is_unsatisfiable() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause_ints(&[-1]).is_ok());
        assert!(ctx.add_clause_ints(&[-2]).is_ok());

        assert!(ctx.add_clause_ints(&[1, 2]).is_err());
        assert_eq!(ctx.state, ContextState::Unsatisfiable);
    }

    #[test]
    fn additions_are_distinguished_from_originals() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.add_clause_ints(&[1, 2, 3]).is_ok());

        let stored = ctx
            .clause_db
            .all_nonunit_clauses()
            .next()
            .expect("a stored clause");
        assert_eq!(stored.source(), ClauseSource::Original);
        assert_eq!(ctx.clause_db.addition_count(), 0);
    }
}
