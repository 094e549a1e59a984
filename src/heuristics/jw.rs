//! Branching by Jeroslow–Wang literal weights.
//!
//! The weight of a literal is ∑ 2^(-|c|) over all clauses c containing the literal,
//! favouring literals which occur in many short clauses.
//! Weights are computed once over the stored clauses and maintained incrementally as
//! clauses are learnt, so a decision is a single sweep over the unvalued atoms.

use crate::{
    db::{atom::AtomDB, clause::ClauseDB},
    heuristics::phased,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

#[derive(Default)]
pub struct JeroslowWang {
    /// The weight of each atom taken positively.
    positive: Vec<f64>,

    /// The weight of each atom taken negatively.
    negative: Vec<f64>,
}

impl JeroslowWang {
    pub fn decide(&mut self, atom_db: &AtomDB, clause_db: &ClauseDB) -> Option<CLiteral> {
        self.ensure(atom_db.count(), clause_db);

        let mut best: Option<(Atom, bool, f64)> = None;

        for atom in 1..atom_db.count() as Atom {
            if atom_db.value_of(atom).is_some() {
                continue;
            }

            let positive = self.positive[atom as usize];
            let negative = self.negative[atom as usize];
            let (score, sign) = match positive >= negative {
                true => (positive, true),
                false => (negative, false),
            };

            match best {
                Some((_, _, best_score)) if score <= best_score => {}
                _ => best = Some((atom, sign, score)),
            }
        }

        best.map(|(atom, sign, _)| phased(atom_db, atom, sign))
    }

    /// Adds the weight contribution of a learnt clause.
    pub fn on_learnt(&mut self, clause: &[CLiteral]) {
        if !self.positive.is_empty() {
            self.add_contribution(clause);
        }
    }

    /// Recomputes weights over the stored clauses whenever the atom count differs
    /// from the last computation --- in particular, on the first decision.
    fn ensure(&mut self, atom_count: usize, clause_db: &ClauseDB) {
        if self.positive.len() == atom_count {
            return;
        }

        self.positive = vec![0.0; atom_count];
        self.negative = vec![0.0; atom_count];

        for clause in clause_db.all_clauses() {
            self.add_contribution(clause);
        }
    }

    fn add_contribution(&mut self, clause: &[CLiteral]) {
        let weight = 2_f64.powi(-(clause.len().max(1) as i32));
        for literal in clause {
            match literal.polarity() {
                true => self.positive[literal.atom() as usize] += weight,
                false => self.negative[literal.atom() as usize] += weight,
            }
        }
    }
}
