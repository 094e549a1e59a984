//! Branching by dynamic largest individual sum.
//!
//! Each decision counts, for every unvalued literal, its occurrences in clauses not
//! (yet) satisfied on the current valuation, and branches on the literal with the
//! largest count.
//! Ties resolve to the smallest atom, and to the positive literal within an atom.
//!
//! The counts are recomputed on every decision with a pass over the clause store.

use crate::{
    db::{atom::AtomDB, clause::ClauseDB},
    heuristics::phased,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

pub struct Dlis;

impl Dlis {
    pub fn decide(&self, atom_db: &AtomDB, clause_db: &ClauseDB) -> Option<CLiteral> {
        let atom_count = atom_db.count();
        let mut positive = vec![0_usize; atom_count];
        let mut negative = vec![0_usize; atom_count];

        for clause in clause_db.all_clauses() {
            if atom_db.clause_satisfied(clause) {
                continue;
            }

            for literal in clause {
                if atom_db.value_of(literal.atom()).is_none() {
                    match literal.polarity() {
                        true => positive[literal.atom() as usize] += 1,
                        false => negative[literal.atom() as usize] += 1,
                    }
                }
            }
        }

        let mut best: Option<(Atom, bool, usize)> = None;

        for atom in 1..atom_count as Atom {
            if atom_db.value_of(atom).is_some() {
                continue;
            }

            let (count, sign) = match positive[atom as usize] >= negative[atom as usize] {
                true => (positive[atom as usize], true),
                false => (negative[atom as usize], false),
            };

            match best {
                Some((_, _, best_count)) if count <= best_count => {}
                _ => best = Some((atom, sign, count)),
            }
        }

        best.map(|(atom, sign, _)| phased(atom_db, atom, sign))
    }
}
