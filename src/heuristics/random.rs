//! Branching on the first unvalued atom, with a random phase.
//!
//! The atom order is fixed, so under a fixed seed the decisions are deterministic.
//! Randomness comes from the context's seeded generator, drawn only when the chosen
//! atom has never held a value.

use crate::{db::atom::AtomDB, heuristics::phased, structures::literal::CLiteral};

pub struct RandomChoice;

impl RandomChoice {
    pub fn decide<R: rand::Rng>(&self, atom_db: &AtomDB, rng: &mut R) -> Option<CLiteral> {
        let atom = atom_db.unvalued_atoms().next()?;

        match atom_db.previous_value_of(atom) {
            Some(_) => Some(phased(atom_db, atom, false)),
            None => Some(phased(atom_db, atom, rng.gen_bool(0.5))),
        }
    }
}
