//! Branching on the most active atom.
//!
//! Activities are maintained by the [atom database](crate::db::atom) --- bumped
//! during conflict analysis and decayed after each conflict --- so the heuristic
//! itself is stateless, and the most active unvalued atom is taken from the activity
//! heap.
//! Ties on activity resolve to the atom with the smallest index.

use crate::{
    db::atom::AtomDB,
    heuristics::phased,
    structures::{atom::Atom, literal::CLiteral},
};

pub struct Vsids;

impl Vsids {
    pub fn decide(&self, atom_db: &mut AtomDB) -> Option<CLiteral> {
        // The heap holds at least the unvalued atoms, so valued pops are discarded.
        // A discarded atom returns to the heap when its value is cleared.
        while let Some(atom) = atom_db.heap_pop_most_active() {
            if atom_db.value_of(atom as Atom).is_none() {
                return Some(phased(atom_db, atom, false));
            }
        }

        atom_db
            .unvalued_atoms()
            .next()
            .map(|atom| phased(atom_db, atom, false))
    }
}
