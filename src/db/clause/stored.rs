/*!
A struct holding a [clause](Clause) and associated metadata.

# Watched literals

Watches are initialised for any stored clause containing three or more literals, and
by invariant the watched literals are those at positions 0 and 1 of the clause.
To preserve this invariant the order of literals in the clause is mutated as needed.

When initialised, each watch is put on a literal which is unvalued or satisfied, if
possible, and otherwise on a falsified literal from the highest available decision
level --- so a clause asserting after a backjump keeps its asserted literal in view.

When a watched literal becomes false, [update_watch](StoredClause::update_watch)
moves the falsified literal to position 1 and sweeps the remainder of the clause for
a replacement which is not false.
If none exists the clause is either asserting (position 0 unvalued) or unsatisfiable
on the current valuation (position 0 false), and it is for the caller to determine
which.

Binary clauses also watch the literals at positions 0 and 1 --- i.e. both literals
--- though as no replacement watch could ever be found the watches are registered
once, on storage, and never updated.
*/

use crate::{
    db::{
        atom::{watch_db::WatchStatus, AtomDB},
        keys::ClauseKey,
        LevelIndex,
    },
    structures::{
        atom::Atom,
        clause::{CClause, Clause, ClauseSource},
        literal::{CLiteral, Literal},
    },
};

/// A clause together with some metadata.
pub struct StoredClause {
    /// A key for accessing the clause.
    key: ClauseKey,

    /// The clause itself.
    clause: CClause,

    /// From where the clause was obtained.
    source: ClauseSource,
}

impl StoredClause {
    /// Bundles a key and clause, without watches.
    ///
    /// Used for unit and binary clauses --- the watches of a binary clause are
    /// registered by the clause database, as they never require updating.
    pub(super) fn new(key: ClauseKey, clause: CClause, source: ClauseSource) -> Self {
        StoredClause {
            key,
            clause,
            source,
        }
    }

    /// Bundles a key and a clause of three or more literals, and initialises watches
    /// with respect to the current valuation.
    pub(super) fn new_long(
        key: ClauseKey,
        clause: CClause,
        source: ClauseSource,
        atom_db: &mut AtomDB,
    ) -> Self {
        let mut stored = StoredClause {
            key,
            clause,
            source,
        };
        stored.initialise_watches(atom_db);
        stored
    }

    /// The key used to access the clause.
    pub const fn key(&self) -> &ClauseKey {
        &self.key
    }

    /// From where the clause was obtained.
    pub const fn source(&self) -> ClauseSource {
        self.source
    }

    /// The literals of the clause, watched literals first.
    pub fn literals(&self) -> &[CLiteral] {
        &self.clause
    }

    /// The number of literals in the clause.
    pub fn size(&self) -> usize {
        self.clause.len()
    }

    /// Sets up positions 0 and 1 as watch candidates and registers both watches.
    fn initialise_watches(&mut self, atom_db: &mut AtomDB) {
        for index in 0..self.clause.len() {
            if watch_candidate(self.clause[index], atom_db) {
                self.clause.swap(0, index);
                break;
            }
        }
        atom_db.watch_long(self.clause[0], self.key);

        // For the other watch an unvalued or satisfied literal is chosen over a
        // falsified literal, and otherwise the falsified literal with the highest
        // decision level.
        let mut ptr = 1;
        let mut ptr_level: Option<LevelIndex> = None;

        for index in 1..self.clause.len() {
            let literal = self.clause[index];
            if watch_candidate(literal, atom_db) {
                ptr = index;
                break;
            }

            if let Some(level) = atom_db.level_of(literal.atom()) {
                if ptr_level.is_none() || Some(level) > ptr_level {
                    ptr = index;
                    ptr_level = Some(level);
                }
            }
        }

        self.clause.swap(1, ptr);
        atom_db.watch_long(self.clause[1], self.key);
    }

    /// Updates the watched literals, given an atom whose watched value has been set.
    ///
    /// On `Err` no replacement watch exists: every literal other than that at
    /// position 0 is false, the clause remains in its current watch list, and the
    /// caller examines position 0 for a consequence or conflict.
    #[allow(clippy::result_unit_err)]
    pub fn update_watch(&mut self, atom: Atom, atom_db: &mut AtomDB) -> Result<WatchStatus, ()> {
        // The falsified watch is kept at position 1.
        if self.clause[0].atom() == atom {
            self.clause.swap(0, 1);
        }

        let watched = self.clause[0];
        if let Some(value) = atom_db.value_of(watched.atom()) {
            if value == watched.polarity() {
                return Ok(WatchStatus::Witness);
            }
        }

        for index in 2..self.clause.len() {
            let literal = self.clause[index];
            match atom_db.value_of(literal.atom()) {
                Some(value) if value != literal.polarity() => {}

                _ => {
                    self.clause.swap(1, index);
                    atom_db.watch_long(self.clause[1], self.key);
                    return Ok(WatchStatus::Moved);
                }
            }
        }

        Err(())
    }
}

/// True if the literal is unvalued or satisfied on the current valuation.
fn watch_candidate(literal: CLiteral, atom_db: &AtomDB) -> bool {
    match atom_db.value_of(literal.atom()) {
        None => true,
        Some(value) => value == literal.polarity(),
    }
}

impl std::fmt::Display for StoredClause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.clause.as_dimacs(false))
    }
}
