/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- Watch lists for each atom, in the form of [WatchDB] structs indexed by atom.
- A current (often partial) [valuation](Valuation) and the previously held value of
  each atom (the 'saved phase').
- An [ActivityHeap] recording the activity of atoms, where any atom without a value
  is active on the heap.
- A record of which decision level an atom was valued at.
*/

pub mod activity;
pub mod watch_db;

use watch_db::{BinaryWatch, WatchDB};

use crate::{
    config::{Activity, Config},
    db::{keys::ClauseKey, LevelIndex},
    generic::index_heap::ActivityHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX, TOP_ATOM},
        literal::{CLiteral, Literal},
        valuation::{VValuation, Valuation},
    },
    types::err::AtomDBError,
};

/// The atom database.
pub struct AtomDB {
    /// Watch lists for each atom, indexed by atom.
    watch_dbs: Vec<WatchDB>,

    /// The current (often partial) valuation.
    valuation: VValuation,

    /// The last value each atom held, if it has held one (the saved phase).
    previous_value: Vec<Option<bool>>,

    /// Which decision level each atom was valued at, while valued.
    decision_levels: Vec<Option<LevelIndex>>,

    /// Activities, with every unvalued atom active on the heap.
    activity_heap: ActivityHeap,

    /// The current activity bump.
    activity_inc: Activity,

    /// Local configuration, cloned from the configuration of a context.
    activity_decay: Activity,
    activity_max: Activity,
    activity_rescale: Activity,
}

/// The status of the valuation of an atom, relative to some known literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomValue {
    /// The atom had no value.
    NotSet,

    /// The value of the atom is the same as the polarity of the literal.
    Same,

    /// The value of the atom is not the same as the polarity of the literal.
    Different,
}

impl AtomDB {
    pub fn new(config: &Config) -> Self {
        let mut db = AtomDB {
            watch_dbs: Vec::default(),

            valuation: Vec::default(),
            previous_value: Vec::default(),
            decision_levels: Vec::default(),

            activity_heap: ActivityHeap::default(),
            activity_inc: 1.0,

            activity_decay: config.activity_decay,
            activity_max: config.activity_max,
            activity_rescale: config.activity_rescale,
        };

        // The top atom is created with a value, and as the value is never dropped
        // the atom is discarded if ever taken from the activity heap.
        let top = db.fresh_atom().expect("atom zero is within ATOM_MAX");
        db.set_value(CLiteral::new(top, true), 0);
        debug_assert_eq!(top, TOP_ATOM);

        db
    }

    /// A count of atoms in the database, including the reserved top atom.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation.
    pub fn valuation(&self) -> &VValuation {
        &self.valuation
    }

    /// A fresh atom --- on Ok the atom is part of the language of the context, and
    /// every relevant structure has been updated to support access via the atom.
    pub fn fresh_atom(&mut self) -> Result<Atom, AtomDBError> {
        let atom = match self.valuation.len().try_into() {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(AtomDBError::AtomsExhausted),
        };

        self.watch_dbs.push(WatchDB::default());
        self.valuation.push(None);
        self.previous_value.push(None);
        self.decision_levels.push(None);

        self.activity_heap.add(atom as usize);
        self.activity_heap.activate(atom as usize);

        Ok(atom)
    }

    /// The value of the given atom, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation[atom as usize]
    }

    /// The saved phase of the given atom, if the atom has ever been valued.
    pub fn previous_value_of(&self, atom: Atom) -> Option<bool> {
        self.previous_value[atom as usize]
    }

    /// Which decision level the given atom was valued at, while valued.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.decision_levels[atom as usize]
    }

    /// Values the atom of the literal to the polarity of the literal, if possible,
    /// with a note of the level at which this happens, and saves the phase.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex) -> AtomValue {
        let atom = literal.atom() as usize;

        match self.valuation[atom] {
            None => {
                self.valuation[atom] = Some(literal.polarity());
                self.previous_value[atom] = Some(literal.polarity());
                self.decision_levels[atom] = Some(level);
                AtomValue::NotSet
            }

            Some(value) if value == literal.polarity() => AtomValue::Same,

            Some(_) => AtomValue::Different,
        }
    }

    /// Clears the value of an atom, and returns the atom to the activity heap.
    pub fn drop_value(&mut self, atom: Atom) {
        log::trace!(target: targets::VALUATION, "Cleared atom: {atom}");
        self.valuation[atom as usize] = None;
        self.decision_levels[atom as usize] = None;
        self.activity_heap.activate(atom as usize);
    }

    /// A count of atoms with a value, excluding the top atom.
    pub fn valued_count(&self) -> usize {
        self.valuation
            .iter()
            .skip(1)
            .filter(|value| value.is_some())
            .count()
    }

    /// Adds a watch from a binary clause on the given literal.
    pub fn watch_binary(&mut self, literal: CLiteral, watch: BinaryWatch) {
        let db = &mut self.watch_dbs[literal.atom() as usize];
        match literal.polarity() {
            true => db.positive_binary.push(watch),
            false => db.negative_binary.push(watch),
        }
    }

    /// Adds a watch from a long clause on the given literal.
    pub fn watch_long(&mut self, literal: CLiteral, key: ClauseKey) {
        let db = &mut self.watch_dbs[literal.atom() as usize];
        match literal.polarity() {
            true => db.positive_long.push(key),
            false => db.negative_long.push(key),
        }
    }

    /// The binary clauses watching for `atom` to be valued `value`.
    pub fn binary_watchers(&self, atom: Atom, value: bool) -> &[BinaryWatch] {
        let db = &self.watch_dbs[atom as usize];
        match value {
            true => &db.positive_binary,
            false => &db.negative_binary,
        }
    }

    /// The long clauses watching for `atom` to be valued `value`.
    pub fn long_watchers(&self, atom: Atom, value: bool) -> &[ClauseKey] {
        let db = &self.watch_dbs[atom as usize];
        match value {
            true => &db.positive_long,
            false => &db.negative_long,
        }
    }

    /// A pointer to the long clauses watching for `atom` to be valued `value`.
    ///
    /// A pointer rather than a slice to help simplify [BCP](crate::procedures::bcp),
    /// where the list is held while watches of *other* atoms are updated.
    /// As such, care should be taken to avoid creating aliases.
    ///
    /// # Safety
    /// The caller must ensure no other borrow of the same list is live.
    pub unsafe fn long_watchers_ptr(&mut self, atom: Atom, value: bool) -> *mut Vec<ClauseKey> {
        let db = &mut self.watch_dbs[atom as usize];
        match value {
            true => &mut db.positive_long,
            false => &mut db.negative_long,
        }
    }

    /// An iterator over every atom without a value, in atom order.
    pub fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.valuation.unvalued_atoms()
    }

    /// True if some literal of the clause is true on the current valuation.
    pub fn clause_satisfied(&self, clause: &[CLiteral]) -> bool {
        clause
            .iter()
            .any(|literal| self.value_of(literal.atom()) == Some(literal.polarity()))
    }

    /// Removes and returns the most active atom on the activity heap, if any.
    ///
    /// The heap holds *at least* every unvalued atom, so the returned atom may have a
    /// value --- callers pop until an unvalued atom appears.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }
}
