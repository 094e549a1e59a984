/*!
A database of clauses, accessed through [keys](ClauseKey).

An internal distinction is made between unit clauses, binary clauses, and long(er)
clauses --- encoded in the keys --- as each is stored and watched differently:

- Unit clauses are stored as they are and never watch an atom, with their consequence
  queued at the root level when the clause is added.
- Binary clauses watch both their literals, with each watch carrying the other
  literal so propagation over a binary clause never opens the database.
- Long clauses watch the literals at positions 0 and 1, exchanged for others as the
  valuation changes.

Original clauses and additions (clauses learnt during a solve) are stored alike, and
distinguished only in counts.
Keys, once issued, are never invalidated --- the watch lists and the trail hold keys
rather than clauses.
*/

pub mod stored;

pub use stored::StoredClause;

use crate::{
    db::{
        atom::{watch_db::BinaryWatch, AtomDB},
        keys::{ClauseKey, FormulaIndex},
    },
    misc::log::targets::{self},
    structures::{
        clause::{CClause, ClauseSource},
        literal::CLiteral,
    },
    types::err::ClauseDBError,
};

/// The clause database.
#[derive(Default)]
pub struct ClauseDB {
    /// Stored unit clauses.
    unit: Vec<StoredClause>,

    /// Stored binary clauses, indexed by [ClauseKey::Binary] keys.
    binary: Vec<StoredClause>,

    /// Stored long clauses, indexed by [ClauseKey::Long] keys.
    long: Vec<StoredClause>,

    /// A count of stored original clauses.
    original_count: usize,

    /// A count of stored additions.
    addition_count: usize,
}

impl ClauseDB {
    /// Stores a clause, registering watches as appropriate for its length.
    ///
    /// The clause is assumed to contain distinct literals over distinct atoms.
    pub fn store(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        atom_db: &mut AtomDB,
    ) -> Result<ClauseKey, ClauseDBError> {
        let key = match clause.len() {
            0 => return Err(ClauseDBError::EmptyClause),

            1 => {
                let key = ClauseKey::Unit(clause[0]);
                self.unit.push(StoredClause::new(key, clause, source));
                key
            }

            2 => {
                let index: FormulaIndex = match self.binary.len().try_into() {
                    Ok(index) => index,
                    Err(_) => return Err(ClauseDBError::StorageExhausted),
                };
                let key = ClauseKey::Binary(index);

                atom_db.watch_binary(clause[0], BinaryWatch::new(clause[1], key));
                atom_db.watch_binary(clause[1], BinaryWatch::new(clause[0], key));

                self.binary.push(StoredClause::new(key, clause, source));
                key
            }

            _ => {
                let index: FormulaIndex = match self.long.len().try_into() {
                    Ok(index) => index,
                    Err(_) => return Err(ClauseDBError::StorageExhausted),
                };
                let key = ClauseKey::Long(index);

                self.long
                    .push(StoredClause::new_long(key, clause, source, atom_db));
                key
            }
        };

        log::trace!(target: targets::CLAUSE_DB, "Stored {key}");

        match source {
            ClauseSource::Original => self.original_count += 1,
            ClauseSource::Resolution => self.addition_count += 1,
        }

        Ok(key)
    }

    /// The stored clause accessed by `key`.
    ///
    /// Unit clauses are their own keys, and are not retrieved through this method.
    pub fn get(&self, key: &ClauseKey) -> Result<&StoredClause, ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Err(ClauseDBError::GetUnitKey),

            ClauseKey::Binary(index) => match self.binary.get(*index as usize) {
                Some(clause) => Ok(clause),
                None => Err(ClauseDBError::InvalidKeyIndex),
            },

            ClauseKey::Long(index) => match self.long.get(*index as usize) {
                Some(clause) => Ok(clause),
                None => Err(ClauseDBError::InvalidKeyIndex),
            },
        }
    }

    /// A mutable borrow of the stored clause accessed by `key`.
    pub fn get_mut(&mut self, key: &ClauseKey) -> Result<&mut StoredClause, ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Err(ClauseDBError::GetUnitKey),

            ClauseKey::Binary(index) => match self.binary.get_mut(*index as usize) {
                Some(clause) => Ok(clause),
                None => Err(ClauseDBError::InvalidKeyIndex),
            },

            ClauseKey::Long(index) => match self.long.get_mut(*index as usize) {
                Some(clause) => Ok(clause),
                None => Err(ClauseDBError::InvalidKeyIndex),
            },
        }
    }

    /// A count of all stored clauses.
    pub fn clause_count(&self) -> usize {
        self.unit.len() + self.binary.len() + self.long.len()
    }

    /// A count of stored original clauses.
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// A count of stored additions, i.e. of clauses learnt since the solve began.
    pub fn addition_count(&self) -> usize {
        self.addition_count
    }

    /// An iterator over the literals of every stored clause.
    pub fn all_clauses(&self) -> impl Iterator<Item = &[CLiteral]> {
        self.unit
            .iter()
            .chain(self.binary.iter())
            .chain(self.long.iter())
            .map(|stored| stored.literals())
    }

    /// An iterator over every stored non-unit clause.
    pub fn all_nonunit_clauses(&self) -> impl Iterator<Item = &StoredClause> {
        self.binary.iter().chain(self.long.iter())
    }
}
