/*!
A structure to record which clauses are watching an atom.

# Theory

A core part of a solve is [boolean constraint propagation](crate::procedures::bcp)
(BCP): the observation that some literal in a clause must be true due to all other
literals in the clause being false.

For example, given the clause p ∨ -q ∨ r and a valuation on which p is false and q is
true, the clause is true *only if* r is (made) true --- the clause 'asserts' r.

BCP only applies when there is exactly one literal without a value and every other
literal conflicts with the background valuation.
This motivates watching two literals of each clause: so long as both watched literals
are unvalued or satisfied the clause cannot assert, and the clause only needs to be
examined when a watched literal becomes false.

# Implementation

The clauses watching an atom are distinguished by length:

1. Binary clauses, where the watched literals never need to be updated, and the
   *other* literal is recorded in the watch to avoid a trip to the clause database.
2. Longer clauses, where only a key to the clause is recorded, and the watched
   literals may be exchanged for others as the valuation changes.

And, by which value of the atom is being watched for, as the purpose of a watch is to
note a watched literal has become false.
So, in total each atom has four watch lists.

A unit clause never watches any atom.

The [WatchDB] structure has no mutating methods of its own.
Mutation is through methods belonging to the [AtomDB](crate::db::atom::AtomDB), which
access private members of the [WatchDB].
*/

use crate::{db::keys::ClauseKey, structures::literal::CLiteral};

/// A binary clause watch, carrying the *other* literal of the clause.
#[derive(Clone, Copy, Debug)]
pub struct BinaryWatch {
    /// The other literal of the binary clause.
    pub check: CLiteral,

    /// The key to the binary clause.
    pub key: ClauseKey,
}

impl BinaryWatch {
    pub fn new(check: CLiteral, key: ClauseKey) -> Self {
        BinaryWatch { check, key }
    }
}

/// The result of updating the watched literals of a long clause, when an update was
/// possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchStatus {
    /// The other watched literal is satisfied, so the clause keeps its current
    /// watches and remains in the current watch list.
    Witness,

    /// A replacement watch was found, and the clause has moved to the watch list of
    /// the replacement literal.
    Moved,
}

/// The watchers of an atom, by clause length and by which value is under watch.
#[derive(Default)]
pub struct WatchDB {
    /// Binary clauses watching for a value of `true`.
    pub(super) positive_binary: Vec<BinaryWatch>,

    /// Binary clauses watching for a value of `false`.
    pub(super) negative_binary: Vec<BinaryWatch>,

    /// Long clauses watching for a value of `true`.
    pub(super) positive_long: Vec<ClauseKey>,

    /// Long clauses watching for a value of `false`.
    pub(super) negative_long: Vec<ClauseKey>,
}
