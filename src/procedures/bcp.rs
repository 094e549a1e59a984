/*!
A context method to aid boolean constraint propagation.

# Overview

Propagates an atom being assigned some value, given as a literal.

This is done by examining clauses watching the atom with the opposite polarity and
either updating the watches of the clause, if possible, queuing the consequence of an
asserting clause, or identifying that the clause conflicts with the current
valuation.

Propagation happens in two steps, distinguished by clause length:
- First, with respect to binary clauses.
- Second, with respect to long clauses.

This sequence is motivated by various considerations.
For example, binary clauses always have an LBD of at most 2, and propagating over a
binary clause requires neither accessing the clause database nor updating watches, as
the watch itself carries the other literal of the clause.

For long clauses the watched literals sit at positions 0 and 1 of the clause, and
examination of a clause is a call to
[update_watch](crate::db::clause::stored::StoredClause::update_watch):
the falsified watch is moved to position 1 and a replacement sought; failing that,
the literal at position 0 is either a queued consequence (if unvalued) or witness to
a conflict (if false).

# Complications

A pointer is used to obtain the list of long watchers.
A handful of issues are avoided by doing this:
1. A mutable borrow of the watch list conflicting with an immutable borrow of the
   atom database to obtain the value of an atom.
2. A mutable borrow of the context conflicting with a mutable borrow to queue a
   consequence.
3. A mutable borrow of the atom database in a call to update the watches of a clause.

(1) and (2) could be avoided by a more nuanced borrow checker, as these are separate
structures.
This is not the case for (3), as a watch list has been borrowed and a call to
update_watch may mutate watch lists.
Still, the *borrowed* list will not be mutated: the atom under propagation has a
value, and a replacement watch is only ever put on a literal which is unvalued or
satisfied --- never on the falsified literal whose list is held.

# Example

BCP is a mutating method, and a typical application will match against the result of
the mutation, e.g. a conflict may lead to conflict analysis while no conflict may
lead to a decision being made.

```rust,ignore
match unsafe { self.bcp(literal) } {
    Err(err::BCPError::Conflict(key)) => {
        if self.trail.decision_is_made() {
            let analysis_result = self.conflict_analysis(&key)?;
            …
        }
    }
    Ok(()) => …,
}
```
*/

use crate::{
    context::GenericContext,
    db::{
        atom::{watch_db::WatchStatus, AtomValue},
        consequence_q::QPosition,
    },
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Propagates the assignment of `literal`, queueing consequences and reporting
    /// the key of a conflicting clause through the error variant.
    ///
    /// # Safety
    /// The implementation requires a key invariant to be upheld:
    /// <div class="warning">
    /// The watched literals of a long clause are at positions 0 and 1.
    /// </div>
    /// And, the caller must ensure no borrow of a watch list of the negated literal
    /// is live across the call.
    pub unsafe fn bcp(&mut self, literal: CLiteral) -> Result<(), err::BCPError> {
        let atom = literal.atom();
        let value = !literal.polarity();

        // Binary clauses block.
        // Watches carry the other literal, so no watch requires updating.
        {
            let mut index = 0;
            while index < self.atom_db.binary_watchers(atom, value).len() {
                let watch = self.atom_db.binary_watchers(atom, value)[index];

                match self.atom_db.value_of(watch.check.atom()) {
                    None => match self.q_consequence(watch.check, watch.key, QPosition::Back) {
                        AtomValue::NotSet | AtomValue::Same => {}

                        AtomValue::Different => return Err(err::BCPError::Conflict(watch.key)),
                    },

                    Some(check_value) if check_value != watch.check.polarity() => {
                        log::trace!(target: targets::PROPAGATION, "Conflict of {} and {literal}.", watch.key);
                        return Err(err::BCPError::Conflict(watch.key));
                    }

                    Some(_) => {
                        // A repeat implication, as this is binary.
                    }
                }

                index += 1;
            }
        }

        // Long clauses block.
        {
            let list = &mut *self.atom_db.long_watchers_ptr(atom, value);

            let mut index = 0;
            let mut length = list.len();

            'long_loop: while index < length {
                let key = list[index];

                let db_clause = match self.clause_db.get_mut(&key) {
                    Ok(stored) => stored,
                    Err(_) => {
                        log::error!(target: targets::PROPAGATION, "Invalid key {key} in a watch list.");
                        return Err(err::BCPError::CorruptWatch);
                    }
                };

                match db_clause.update_watch(atom, &mut self.atom_db) {
                    Ok(WatchStatus::Moved) => {
                        list.swap_remove(index);
                        length -= 1;
                        continue 'long_loop;
                    }

                    Ok(WatchStatus::Witness) => {}

                    Err(()) => {
                        // After the call to update_watch any replacement candidate
                        // has been ruled out, so the clause asserts the literal at
                        // position 0, or conflicts.
                        let the_watch = db_clause.literals()[0];

                        match self.atom_db.value_of(the_watch.atom()) {
                            Some(watch_value) if watch_value != the_watch.polarity() => {
                                return Err(err::BCPError::Conflict(key));
                            }

                            None => {
                                match self.q_consequence(the_watch, key, QPosition::Back) {
                                    AtomValue::NotSet | AtomValue::Same => {}

                                    AtomValue::Different => {
                                        return Err(err::BCPError::Conflict(key))
                                    }
                                };
                            }

                            Some(_) => {}
                        }
                    }
                }

                index += 1;
                continue 'long_loop;
            }
        }

        Ok(())
    }
}
