/*!
A queue of observed consequences to be propagated.

Observed consequences are atom-value pairs, each represented as a literal, such that
the given atom *must* have the given value on the current valuation --- or, in the
case of a decision, an atom-value pair the solver has committed to.

Queuing a literal results in an immediate attempt to update the current valuation, so
it is sufficient to queue a literal in order to value its atom.
As a consequence, the following invariant is upheld:

<div class="warning">
Whenever the valuation is extended so that atom <i>a</i> has value <i>v</i>, a
literal for the pair is added to the consequence queue.
</div>

The queue is FIFO, and is drained by
[apply_consequences](crate::procedures::apply_consequences) --- so all consequences
of a decision are propagated before the next decision is made.
On a conflict the queue is trimmed during the [backjump](crate::procedures::backjump)
which follows, removing exactly the queued literals from abandoned levels.
*/

use std::collections::VecDeque;

use crate::{
    context::GenericContext,
    db::{atom::AtomValue, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::{
        consequence::{Assignment, AssignmentSource},
        literal::CLiteral,
    },
};

/// A queue of observed consequences and the level at which each was observed.
pub type ConsequenceQ = VecDeque<(CLiteral, LevelIndex)>;

/// Relative positions to place a literal on the consequence queue.
pub enum QPosition {
    /// The front of the queue.
    Front,

    /// The back of the queue.
    Back,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Clears all queued consequences from levels greater than `level`.
    pub fn clear_q_above(&mut self, level: LevelIndex) {
        self.consequence_q.retain(|(_, q_level)| *q_level <= level);
    }

    /// Assigns the given consequence of a clause, if possible, queueing it for
    /// propagation and recording it on the trail.
    ///
    /// The returned [AtomValue] notes how the consequence related to the valuation,
    /// with [Different](AtomValue::Different) indicating a conflict with the clause.
    pub fn q_consequence(
        &mut self,
        literal: CLiteral,
        key: ClauseKey,
        position: QPosition,
    ) -> AtomValue {
        let level = self.trail.level();

        match self.atom_db.set_value(literal, level) {
            AtomValue::NotSet => {
                self.counters.propagations += 1;
                self.trail
                    .record(Assignment::from(literal, AssignmentSource::BCP(key)));

                match position {
                    QPosition::Front => self.consequence_q.push_front((literal, level)),
                    QPosition::Back => self.consequence_q.push_back((literal, level)),
                }

                log::trace!(target: targets::QUEUE, "Queued {literal} from {key} at level {level}.");
                AtomValue::NotSet
            }

            AtomValue::Same => AtomValue::Same,

            AtomValue::Different => {
                log::trace!(target: targets::QUEUE, "Queueing {literal} from {key} failed.");
                AtomValue::Different
            }
        }
    }

    /// Assigns the given decision, queueing it for propagation and recording it on
    /// the trail.
    pub fn q_decision(&mut self, literal: CLiteral) -> AtomValue {
        let level = self.trail.level();

        match self.atom_db.set_value(literal, level) {
            AtomValue::NotSet => {
                self.counters.decisions += 1;
                self.trail
                    .record(Assignment::from(literal, AssignmentSource::Decision));
                self.consequence_q.push_back((literal, level));

                log::trace!(target: targets::QUEUE, "Queued decision {literal} at level {level}.");
                AtomValue::NotSet
            }

            value => value,
        }
    }
}
