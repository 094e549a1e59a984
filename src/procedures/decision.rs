/*!
Choosing the value of an atom.

The choice of atom and value is delegated to the active [branching
heuristic](crate::heuristics), which reads the solver state and may draw from the
context's seeded rng.
The caller opens a fresh decision level and queues the returned literal.

If no heuristic can choose --- i.e. every atom has a value --- the valuation is
complete, and as propagation precedes every decision the valuation is consistent
with the formula: the context is satisfiable.
*/

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    structures::literal::CLiteral,
};

/// Possible results from choosing a truth value to assign an atom.
pub enum DecisionOk {
    /// Some truth value was chosen for some atom.
    Literal(CLiteral),

    /// All atoms had already been assigned truth values, so no decision could be
    /// made.
    Exhausted,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Chooses a decision literal with the active heuristic, or notes the context is
    /// satisfiable when every atom is valued.
    pub fn make_decision(&mut self) -> DecisionOk {
        let chosen =
            self.heuristics
                .decide(&mut self.atom_db, &self.clause_db, &mut self.rng);

        match chosen {
            Some(literal) => {
                log::trace!(target: targets::DECISION, "Decision {literal} by {}", self.heuristics.active_arm());
                DecisionOk::Literal(literal)
            }

            None => {
                self.state = ContextState::Satisfiable;
                DecisionOk::Exhausted
            }
        }
    }
}
