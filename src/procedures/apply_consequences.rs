/*!
Applies queued consequences.

At a high level [apply_consequences](GenericContext::apply_consequences) sequences a
handful of more basic procedures in a loop:
- Take a queued consequence.
- Apply boolean constraint propagation with respect to the consequence.
- If no conflict is found, continue.
- Otherwise, perform conflict analysis and break.

The procedures are sequenced as a single procedure as the loop continues until the
queue is exhausted or a conflict is found, and in the case of a conflict returns the
asserting clause derived by analysis so further actions may be taken --- counting the
conflict against the restart interval and the epoch, notably.

A conflict found with no decision made cannot be recovered from, as there is no
decision to revise: the formula is unsatisfiable, and the conflict *fundamental*.

```rust,ignore
while let Some((literal, _)) = self.consequence_q.front() {
    match unsafe { self.bcp(literal) } {
        Ok(()) => self.consequence_q.pop_front(),
        Err(err::BCPError::Conflict(key)) => {
            if !self.trail.decision_is_made() {
                return Ok(FundamentalConflict);
            }

            match self.conflict_analysis(&key)? {
                …
            }
        }
    }
}
Ok(Exhausted)
```

Queued consequences are removed from the queue only if BCP was successful.
For, in the case of a conflict the consequence may remain, and will instead be
removed from the queue during the backjump made within analysis.
*/

use crate::{
    context::{ContextState, GenericContext},
    db::ClauseKey,
    procedures::analysis::AnalysisOk,
    structures::literal::CLiteral,
    types::err::{self},
};

/// Ok results of [apply_consequences](GenericContext::apply_consequences).
pub enum ApplyConsequencesOk {
    /// A conflict was found with no decision made, and so the formula is
    /// unsatisfiable.
    FundamentalConflict,

    /// A unit clause was derived from some conflict.
    UnitClause {
        /// The literal of the clause.
        literal: CLiteral,
    },

    /// A non-unit asserting clause was derived from some conflict.
    AssertingClause {
        /// The key to the clause.
        key: ClauseKey,

        /// The literal asserted by the clause.
        literal: CLiteral,
    },

    /// There were no (further) consequences to apply.
    Exhausted,
}

impl<R: rand::Rng> GenericContext<R> {
    /// Applies BCP to the consequence queue until either a conflict is found or the
    /// queue is exhausted.
    /// See [procedures::apply_consequences](crate::procedures::apply_consequences)
    /// for details.
    pub fn apply_consequences(&mut self) -> Result<ApplyConsequencesOk, err::ErrorKind> {
        loop {
            let Some((literal, _)) = self.consequence_q.front().copied() else {
                return Ok(ApplyConsequencesOk::Exhausted);
            };

            // Safety: no borrow of a watch list is live.
            match unsafe { self.bcp(literal) } {
                Ok(()) => {
                    self.consequence_q.pop_front();
                }

                Err(err::BCPError::Conflict(key)) => {
                    self.counters.conflicts += 1;
                    self.counters.fresh_conflicts += 1;

                    if !self.trail.decision_is_made() {
                        self.state = ContextState::Unsatisfiable;
                        return Ok(ApplyConsequencesOk::FundamentalConflict);
                    }

                    match self.conflict_analysis(&key)? {
                        AnalysisOk::UnitClause(literal) => {
                            return Ok(ApplyConsequencesOk::UnitClause { literal });
                        }

                        AnalysisOk::AssertingClause { key, literal } => {
                            return Ok(ApplyConsequencesOk::AssertingClause { key, literal });
                        }
                    }
                }

                Err(non_conflict_error) => return Err(non_conflict_error.into()),
            }
        }
    }
}
