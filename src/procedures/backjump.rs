/*!
Recovery from a conflict.

A backjump is a 'jump' from some (higher) decision level to some previous (lower)
decision level.

Typically, a backjump is made from level *l* to level *l - i* because a conflict was
found at level *l* and analysis produced a clause which asserts some literal at level
*l - i*.
All decisions and all consequences of those decisions from level *l* down to (and
excluding) level *l - i* are undone, and any queued consequences from the abandoned
levels are removed from the consequence queue --- queued root-level consequences, in
particular, survive a backjump to level zero.

The backjump level of a clause unsatisfiable on the current valuation is the second
highest decision level among its literals, and zero for a unit clause: the highest
level at which the clause asserts.
*/

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Backjumps to the given target level.
    ///
    /// Sound when the target level is equal to or lower than the current level, and
    /// a no-op otherwise.
    pub fn backjump(&mut self, target: LevelIndex) {
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        for assignment in self.trail.clear_above(target) {
            self.atom_db.drop_value(assignment.literal.atom());
        }

        self.clear_q_above(target);
    }

    /// The backjump level of a clause unsatisfiable on the current valuation: the
    /// second highest decision level among the literals, or zero for a unit clause.
    pub fn backjump_level(&self, clause: &[CLiteral]) -> Result<LevelIndex, err::ErrorKind> {
        match clause.len() {
            0 => panic!("! Backjump level requested for an empty clause"),

            1 => Ok(0),

            _ => {
                // An ordered record of the top two decision levels of the clause.
                let mut top_two: (Option<LevelIndex>, Option<LevelIndex>) = (None, None);

                for literal in clause {
                    let Some(level) = self.atom_db.level_of(literal.atom()) else {
                        log::error!(target: targets::BACKJUMP, "{literal} has no level");
                        return Err(err::ErrorKind::Backjump);
                    };

                    match top_two {
                        (_, None) => top_two.1 = Some(level),

                        (_, Some(top)) if level > top => {
                            top_two.0 = top_two.1;
                            top_two.1 = Some(level);
                        }

                        (None, _) => top_two.0 = Some(level),

                        (Some(second), _) if level > second => top_two.0 = Some(level),

                        _ => {}
                    }
                }

                match top_two {
                    (Some(second), _) => Ok(second),
                    (None, _) => Ok(0),
                }
            }
        }
    }
}
