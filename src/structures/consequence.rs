//! Assignments, and the source of an assignment.

use crate::{db::ClauseKey, structures::literal::CLiteral};

/// The source of an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignmentSource {
    /// A free decision, made when no consequence was queued.
    Decision,

    /// A consequence of the noted clause by boolean constraint propagation.
    BCP(ClauseKey),
}

/// An atom-value pair, represented as a literal, together with its source.
#[derive(Clone, Copy, Debug)]
pub struct Assignment {
    /// The assignment, represented as a literal.
    pub literal: CLiteral,

    /// The source of the assignment.
    pub source: AssignmentSource,
}

impl Assignment {
    pub fn from(literal: CLiteral, source: AssignmentSource) -> Self {
        Assignment { literal, source }
    }
}
