use crate::structures::literal::CLiteral;

/// The index to a stored clause.
pub type FormulaIndex = u32;

/// A key to access a clause stored in the clause database.
///
/// Within the clause database non-unit clauses are stored in indexed structures, and
/// a key pairs the kind of structure with the index to the clause.
/// The only exception is unit clauses, where the key contains the (unit) clause.
///
/// Keys are non-owning: watch lists and assignment sources hold keys, while the
/// clauses themselves are owned by the clause database, and additions to the database
/// never invalidate a previously issued key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClauseKey {
    /// The key to a unit clause contains the (unit) clause.
    Unit(CLiteral),

    /// The key to a binary clause.
    Binary(FormulaIndex),

    /// The key to a clause of three or more literals.
    Long(FormulaIndex),
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit(literal) => write!(f, "Unit({literal})"),
            Self::Binary(index) => write!(f, "Binary({index})"),
            Self::Long(index) => write!(f, "Long({index})"),
        }
    }
}
