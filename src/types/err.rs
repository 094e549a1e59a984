/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some of these are internally expected --- e.g. BCP errors are used to control the
  flow of a solve.
- Others are external --- e.g. adding a clause may return a `Build` error to highlight
  the formula has become unsatisfiable, with no need to ever call solve.

Names of the error enums --- for the most part --- overlap with corresponding structs,
and so throughout the library `err::{self}` is often used to prefix uses with `err::`.
*/

/// A union of varied error kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error during conflict analysis.
    Analysis(AnalysisError),

    /// An error when building a formula in a context.
    Build(BuildError),

    /// An error in the clause database.
    ClauseDB(ClauseDBError),

    /// An error in the atom database.
    AtomDB(AtomDBError),

    /// An error related to parsing.
    Parse(ParseError),

    /// An error related to BCP.
    BCP(BCPError),

    /// An error related to backjumping.
    Backjump,
}

/// An error during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution was asked to merge a clause satisfied on the current valuation.
    SatisfiedClause,

    /// A reason clause could not be found.
    LostClause,

    /// The trail was exhausted without finding a unique implication point.
    Exhausted,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// An error from the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(crate::db::ClauseKey),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Noted errors when building a formula in a context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable formula, e.g. due to conflicting unit clauses.
    Unsatisfiable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// Attempt to get a unit clause by its key (the key is the literal).
    GetUnitKey,

    /// An invalid key index.
    InvalidKeyIndex,

    /// All possible keys have been used for some clause type (binary/long).
    StorageExhausted,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// A token which cannot be read as a literal.
    Token(usize),

    /// A required delimiter was not found.
    MissingDelimiter,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}
