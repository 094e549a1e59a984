/*!
(The internal representation of) an atom, aka. a 'variable'.

Atoms are things to which assigning a (boolean) value is of interest.

Each atom is a u32 *u* such that either *u* is 0 or *u - 1* is an atom.
That is, the atoms of a context are [0..*m*) for some *m*, which allows atoms to be
used as the indices of a structure (watch lists, the valuation, activities, …)
without taking too much space.

In the DIMACS representation of a formula variables are positive integers, and as
atom 0 is reserved (see [TOP_ATOM]) DIMACS variable *v* is atom *v*, directly.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The atom `0` is reserved, and fixed internally with a value of true.
pub const TOP_ATOM: Atom = 0;

/// The maximum instance of an atom, limited by the integer representation of literals.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();
