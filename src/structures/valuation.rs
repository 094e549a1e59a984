//! Valuations, maps from atoms to truth values.
//!
//! A valuation is often partial, and so the canonical representation is a vector of
//! `Option<bool>`, indexed by atoms.

use crate::structures::atom::Atom;

/// The canonical representation of a valuation.
pub type VValuation = Vec<Option<bool>>;

/// Something which maps each atom of a context to a value, or no value.
pub trait Valuation {
    /// The value of the given atom, if any.
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// The values of all atoms, in atom order.
    fn values(&self) -> impl Iterator<Item = Option<bool>>;

    /// The atoms without a value, in atom order.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// A count of all atoms in the valuation.
    fn atom_count(&self) -> usize;
}

impl Valuation for VValuation {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        self[atom as usize]
    }

    fn values(&self) -> impl Iterator<Item = Option<bool>> {
        self.iter().copied()
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter()
            .enumerate()
            .filter_map(|(index, value)| match value {
                None => Some(index as Atom),
                Some(_) => None,
            })
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}
