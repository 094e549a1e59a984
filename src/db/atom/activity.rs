//! Methods related to the activity of atoms.
//!
//! Atoms involved in a conflict have their activity bumped by the current bump value,
//! and after each conflict the bump grows by a factor of 1 / decay --- growing the
//! bump is equivalent to decaying the activity of every atom, without the pass.
//! When the bump would exceed the configured maximum every activity (and the bump) is
//! rescaled to prevent overflow.

use super::AtomDB;
use crate::{config::Activity, structures::atom::Atom};

impl AtomDB {
    /// The activity of the given atom.
    pub fn activity_of(&self, atom: Atom) -> Activity {
        self.activity_heap.value_at(atom as usize)
    }

    /// Bumps the activity of each atom in the iterator, then grows the bump.
    pub fn bump_atoms(&mut self, atoms: impl Iterator<Item = Atom>) {
        for atom in atoms {
            self.bump_activity(atom);
        }
        self.exponent_activity();
    }

    /// The maximum and mean activity over the non-reserved atoms.
    pub fn activity_extremes(&self) -> (Activity, Activity) {
        let mut max = Activity::default();
        let mut sum = Activity::default();

        for atom in 1..self.count() {
            let activity = self.activity_heap.value_at(atom);
            max = Activity::max(max, activity);
            sum += activity;
        }

        let mean = match self.count() {
            0 | 1 => 0.0,
            count => sum / (count - 1) as Activity,
        };

        (max, mean)
    }

    /// Bumps the activity of an atom, rescaling all activities if required.
    fn bump_activity(&mut self, atom: Atom) {
        if self.activity_heap.value_at(atom as usize) + self.activity_inc > self.activity_max {
            self.rescale_activity();
        }

        let bumped = self.activity_heap.value_at(atom as usize) + self.activity_inc;
        self.activity_heap.revalue(atom as usize, bumped);
    }

    /// Grows the bump applied to atoms by a factor of 1 / decay.
    fn exponent_activity(&mut self) {
        self.activity_inc /= self.activity_decay;
        if self.activity_inc > self.activity_max {
            self.rescale_activity();
        }
    }

    /// Rescales the activity of all atoms, and the bump.
    fn rescale_activity(&mut self) {
        self.activity_heap.scale_all(self.activity_rescale);
        self.activity_inc *= self.activity_rescale;
    }
}
