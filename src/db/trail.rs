//! The trail of assignments, in order of occurrence, partitioned by decision level.

use crate::{db::LevelIndex, structures::consequence::Assignment};

#[derive(Default)]
pub struct Trail {
    /// Assignments, in order of occurrence.
    assignments: Vec<Assignment>,

    /// Indices into `assignments` marking the first assignment of each level.
    level_indices: Vec<usize>,
}

impl Trail {
    /// Stores an assignment at the current level.
    pub fn record(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Opens a fresh decision level.
    pub fn push_fresh_level(&mut self) {
        self.level_indices.push(self.assignments.len());
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.level_indices.len() as LevelIndex
    }

    /// True if some decision is active, false otherwise.
    pub fn decision_is_made(&self) -> bool {
        !self.level_indices.is_empty()
    }

    /// The assignments made at the (current) top level, in order of assignment.
    pub fn top_level_assignments(&self) -> &[Assignment] {
        match self.level_indices.last() {
            Some(&level_start) => &self.assignments[level_start..],
            None => &[],
        }
    }

    /// All assignments, in order of occurrence.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Removes levels above the given level, returning the removed assignments.
    ///
    /// Does not clear the *valuation* of the removed assignments.
    pub fn clear_above(&mut self, level: LevelIndex) -> Vec<Assignment> {
        match self.level_indices.get(level as usize) {
            Some(&level_start) => {
                self.level_indices.truncate(level as usize);
                self.assignments.split_off(level_start)
            }
            None => Vec::default(),
        }
    }
}
