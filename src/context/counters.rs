use std::{collections::VecDeque, time::Duration};

/// Counts for various things which count, roughly.
pub struct Counters {
    /// A count of every conflict seen during a solve.
    pub conflicts: usize,

    /// A count of conflicts seen since the last restart.
    ///
    /// As u32 rather than a usize for easier interaction with the restart interval.
    pub fresh_conflicts: u32,

    /// A count of all decisions made.
    pub decisions: usize,

    /// A count of all assignments made by propagation.
    pub propagations: usize,

    /// The number of restarts through a solve.
    pub restarts: usize,

    /// The total number of iterations through a solve.
    pub iterations: usize,

    /// The time taken during a solve.
    pub time: Duration,

    /// The LBDs of recently learnt clauses, oldest first.
    recent_lbd: VecDeque<u32>,

    /// How many LBDs to retain.
    lbd_window: usize,
}

impl Counters {
    pub fn new(lbd_window: usize) -> Self {
        Counters {
            conflicts: 0,
            fresh_conflicts: 0,
            decisions: 0,
            propagations: 0,
            restarts: 0,
            iterations: 0,
            time: Duration::from_secs(0),
            recent_lbd: VecDeque::default(),
            lbd_window,
        }
    }

    /// Appends the LBD of a learnt clause, dropping the oldest at the window bound.
    pub fn record_lbd(&mut self, lbd: u32) {
        if self.recent_lbd.len() == self.lbd_window {
            self.recent_lbd.pop_front();
        }
        self.recent_lbd.push_back(lbd);
    }

    /// The average of the retained LBDs, and zero if none are retained.
    pub fn recent_lbd_average(&self) -> f64 {
        match self.recent_lbd.len() {
            0 => 0.0,
            count => self.recent_lbd.iter().sum::<u32>() as f64 / count as f64,
        }
    }
}
