/*!
The epoch state machine, tying the [bandit](crate::bandit) to the
[heuristics](crate::heuristics).

A solve is partitioned into *epochs* of a fixed number of conflicts, and within an
epoch the active branching heuristic does not change.
Restarts do not end an epoch.

The machine has two states, [Init](EpochPhase::Init) and
[Active](EpochPhase::Active):

- `Init → Active` when the solve loop starts: the counters are snapshotted, a context
  vector summarising the solver state is built, the bandit selects an arm, and the
  corresponding heuristic is installed.
- `Active → Active` at each epoch boundary, i.e. once the conflicts of the epoch
  reach the configured epoch size: a reward for the closed epoch is computed from the
  deltas against its snapshot, the bandit is updated with the (arm, context, reward)
  triple, and a fresh snapshot/context/arm opens the next epoch.
- On terminal SAT/UNSAT the open epoch is closed with a final update, so even a
  conflict-free solve teaches the controller.

Features and rewards are computed between solver steps --- never interleaved with
propagation or analysis --- so the bandit observes the state exactly as it stood when
the arm was selected.

# The context vector

Eleven features, in a fixed order for reproducibility, each finite and bounded:

1. The average LBD over the recent-LBD window (zero while empty).
2. Conflicts per decision.
3. Propagations per decision.
4. The fraction of atoms with a value.
5. The maximum atom activity over the mean activity (one while the mean is zero).
6. Clauses learnt since the solve began, scaled by 1/(1 + count).
7. Clauses learnt during the epoch, relative to the epoch size.
8. Restarts per conflict.
9. The fraction of stored clauses satisfied on the current valuation.
10. The current decision level, relative to the atom count.
11. A constant bias of one.

# The reward

For a closed epoch with counter deltas Δ against its snapshot:

> r = w_p·Δpropagations/epoch − w_c·Δconflicts/epoch − w_l·(lbd_now − lbd_start)

clamped to the configured bound.
The sign conventions are fixed --- more propagation good, more conflicts bad, growing
LBD bad --- while the weights are configuration knobs.
The LBD term compares the window average at the boundary against the window average
snapshotted when the epoch opened.
*/

use crate::{
    bandit::LinUcb,
    config::Config,
    context::{Counters, GenericContext},
    heuristics::Arm,
    misc::log::targets::{self},
};

/// The dimension of the context vector.
pub const CONTEXT_DIM: usize = 11;

/// Counter values snapshotted when an epoch opens.
#[derive(Clone, Copy, Debug)]
pub struct EpochSnapshot {
    pub conflicts: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub restarts: usize,

    /// The recent-LBD window average when the epoch opened.
    pub avg_lbd: f64,

    /// The count of learnt clauses when the epoch opened.
    pub additions: usize,
}

/// The state of the epoch machine.
pub enum EpochPhase {
    /// No epoch is open; the first selection has yet to be made.
    Init,

    /// An epoch is open: `arm` was selected on `context`, with counters as
    /// snapshotted at the start of the epoch.
    Active {
        arm: usize,
        context: Vec<f64>,
        snapshot: EpochSnapshot,
    },
}

/// The record of a closed epoch.
#[derive(Clone, Debug)]
pub struct EpochRecord {
    /// The index of the epoch, from zero.
    pub index: usize,

    /// The arm active during the epoch.
    pub arm: Arm,

    /// The reward the bandit was updated with.
    pub reward: f64,

    /// Conflicts seen during the epoch.
    pub conflicts: usize,

    /// Decisions made during the epoch.
    pub decisions: usize,

    /// Propagations made during the epoch.
    pub propagations: usize,

    /// The recent-LBD window average when the epoch closed.
    pub avg_lbd: f64,

    /// The context vector the arm was selected on.
    pub context: Vec<f64>,
}

/// The bandit, the epoch machine, and the records of closed epochs.
pub struct BanditDriver {
    /// The controller.
    pub bandit: LinUcb,

    /// The state of the epoch machine.
    pub phase: EpochPhase,

    /// One record per closed epoch, in order.
    pub records: Vec<EpochRecord>,
}

/// How the active heuristic is chosen during a solve.
pub enum Selector {
    /// The heuristic fixed by the configuration is kept for the full solve.
    Fixed,

    /// A bandit selects the heuristic at each epoch boundary.
    Bandit(BanditDriver),
}

impl BanditDriver {
    /// A fresh driver with an unobserved bandit.
    pub fn new(alpha: f64) -> Self {
        BanditDriver {
            bandit: LinUcb::new(Arm::COUNT, CONTEXT_DIM, alpha),
            phase: EpochPhase::Init,
            records: Vec::default(),
        }
    }

    /// A driver continuing from a bandit trained elsewhere, e.g. on earlier formulas
    /// of a collection.
    pub fn resume(bandit: LinUcb) -> Self {
        BanditDriver {
            bandit,
            phase: EpochPhase::Init,
            records: Vec::default(),
        }
    }

    /// True if an epoch is open and its conflicts have reached the epoch size.
    pub fn boundary_due(&self, conflicts: usize, epoch_size: usize) -> bool {
        match &self.phase {
            EpochPhase::Active { snapshot, .. } => conflicts - snapshot.conflicts >= epoch_size,
            EpochPhase::Init => false,
        }
    }

    /// The learnt-clause count snapshotted when the open epoch started, if one is.
    pub fn additions_at_epoch_start(&self) -> Option<usize> {
        match &self.phase {
            EpochPhase::Active { snapshot, .. } => Some(snapshot.additions),
            EpochPhase::Init => None,
        }
    }

    /// Closes the open epoch, if one is: computes the reward against the epoch's
    /// snapshot, updates the bandit, and appends a record.
    /// Leaves the machine in [Init](EpochPhase::Init).
    pub fn close_epoch(&mut self, counters: &Counters, avg_lbd_now: f64, config: &Config) {
        let phase = std::mem::replace(&mut self.phase, EpochPhase::Init);
        let EpochPhase::Active {
            arm,
            context,
            snapshot,
        } = phase
        else {
            return;
        };

        let conflicts = counters.conflicts - snapshot.conflicts;
        let decisions = counters.decisions - snapshot.decisions;
        let propagations = counters.propagations - snapshot.propagations;

        let epoch = config.epoch_size.max(1) as f64;
        let reward = config.reward_propagation_weight * (propagations as f64 / epoch)
            - config.reward_conflict_weight * (conflicts as f64 / epoch)
            - config.reward_lbd_weight * (avg_lbd_now - snapshot.avg_lbd);
        let reward = reward.clamp(-config.reward_clamp, config.reward_clamp);

        log::info!(
            target: targets::EPOCH,
            "Epoch {} closed: arm {} reward {reward}",
            self.records.len(),
            Arm::from_index(arm),
        );

        self.bandit.update(arm, &context, reward);

        self.records.push(EpochRecord {
            index: self.records.len(),
            arm: Arm::from_index(arm),
            reward,
            conflicts,
            decisions,
            propagations,
            avg_lbd: avg_lbd_now,
            context,
        });
    }

    /// Opens an epoch on the given context: the bandit selects an arm, the counters
    /// are snapshotted, and the selected arm is returned for installation.
    pub fn open_epoch(
        &mut self,
        context: Vec<f64>,
        counters: &Counters,
        additions: usize,
        avg_lbd: f64,
    ) -> usize {
        debug_assert_eq!(context.len(), self.bandit.dim());

        let arm = self.bandit.select(&context);

        log::info!(
            target: targets::EPOCH,
            "Epoch {} opened: arm {}",
            self.records.len(),
            Arm::from_index(arm),
        );

        self.phase = EpochPhase::Active {
            arm,
            context,
            snapshot: EpochSnapshot {
                conflicts: counters.conflicts,
                decisions: counters.decisions,
                propagations: counters.propagations,
                restarts: counters.restarts,
                avg_lbd,
                additions,
            },
        };

        arm
    }
}

impl<R: rand::Rng> GenericContext<R> {
    /// The context vector on the current solver state.
    ///
    /// `additions_at_epoch_start` fixes the learnt-clause count against which the
    /// per-epoch addition feature is computed --- the snapshot of the epoch being
    /// closed, or the current count when no epoch is open.
    pub fn context_features(&self, additions_at_epoch_start: usize) -> Vec<f64> {
        let decision_floor = self.counters.decisions.max(1) as f64;
        let atom_count = self.atom_db.count().saturating_sub(1).max(1) as f64;

        let (max_activity, mean_activity) = self.atom_db.activity_extremes();
        let activity_spread = match mean_activity {
            mean if mean == 0.0 => 1.0,
            mean => max_activity / mean,
        };

        let additions = self.clause_db.addition_count();
        let epoch_additions = additions.saturating_sub(additions_at_epoch_start);

        let clause_count = self.clause_db.clause_count();
        let satisfied_count = self
            .clause_db
            .all_clauses()
            .filter(|clause| self.atom_db.clause_satisfied(clause))
            .count();

        let features = vec![
            self.counters.recent_lbd_average(),
            self.counters.conflicts as f64 / decision_floor,
            self.counters.propagations as f64 / decision_floor,
            self.atom_db.valued_count() as f64 / atom_count,
            activity_spread,
            additions as f64 / (1.0 + additions as f64),
            epoch_additions as f64 / self.config.epoch_size.max(1) as f64,
            self.counters.restarts as f64 / (1.0 + self.counters.conflicts as f64),
            satisfied_count as f64 / clause_count.max(1) as f64,
            self.trail.level() as f64 / atom_count,
            1.0,
        ];

        debug_assert_eq!(features.len(), CONTEXT_DIM);
        features
    }
}

/// Writes epoch records as CSV: the record fields, then each context component.
pub fn write_epoch_csv(
    records: &[EpochRecord],
    writer: &mut impl std::io::Write,
) -> std::io::Result<()> {
    write!(
        writer,
        "epoch_index,arm,reward,conflicts_in_epoch,propagations_in_epoch,decisions_in_epoch,avg_lbd_in_epoch"
    )?;
    for component in 0..CONTEXT_DIM {
        write!(writer, ",c{component}")?;
    }
    writeln!(writer)?;

    for record in records {
        write!(
            writer,
            "{},{},{},{},{},{},{}",
            record.index,
            record.arm,
            record.reward,
            record.conflicts,
            record.propagations,
            record.decisions,
            record.avg_lbd,
        )?;
        for component in &record.context {
            write!(writer, ",{component}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
