/*!
Configuration of a context.

All configuration of a context is contained within a [Config] structure, with
compile-time defaults collected in the [defaults] module.
Some structures clone the parts of the configuration relevant to them when created.
*/

use crate::heuristics::Arm;

/// The representation of atom activity.
pub type Activity = f64;

/// How the branching heuristic for an epoch is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// A contextual bandit selects an arm at each epoch boundary.
    Bandit,

    /// The given arm is used for the full solve, and no controller runs.
    Fixed(Arm),
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// How the branching heuristic is selected.
    pub selection: Selection,

    /// The number of conflicts in an epoch.
    pub epoch_size: usize,

    /// Conflicts since the last restart required to trigger a restart, 0 to disable.
    pub restart_interval: u32,

    /// The exploration constant of the bandit.
    pub alpha: f64,

    /// The seed of the context's random number generator.
    pub seed: u64,

    /// After a conflict the activity bump is multiplied by 1 / decay.
    pub activity_decay: Activity,

    /// The maximum activity bump before all activities are rescaled.
    pub activity_max: Activity,

    /// The factor activities are rescaled by, when rescaled.
    pub activity_rescale: Activity,

    /// How many recent learnt-clause LBDs to keep for telemetry.
    pub lbd_window: usize,

    /// Reward weight on propagations made during an epoch (more is better).
    pub reward_propagation_weight: f64,

    /// Reward weight on conflicts seen during an epoch (more is worse).
    pub reward_conflict_weight: f64,

    /// Reward weight on the change in average LBD across an epoch (higher is worse).
    pub reward_lbd_weight: f64,

    /// Rewards are clamped to ± this bound before an update is made.
    pub reward_clamp: f64,

    /// An optional time limit for a solve.
    pub time_limit: Option<std::time::Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            selection: Selection::Bandit,
            epoch_size: defaults::EPOCH_SIZE,
            restart_interval: defaults::RESTART_INTERVAL,
            alpha: defaults::ALPHA,
            seed: defaults::SEED,
            activity_decay: defaults::ACTIVITY_DECAY,
            activity_max: defaults::ACTIVITY_MAX,
            activity_rescale: defaults::ACTIVITY_RESCALE,
            lbd_window: defaults::LBD_WINDOW,
            reward_propagation_weight: defaults::REWARD_PROPAGATION_WEIGHT,
            reward_conflict_weight: defaults::REWARD_CONFLICT_WEIGHT,
            reward_lbd_weight: defaults::REWARD_LBD_WEIGHT,
            reward_clamp: defaults::REWARD_CLAMP,
            time_limit: None,
        }
    }
}

/// Default values, used in the default configuration.
pub mod defaults {
    use super::Activity;

    pub const EPOCH_SIZE: usize = 50;
    pub const RESTART_INTERVAL: u32 = 200;
    pub const ALPHA: f64 = 0.3;
    pub const SEED: u64 = 0;

    pub const ACTIVITY_DECAY: Activity = 0.95;
    pub const ACTIVITY_MAX: Activity = 1e100;
    pub const ACTIVITY_RESCALE: Activity = 1e-100;

    pub const LBD_WINDOW: usize = 100;

    pub const REWARD_PROPAGATION_WEIGHT: f64 = 1e-3;
    pub const REWARD_CONFLICT_WEIGHT: f64 = 1e-3;
    pub const REWARD_LBD_WEIGHT: f64 = 1e-2;
    pub const REWARD_CLAMP: f64 = 10.0;
}
