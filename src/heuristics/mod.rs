/*!
The family of branching heuristics.

Each heuristic chooses, on request, a literal for a fresh decision --- or nothing, if
every atom is valued --- and may in addition react to learnt clauses and restarts.
The family is a closed set of variants dispatched through this small capability, so
switching the active heuristic mid-solve is a single index update.

Heuristics read the solver state handed to them in [decide](Heuristic::decide), and
must not touch the trail or watch lists.
The only mutations permitted are of heuristic-owned state (the weights of
[Jeroslow–Wang](jw::JeroslowWang)) and of the activity heap (popped by
[VSIDS](vsids::Vsids), which is how the most active atom is taken).

# Polarity

A decision pairs a chosen atom with a value.
When the chosen atom has held a value before, every heuristic re-uses it (phase
saving).
Otherwise the heuristic's natural sign applies: false for VSIDS, the sign of the
winning literal for Jeroslow–Wang and DLIS, and a draw from the context's seeded rng
for random decisions.
*/

pub mod dlis;
pub mod jw;
pub mod random;
pub mod vsids;

use crate::{
    db::{atom::AtomDB, clause::ClauseDB},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// A branching heuristic, from the perspective of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arm {
    /// Maximum VSIDS activity.
    Vsids,

    /// Maximum Jeroslow–Wang literal weight.
    Jw,

    /// Dynamic largest individual sum.
    Dlis,

    /// The first unvalued atom, with a random phase.
    Random,
}

impl Arm {
    /// A count of all arms.
    pub const COUNT: usize = 4;

    /// All arms, in index order.
    pub const ALL: [Arm; Arm::COUNT] = [Arm::Vsids, Arm::Jw, Arm::Dlis, Arm::Random];

    /// The index of the arm, as used by the controller.
    pub fn index(self) -> usize {
        match self {
            Arm::Vsids => 0,
            Arm::Jw => 1,
            Arm::Dlis => 2,
            Arm::Random => 3,
        }
    }

    /// The arm at the given index.
    ///
    /// Panics if the index does not index an arm.
    pub fn from_index(index: usize) -> Arm {
        match index {
            0 => Arm::Vsids,
            1 => Arm::Jw,
            2 => Arm::Dlis,
            3 => Arm::Random,
            _ => panic!("! No arm at index {index}"),
        }
    }

    /// The name of the arm.
    pub fn name(self) -> &'static str {
        match self {
            Arm::Vsids => "vsids",
            Arm::Jw => "jw",
            Arm::Dlis => "dlis",
            Arm::Random => "random",
        }
    }
}

impl std::fmt::Display for Arm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Arm {
    type Err = String;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "vsids" => Ok(Arm::Vsids),
            "jw" => Ok(Arm::Jw),
            "dlis" => Ok(Arm::Dlis),
            "random" => Ok(Arm::Random),
            _ => Err(format!("Unknown heuristic: {string}")),
        }
    }
}

/// A heuristic instance, dispatched by variant.
pub enum Heuristic {
    Vsids(vsids::Vsids),
    Jw(jw::JeroslowWang),
    Dlis(dlis::Dlis),
    Random(random::RandomChoice),
}

impl Heuristic {
    /// Chooses a literal for a fresh decision, or None if every atom is valued.
    pub fn decide<R: rand::Rng>(
        &mut self,
        atom_db: &mut AtomDB,
        clause_db: &ClauseDB,
        rng: &mut R,
    ) -> Option<CLiteral> {
        match self {
            Heuristic::Vsids(heuristic) => heuristic.decide(atom_db),
            Heuristic::Jw(heuristic) => heuristic.decide(atom_db, clause_db),
            Heuristic::Dlis(heuristic) => heuristic.decide(atom_db, clause_db),
            Heuristic::Random(heuristic) => heuristic.decide(atom_db, rng),
        }
    }

    /// Notification of a clause learnt during a solve.
    pub fn on_learnt(&mut self, clause: &[CLiteral]) {
        match self {
            Heuristic::Jw(heuristic) => heuristic.on_learnt(clause),
            _ => {}
        }
    }

    /// Notification of a restart.
    pub fn on_restart(&mut self) {}
}

/// All heuristics of a context, of which one is active.
pub struct HeuristicBank {
    /// One heuristic per arm, in arm-index order.
    arms: [Heuristic; Arm::COUNT],

    /// The index of the active heuristic.
    active: usize,
}

impl Default for HeuristicBank {
    fn default() -> Self {
        HeuristicBank {
            arms: [
                Heuristic::Vsids(vsids::Vsids),
                Heuristic::Jw(jw::JeroslowWang::default()),
                Heuristic::Dlis(dlis::Dlis),
                Heuristic::Random(random::RandomChoice),
            ],
            active: 0,
        }
    }
}

impl HeuristicBank {
    /// Installs the heuristic at the given arm index as active.
    pub fn set_active(&mut self, arm: usize) {
        self.active = arm;
    }

    /// The active heuristic, as an arm.
    pub fn active_arm(&self) -> Arm {
        Arm::from_index(self.active)
    }

    /// Chooses a literal for a fresh decision with the active heuristic.
    pub fn decide<R: rand::Rng>(
        &mut self,
        atom_db: &mut AtomDB,
        clause_db: &ClauseDB,
        rng: &mut R,
    ) -> Option<CLiteral> {
        self.arms[self.active].decide(atom_db, clause_db, rng)
    }

    /// Notifies every heuristic of a learnt clause.
    pub fn notify_learnt(&mut self, clause: &[CLiteral]) {
        for heuristic in self.arms.iter_mut() {
            heuristic.on_learnt(clause);
        }
    }

    /// Notifies every heuristic of a restart.
    pub fn notify_restart(&mut self) {
        for heuristic in self.arms.iter_mut() {
            heuristic.on_restart();
        }
    }
}

/// The decision literal for `atom`: the saved phase, if one exists, and the
/// heuristic's natural sign otherwise.
pub(crate) fn phased(atom_db: &AtomDB, atom: Atom, natural: bool) -> CLiteral {
    match atom_db.previous_value_of(atom) {
        Some(value) => CLiteral::new(atom, value),
        None => CLiteral::new(atom, natural),
    }
}
