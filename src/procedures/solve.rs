/*!
Determines the satisfiability of the formula in a context.

# Overview

The solve loop interleaves [apply_consequences] and [decisions](decision), with
conflict-derived clauses sending the loop back to an earlier valuation:

```none
          +---------------+
  +-------| make_decision |
  |       +---------------+
  |               ⌃
  |               |
  |               | if there is no conflict, and the valuation is partial
  |               |
  |               |              +-----> satisfiable, if the valuation is full
  ⌄   +--------------------+     |
--+-->| apply_consequences |-----+
  ⌃   +--------------------+     |
  |               |              +-----> unsatisfiable, on a fundamental conflict
  |               |
  |               | if a clause is added to the formula
  |               |
  |               ⌄
  |   +-----------------------+
  +---| queue asserted literal |
      +-----------------------+
```

After each conflict two further checks run:
- If the conflicts since the last restart have reached the restart interval, all
  decisions are forgotten (the learnt clauses remain).
- If the conflicts of the open epoch have reached the epoch size, the
  [epoch machine](crate::epoch) closes the epoch --- rewarding the controller ---
  and opens the next with a freshly selected heuristic.

Restarts do not end an epoch.

When the branching heuristic is selected online the first epoch opens as the loop
starts, and whichever epoch is open when the loop breaks is closed with a final
update, so every solve teaches the controller.

[apply_consequences]: crate::procedures::apply_consequences
[decision]: crate::procedures::decision

# Termination

- Unsatisfiable, on a conflict with no decision made, or when the asserted literal of
  a learnt unit clause conflicts with the root-level valuation.
- Satisfiable, when every atom has a value --- as consequences are exhausted before
  every decision, a complete valuation is consistent with every clause.
- Unknown, when the configured time limit expires.
*/

use crate::{
    context::{ContextState, GenericContext},
    db::{atom::AtomValue, consequence_q::QPosition, ClauseKey},
    epoch::{EpochPhase, Selector},
    misc::log::targets::{self},
    procedures::{apply_consequences::ApplyConsequencesOk, decision::DecisionOk},
    reports::Report,
    types::err::{self},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Determines the satisfiability of the formula in the context.
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        match self.state {
            ContextState::Satisfiable | ContextState::Unsatisfiable => {
                return Ok(self.report());
            }

            ContextState::Configuration | ContextState::Input | ContextState::Solving => {
                self.state = ContextState::Solving;
            }
        }

        let timer = std::time::Instant::now();

        self.open_initial_epoch();

        'solve_loop: loop {
            self.counters.iterations += 1;
            log::trace!("Iteration {}", self.counters.iterations);

            self.counters.time = timer.elapsed();
            if let Some(limit) = self.config.time_limit {
                if self.counters.time > limit {
                    return Ok(Report::Unknown);
                }
            }

            match self.apply_consequences()? {
                // Non-conflict variants, which break or continue the solve loop.
                ApplyConsequencesOk::FundamentalConflict => break 'solve_loop,

                ApplyConsequencesOk::Exhausted => {
                    //
                    match self.make_decision() {
                        DecisionOk::Literal(decision) => {
                            self.trail.push_fresh_level();
                            log::info!("Decided on {decision} at level {}", self.trail.level());

                            match self.q_decision(decision) {
                                AtomValue::NotSet => {}
                                _ => panic!("! Decision on a valued atom"),
                            }

                            continue 'solve_loop;
                        }

                        DecisionOk::Exhausted => break 'solve_loop,
                    }
                }

                // Conflict variants, which continue to the remaining contents of the
                // loop: the restart check and the epoch check.
                ApplyConsequencesOk::UnitClause { literal } => {
                    let q_result =
                        self.q_consequence(literal, ClauseKey::Unit(literal), QPosition::Front);

                    match q_result {
                        AtomValue::NotSet | AtomValue::Same => {}

                        AtomValue::Different => {
                            self.state = ContextState::Unsatisfiable;
                            break 'solve_loop;
                        }
                    };
                }

                ApplyConsequencesOk::AssertingClause { key, literal } => {
                    match self.q_consequence(literal, key, QPosition::Front) {
                        AtomValue::NotSet | AtomValue::Same => {}

                        AtomValue::Different => {
                            self.state = ContextState::Unsatisfiable;
                            break 'solve_loop;
                        }
                    };
                }
            }

            if self.config.restart_interval > 0
                && self.counters.fresh_conflicts >= self.config.restart_interval
            {
                self.backjump(0);
                self.counters.restarts += 1;
                self.counters.fresh_conflicts = 0;
                self.heuristics.notify_restart();
                log::info!(target: targets::BACKJUMP, "Restart {}", self.counters.restarts);
            }

            self.epoch_step();
        }

        self.close_final_epoch();
        self.counters.time = timer.elapsed();

        Ok(self.report())
    }

    /// Opens the first epoch, when the heuristic is selected online and no epoch has
    /// ever been opened.
    fn open_initial_epoch(&mut self) {
        match &self.selector {
            Selector::Bandit(driver) if matches!(driver.phase, EpochPhase::Init) => {}
            _ => return,
        }

        let additions = self.clause_db.addition_count();
        let features = self.context_features(additions);
        let avg_lbd = self.counters.recent_lbd_average();

        if let Selector::Bandit(driver) = &mut self.selector {
            let arm = driver.open_epoch(features, &self.counters, additions, avg_lbd);
            self.heuristics.set_active(arm);
        }
    }

    /// Closes the open epoch and opens the next, when the conflicts of the open
    /// epoch have reached the epoch size.
    fn epoch_step(&mut self) {
        let due = match &self.selector {
            Selector::Bandit(driver) => {
                driver.boundary_due(self.counters.conflicts, self.config.epoch_size)
            }
            Selector::Fixed => false,
        };

        if !due {
            return;
        }

        let additions = self.clause_db.addition_count();
        let epoch_start_additions = match &self.selector {
            Selector::Bandit(driver) => driver.additions_at_epoch_start().unwrap_or(additions),
            Selector::Fixed => additions,
        };

        let features = self.context_features(epoch_start_additions);
        let avg_lbd = self.counters.recent_lbd_average();

        if let Selector::Bandit(driver) = &mut self.selector {
            driver.close_epoch(&self.counters, avg_lbd, &self.config);
            let arm = driver.open_epoch(features, &self.counters, additions, avg_lbd);
            self.heuristics.set_active(arm);
        }
    }

    /// Closes the open epoch, if one is, with a final update to the controller.
    fn close_final_epoch(&mut self) {
        let avg_lbd = self.counters.recent_lbd_average();

        if let Selector::Bandit(driver) = &mut self.selector {
            driver.close_epoch(&self.counters, avg_lbd, &self.config);
        }
    }
}
