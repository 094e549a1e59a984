use magpie_sat::{
    bandit::LinUcb,
    config::{Config, Selection},
    context::Context,
    epoch::{BanditDriver, Selector, CONTEXT_DIM},
    heuristics::Arm,
    reports::Report,
};

/// An unsatisfiable instance with enough conflicts to cross epoch boundaries:
/// the pigeonhole principle on four pigeons and three holes.
fn pigeonhole_clauses() -> Vec<Vec<i32>> {
    let pigeons = 4;
    let holes = 3;
    let atom = |pigeon: i32, hole: i32| (pigeon - 1) * holes + hole;

    let mut clauses = vec![];
    for pigeon in 1..=pigeons {
        clauses.push((1..=holes).map(|hole| atom(pigeon, hole)).collect());
    }
    for hole in 1..=holes {
        for first in 1..=pigeons {
            for second in (first + 1)..=pigeons {
                clauses.push(vec![-atom(first, hole), -atom(second, hole)]);
            }
        }
    }
    clauses
}

fn solved_context(config: Config, clauses: &[Vec<i32>]) -> (Context, Report) {
    let mut ctx = Context::from_config(config);
    for clause in clauses {
        assert!(ctx.add_clause_ints(clause).is_ok());
    }
    let report = ctx.solve().expect("a solve without internal errors");
    (ctx, report)
}

mod laws {
    use super::*;

    #[test]
    fn fixed_seed_runs_are_identical() {
        let config = Config {
            epoch_size: 2,
            restart_interval: 5,
            seed: 7,
            ..Config::default()
        };

        let clauses = pigeonhole_clauses();
        let (first, first_report) = solved_context(config.clone(), &clauses);
        let (second, second_report) = solved_context(config, &clauses);

        assert_eq!(first_report, second_report);

        let first_stats = first.stats();
        let second_stats = second.stats();
        assert_eq!(first_stats.conflicts, second_stats.conflicts);
        assert_eq!(first_stats.decisions, second_stats.decisions);
        assert_eq!(first_stats.propagations, second_stats.propagations);
        assert_eq!(first_stats.restarts, second_stats.restarts);

        let first_arms: Vec<Arm> = first.epoch_records().iter().map(|r| r.arm).collect();
        let second_arms: Vec<Arm> = second.epoch_records().iter().map(|r| r.arm).collect();
        assert_eq!(first_arms, second_arms);
    }

    #[test]
    fn controller_with_unreachable_boundary_matches_pinned_vsids() {
        // A fresh bandit scores every arm identically and ties resolve to the first,
        // so with no boundary ever reached the controller is pinned to vsids.
        let online = Config {
            epoch_size: usize::MAX,
            ..Config::default()
        };
        let pinned = Config {
            selection: Selection::Fixed(Arm::Vsids),
            ..Config::default()
        };

        let clauses = pigeonhole_clauses();
        let (online_ctx, online_report) = solved_context(online, &clauses);
        let (pinned_ctx, pinned_report) = solved_context(pinned, &clauses);

        assert_eq!(online_report, pinned_report);
        assert_eq!(online_ctx.stats().conflicts, pinned_ctx.stats().conflicts);
        assert_eq!(online_ctx.stats().decisions, pinned_ctx.stats().decisions);
        assert_eq!(
            online_ctx.stats().propagations,
            pinned_ctx.stats().propagations
        );
        assert_eq!(online_ctx.stats().restarts, pinned_ctx.stats().restarts);
    }

    #[test]
    fn epoch_accounting() {
        let config = Config {
            epoch_size: 2,
            ..Config::default()
        };

        let (ctx, report) = solved_context(config, &pigeonhole_clauses());
        assert_eq!(report, Report::Unsatisfiable);

        assert_eq!(
            ctx.clause_db.original_count(),
            pigeonhole_clauses().len(),
            "every offered clause is stored"
        );
        assert!(ctx.clause_db.addition_count() >= 1);

        let records = ctx.epoch_records();
        assert!(!records.is_empty());

        // Between two updates exactly epoch_size conflicts pass, bar the epoch open
        // when the solve terminates.
        for record in &records[..records.len() - 1] {
            assert_eq!(record.conflicts, 2, "epoch {} is short", record.index);
        }

        // The deltas of the records sum to the totals on the counters, as the
        // formula contains no unit clauses to propagate before the first epoch.
        let stats = ctx.stats();
        let conflict_sum: usize = records.iter().map(|r| r.conflicts).sum();
        let decision_sum: usize = records.iter().map(|r| r.decisions).sum();
        let propagation_sum: usize = records.iter().map(|r| r.propagations).sum();

        assert_eq!(conflict_sum, stats.conflicts);
        assert_eq!(decision_sum, stats.decisions);
        assert_eq!(propagation_sum, stats.propagations);

        for record in records {
            assert_eq!(record.context.len(), CONTEXT_DIM);
            assert!(record.context.iter().all(|feature| feature.is_finite()));
            assert!(record.reward.is_finite());
            assert!(record.reward.abs() <= 10.0);
        }
    }

    #[test]
    fn counters_only_grow() {
        let config = Config {
            epoch_size: 3,
            ..Config::default()
        };

        let (ctx, _) = solved_context(config, &pigeonhole_clauses());

        // Each record is a delta against the epoch's snapshot, so monotonicity of
        // the counters is visible as every delta being non-negative --- usize makes
        // underflow a panic, and the sums above already bound the totals.
        for record in ctx.epoch_records() {
            assert!(record.conflicts <= ctx.stats().conflicts);
            assert!(record.decisions <= ctx.stats().decisions);
            assert!(record.propagations <= ctx.stats().propagations);
        }
    }
}

mod controller {
    use super::*;

    #[test]
    fn sequential_instances_teach_the_controller() {
        // Three small instances solved in sequence, the bandit carried across them
        // with epochs of a single conflict.
        let instances: [&[&[i32]]; 3] = [
            &[&[1]],
            &[&[1], &[-1]],
            &[&[1, -2], &[-1, 2, 3]],
        ];

        let mut bandit = LinUcb::new(Arm::COUNT, CONTEXT_DIM, 0.3);

        for instance in instances {
            let config = Config {
                epoch_size: 1,
                ..Config::default()
            };
            let mut ctx = Context::from_config(config);
            ctx.selector = Selector::Bandit(BanditDriver::resume(bandit));

            for clause in instance {
                let _ = ctx.add_clause_ints(clause);
            }
            let _ = ctx.solve();

            bandit = match ctx.selector {
                Selector::Bandit(driver) => driver.bandit,
                Selector::Fixed => unreachable!("the context was given a bandit"),
            };
        }

        let observed = Arm::ALL.iter().any(|arm| bandit.b_norm(arm.index()) > 0.0);
        assert!(observed, "no arm was updated with a nonzero reward");
    }

    #[test]
    fn features_are_fixed_dimension_and_finite() {
        let mut ctx = Context::from_config(Config::default());
        for clause in pigeonhole_clauses() {
            assert!(ctx.add_clause_ints(&clause).is_ok());
        }

        let before = ctx.context_features(0);
        assert_eq!(before.len(), CONTEXT_DIM);
        assert!(before.iter().all(|feature| feature.is_finite()));
        assert_eq!(before[CONTEXT_DIM - 1], 1.0);

        assert!(ctx.solve().is_ok());

        let after = ctx.context_features(0);
        assert_eq!(after.len(), CONTEXT_DIM);
        assert!(after.iter().all(|feature| feature.is_finite()));
    }

    #[test]
    fn epoch_csv_has_a_row_per_epoch() {
        let config = Config {
            epoch_size: 2,
            ..Config::default()
        };

        let (ctx, _) = solved_context(config, &pigeonhole_clauses());

        let mut csv = Vec::new();
        ctx.write_epoch_csv(&mut csv).expect("a csv write");
        let csv = String::from_utf8(csv).expect("utf8 csv");

        let mut lines = csv.lines();
        let header = lines.next().expect("a header row");
        assert!(header.starts_with("epoch_index,arm,reward"));
        assert_eq!(header.split(',').count(), 7 + CONTEXT_DIM);

        assert_eq!(lines.count(), ctx.epoch_records().len());
    }

    #[test]
    fn baseline_contexts_record_no_epochs() {
        let config = Config {
            selection: Selection::Fixed(Arm::Jw),
            ..Config::default()
        };

        let (ctx, report) = solved_context(config, &pigeonhole_clauses());
        assert_eq!(report, Report::Unsatisfiable);
        assert!(ctx.epoch_records().is_empty());
    }
}
