use magpie_sat::{
    builder::ClauseOk,
    config::{Config, Selection},
    context::Context,
    heuristics::Arm,
    reports::Report,
    structures::literal::Literal,
};

/// A context pinned to the given heuristic, with no controller.
fn baseline(arm: Arm) -> Context {
    let config = Config {
        selection: Selection::Fixed(arm),
        ..Config::default()
    };
    Context::from_config(config)
}

/// Asserts the valuation of the context satisfies every clause.
fn assert_model(ctx: &Context, clauses: &[Vec<i32>]) {
    for clause in clauses {
        let satisfied = clause
            .iter()
            .any(|&int| ctx.value_of(int.unsigned_abs()) == Some(int > 0));
        assert!(satisfied, "clause {clause:?} is unsatisfied");
    }
}

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(ctx.add_clause_ints(&[1]), Ok(ClauseOk::Added));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        assert_eq!(ctx.value_of(1), Some(true));
        assert_eq!(ctx.stats().conflicts, 0);
        assert_eq!(ctx.stats().decisions, 0);
    }

    #[test]
    fn conflicting_units() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause_ints(&[1]).is_ok());
        assert!(ctx.add_clause_ints(&[-1]).is_err());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.stats().conflicts <= 1);
    }

    #[test]
    fn two_clause_satisfiable() {
        let clauses = vec![vec![1, -2], vec![-1, 2, 3]];
        let mut ctx = Context::from_config(Config::default());

        for clause in &clauses {
            assert!(ctx.add_clause_ints(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        for atom in 1..=3 {
            assert!(ctx.value_of(atom).is_some());
        }
        assert_model(&ctx, &clauses);
        assert_eq!(ctx.stats().conflicts, 0);
    }

    #[test]
    fn full_sign_expansion_unsat() {
        // Every clause of three literals over three atoms, with all sign patterns.
        let mut clauses = vec![];
        for signs in 0..8_i32 {
            let sign = |bit: i32, atom: i32| match (signs >> bit) & 1 {
                0 => atom,
                _ => -atom,
            };
            clauses.push(vec![sign(0, 1), sign(1, 2), sign(2, 3)]);
        }

        let mut ctx = Context::from_config(Config::default());
        for clause in &clauses {
            assert!(ctx.add_clause_ints(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.stats().conflicts >= 1);

        // Analysis bumps the activity of the atoms it resolves over.
        assert!((1..=3).any(|atom| ctx.atom_db.activity_of(atom) > 0.0));
    }

    #[test]
    fn duplicates_collapse() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(ctx.add_clause_ints(&[1, 1, 2, 2]), Ok(ClauseOk::Added));

        let stored = ctx
            .clause_db
            .all_nonunit_clauses()
            .next()
            .expect("a stored clause");
        assert_eq!(stored.size(), 2);
    }

    #[test]
    fn tautology_skip() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(ctx.add_clause_ints(&[1, -2, -1]), Ok(ClauseOk::Skipped));
        assert!(ctx.clause_db.all_nonunit_clauses().next().is_none());
    }

    #[test]
    fn empty_clause_is_sticky_unsat() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause_ints(&[]).is_err());
        assert_eq!(ctx.add_clause_ints(&[1]), Ok(ClauseOk::Skipped));

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.stats().conflicts, 0);
    }
}

/// The pigeonhole principle on three pigeons and two holes, in six atoms.
fn pigeonhole_clauses() -> Vec<Vec<i32>> {
    // Atom 2(p - 1) + h: pigeon p sits in hole h.
    let mut clauses = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
    for hole in [1, 2] {
        let sitters = [hole, 2 + hole, 4 + hole];
        for first in 0..3 {
            for second in (first + 1)..3 {
                clauses.push(vec![-sitters[first], -sitters[second]]);
            }
        }
    }
    clauses
}

mod pigeonhole {
    use super::*;

    #[test]
    fn unsat_with_controller() {
        let mut ctx = Context::from_config(Config::default());
        for clause in pigeonhole_clauses() {
            assert!(ctx.add_clause_ints(&clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.stats().conflicts >= 1);
    }

    #[test]
    fn unsat_under_every_pinned_heuristic() {
        for arm in Arm::ALL {
            let mut ctx = baseline(arm);
            for clause in pigeonhole_clauses() {
                assert!(ctx.add_clause_ints(&clause).is_ok());
            }

            assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable), "pinned to {arm}");
        }
    }
}

/// A satisfiable instance which forces some search: a chain of equivalences with a
/// few side constraints, some of them long enough to exercise watch updates.
fn chain_clauses(length: i32) -> Vec<Vec<i32>> {
    let mut clauses = vec![];
    for atom in 1..length {
        clauses.push(vec![-atom, atom + 1]);
        clauses.push(vec![atom, -(atom + 1)]);
    }
    clauses.push(vec![1, length]);
    clauses.push(vec![1, length / 2, length]);
    clauses.push(vec![-1, -(length / 2), length]);
    clauses
}

mod models {
    use super::*;

    #[test]
    fn every_pinned_heuristic_finds_a_model() {
        let clauses = chain_clauses(12);

        for arm in Arm::ALL {
            let mut ctx = baseline(arm);
            for clause in &clauses {
                assert!(ctx.add_clause_ints(clause).is_ok());
            }

            assert_eq!(ctx.solve(), Ok(Report::Satisfiable), "pinned to {arm}");
            assert_model(&ctx, &clauses);
        }
    }

    #[test]
    fn controller_finds_a_model() {
        let clauses = chain_clauses(12);

        let mut ctx = Context::from_config(Config::default());
        for clause in &clauses {
            assert!(ctx.add_clause_ints(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_model(&ctx, &clauses);
    }
}

mod invariants {
    use super::*;

    /// Watched literals sit at positions 0 and 1 of a long clause, with the clause
    /// in the watch lists of exactly those two literals.
    fn assert_watch_invariant(ctx: &Context) {
        for stored in ctx.clause_db.all_nonunit_clauses() {
            if stored.size() < 3 {
                continue;
            }

            for (position, literal) in stored.literals().iter().enumerate() {
                let watchers = ctx
                    .atom_db
                    .long_watchers(literal.atom(), literal.polarity());
                let watched = watchers.iter().filter(|key| *key == stored.key()).count();

                match position {
                    0 | 1 => assert_eq!(watched, 1, "{stored} lost a watch"),
                    _ => assert_eq!(watched, 0, "{stored} has an extra watch"),
                }
            }
        }
    }

    #[test]
    fn watches_after_a_sat_solve() {
        let clauses = chain_clauses(8);
        let mut ctx = Context::from_config(Config::default());
        for clause in &clauses {
            assert!(ctx.add_clause_ints(clause).is_ok());
        }
        assert!(ctx.solve().is_ok());

        assert_watch_invariant(&ctx);
    }

    #[test]
    fn watches_after_an_unsat_solve() {
        let mut ctx = Context::from_config(Config::default());
        for signs in 0..8_i32 {
            let sign = |bit: i32, atom: i32| match (signs >> bit) & 1 {
                0 => atom,
                _ => -atom,
            };
            let _ = ctx.add_clause_ints(&[sign(0, 1), sign(1, 2), sign(2, 3)]);
        }
        assert!(ctx.solve().is_ok());

        assert_watch_invariant(&ctx);
    }

    #[test]
    fn trail_holds_each_atom_once() {
        let clauses = chain_clauses(10);
        let mut ctx = Context::from_config(Config::default());
        for clause in &clauses {
            assert!(ctx.add_clause_ints(clause).is_ok());
        }
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let mut seen = std::collections::HashSet::new();
        for assignment in ctx.trail.assignments() {
            assert!(seen.insert(assignment.literal.atom()), "atom repeated on the trail");
            assert_eq!(
                ctx.value_of(assignment.literal.atom()),
                Some(assignment.literal.polarity()),
                "trail literal does not hold"
            );
        }
    }
}
