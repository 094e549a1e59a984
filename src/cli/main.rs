#![allow(clippy::collapsible_if)]

use std::{fs::File, io::BufReader};

use magpie_sat::{context::Context, reports::Report, types::err};

mod args;

fn main() {
    env_logger::init();

    let matches = args::cli().get_matches();
    let (config, options) = args::config_from_matches(&matches);

    let mut ctx = Context::from_config(config);

    let file = match File::open(&options.cnf) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("c Failed to open CNF file {:?}: {error}", options.cnf);
            std::process::exit(0);
        }
    };

    match ctx.read_dimacs(BufReader::new(&file)) {
        Ok(info) => {
            if let (Some(expected), added) = (info.expected_clauses, info.added_clauses) {
                if expected != added {
                    eprintln!("c Expected {expected} clauses, read {added}");
                }
            }
        }

        // An unsatisfiable formula may be identified during the parse, e.g. due to
        // conflicting unit clauses, in which case a solve is a formality.
        Err(err::ErrorKind::Build(err::BuildError::Unsatisfiable))
        | Err(err::ErrorKind::ClauseDB(err::ClauseDBError::EmptyClause)) => {
            println!("s UNSATISFIABLE");
            std::process::exit(20);
        }

        Err(error) => {
            eprintln!("c Error loading DIMACS: {error:?}");
            std::process::exit(0);
        }
    };

    let report = match ctx.solve() {
        Ok(report) => report,
        Err(error) => {
            eprintln!("c Context error: {error:?}");
            std::process::exit(0);
        }
    };

    println!("c {}", ctx.stats());

    if let Some(path) = &options.epoch_log {
        match File::create(path) {
            Ok(mut log_file) => {
                if let Err(error) = ctx.write_epoch_csv(&mut log_file) {
                    eprintln!("c Failed to write epoch log: {error}");
                }
            }
            Err(error) => eprintln!("c Failed to create epoch log {path:?}: {error}"),
        }
    }

    match report {
        Report::Satisfiable => {
            if options.show_valuation {
                println!("v {} 0", ctx.valuation_string());
            }
            println!("s SATISFIABLE");
            std::process::exit(10)
        }

        Report::Unsatisfiable => {
            println!("s UNSATISFIABLE");
            std::process::exit(20)
        }

        Report::Unknown => {
            eprintln!("c Time limit reached before a determination");
            println!("s UNKNOWN");
            std::process::exit(0)
        }
    }
}
