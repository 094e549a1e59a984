use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use magpie_sat::{
    config::{defaults, Config, Selection},
    heuristics::Arm,
};

/// Options of the run itself, rather than of the solver.
pub struct RunOptions {
    /// The DIMACS CNF file to solve.
    pub cnf: PathBuf,

    /// Where to write the per-epoch CSV log, if anywhere.
    pub epoch_log: Option<PathBuf>,

    /// Display the valuation on finding the formula satisfiable.
    pub show_valuation: bool,
}

pub fn cli() -> Command {
    Command::new("magpie_sat")
        .about("Determines whether a formula is satisfiable or unsatisfiable, learning its branching heuristic online")

        .arg(Arg::new("cnf")
            .long("cnf")
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .required(true)
            .num_args(1)
            .help("The DIMACS form CNF file to solve."))

        .arg(Arg::new("mode")
            .long("mode")
            .value_name("MODE")
            .value_parser(["rl", "baseline"])
            .default_value("rl")
            .num_args(1)
            .help("Whether the branching heuristic is selected online (rl) or pinned (baseline)."))

        .arg(Arg::new("heuristic")
            .long("heuristic")
            .value_name("HEURISTIC")
            .value_parser(clap::builder::ValueParser::new(arm_parser))
            .required(false)
            .num_args(1)
            .help("The heuristic to pin, in baseline mode.
Default: vsids

  - vsids : branch on the most active atom
  - jw    : branch on the greatest Jeroslow-Wang literal weight
  - dlis  : branch on the most frequent literal of the unsatisfied clauses
  - random: branch on the first unvalued atom, with a random phase"))

        .arg(Arg::new("epoch")
            .long("epoch")
            .value_name("CONFLICTS")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The number of conflicts in an epoch.
Default: {}", defaults::EPOCH_SIZE)))

        .arg(Arg::new("restart")
            .long("restart")
            .value_name("CONFLICTS")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help(format!("Conflicts between restarts, 0 to disable restarts.
Default: {}", defaults::RESTART_INTERVAL)))

        .arg(Arg::new("alpha")
            .long("alpha")
            .value_name("ALPHA")
            .value_parser(value_parser!(f64))
            .required(false)
            .num_args(1)
            .help(format!("The exploration constant of the bandit.
Default: {}", defaults::ALPHA)))

        .arg(Arg::new("seed")
            .long("seed")
            .value_name("SEED")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help(format!("The seed of the solver's random number generator.
Default: {}", defaults::SEED)))

        .arg(Arg::new("timeout")
            .long("timeout")
            .short('t')
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("Time limit for the solve in seconds.
Default: No limit"))

        .arg(Arg::new("epoch_log")
            .long("epoch-log")
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .num_args(1)
            .help("Write a CSV log with one row per epoch."))

        .arg(Arg::new("valuation")
            .short('v')
            .long("valuation")
            .action(ArgAction::SetTrue)
            .help("Display valuation on finding the formula satisfiable."))
}

/// Maps parsed arguments onto a solver configuration and run options.
pub fn config_from_matches(matches: &ArgMatches) -> (Config, RunOptions) {
    let mut config = Config::default();

    let pinned_arm = matches.get_one::<Arm>("heuristic").copied();
    config.selection = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("baseline") => Selection::Fixed(pinned_arm.unwrap_or(Arm::Vsids)),
        _ => Selection::Bandit,
    };

    if let Some(epoch) = matches.get_one::<usize>("epoch") {
        config.epoch_size = *epoch;
    }

    if let Some(restart) = matches.get_one::<u32>("restart") {
        config.restart_interval = *restart;
    }

    if let Some(alpha) = matches.get_one::<f64>("alpha") {
        config.alpha = *alpha;
    }

    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = *seed;
    }

    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config.time_limit = Some(std::time::Duration::from_secs(*seconds));
    }

    let options = RunOptions {
        cnf: matches
            .get_one::<PathBuf>("cnf")
            .expect("cnf is a required argument")
            .clone(),
        epoch_log: matches.get_one::<PathBuf>("epoch_log").cloned(),
        show_valuation: matches.get_flag("valuation"),
    };

    (config, options)
}

fn arm_parser(arg: &str) -> Result<Arm, std::io::Error> {
    arg.parse::<Arm>()
        .map_err(|message| std::io::Error::new(std::io::ErrorKind::NotFound, message))
}
