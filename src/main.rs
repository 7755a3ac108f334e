mod logging;
mod models;
mod scenario;
mod simulation;

use clap::{Arg, ArgMatches, Command, value_parser};
use logging::{LogConfig, LogOutput};
use models::{math_utils, *};
use scenario::ScenarioConfig;
use simulation::SimulationEngine;
use tracing::error;

fn main() {
    let matches = build_cli().get_matches();

    let verbose_level = matches.get_count("verbose");

    if let Err(e) = logging::init_logging(log_config(&matches, verbose_level)) {
        eprintln!("failed to initialize logging: {}", e);
    }

    if let Some(readings) = matches.get_many::<f64>("robust_distance") {
        let readings: Vec<f64> = readings.copied().collect();
        print_robust_distance(&readings);
        return;
    }

    if matches.get_flag("demo") {
        println!("=== Demonstration ===");
        if let Err(e) = run_demonstration() {
            error!("demonstration failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Some(scenario_path) = matches.get_one::<String>("scenario") {
        let ground = matches.get_one::<GroundType>("ground").copied();
        match run_scenario(scenario_path, matches.get_flag("info"), ground, verbose_level) {
            Ok(_) => {
                if verbose_level > 0 {
                    println!("Mission finished.");
                }
            }
            Err(e) => {
                error!("{}", e);
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        show_default_help();
    }
}

fn build_cli() -> Command {
    Command::new("robofield")
        .version("0.1.0")
        .about("Robot field simulation")
        .long_about("Robots on a 2D field walk an ordered route of named targets,\n\
                     one axis at a time, one robot after another.")
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("FILE")
                .help("Mission file (.yaml) to run"),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("Print the scenario summary and exit")
                .conflicts_with("demo"),
        )
        .arg(
            Arg::new("demo")
                .short('d')
                .long("demo")
                .action(clap::ArgAction::SetTrue)
                .help("Run the built-in demonstration")
                .conflicts_with("info"),
        )
        .arg(
            Arg::new("ground")
                .short('g')
                .long("ground")
                .value_name("R|H|S|O")
                .value_parser(value_parser!(GroundType))
                .help("Override the ground type of the scenario"),
        )
        .arg(
            Arg::new("robust_distance")
                .long("robust-distance")
                .num_args(3)
                .value_names(["A", "B", "C"])
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Print the robust distance of three readings and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("Verbosity (-v: progress, -vv: debug, -vvv: trace)"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("log_output")
                .long("log-output")
                .value_name("TARGET")
                .value_parser(value_parser!(LogOutput))
                .help("Log output (console, file, both)"),
        )
}

fn log_config(matches: &ArgMatches, verbose_level: u8) -> LogConfig {
    let mut config = LogConfig::default();
    config.level = match matches.get_one::<String>("log_level") {
        Some(level) => logging::parse_log_level(level),
        None => logging::level_for_verbosity(verbose_level),
    };
    if let Some(output) = matches.get_one::<LogOutput>("log_output") {
        config.output = *output;
    }
    config
}

fn print_robust_distance(readings: &[f64]) {
    let [a, b, c] = readings else {
        eprintln!("error: exactly three readings are required");
        std::process::exit(2);
    };
    match math_utils::robust_distance(*a, *b, *c) {
        Some(distance) => println!("{}", distance),
        None => println!("no consistent reading"),
    }
}

/// 2台のロボットと3地点の経路でフィールドを実行する
fn run_demonstration() -> Result<Field, FieldError> {
    let mut field = Field::new();
    field.add_robot(Robot::new(Vector2::new(0.0, 0.0)));
    field.add_robot(Robot::new(Vector2::new(1.0, 2.0)));

    let mut route = Route::new();
    route.add_target(Target::new(Vector2::new(2.0, 0.0), "Point A"));
    route.add_target(Target::new(Vector2::new(2.0, 3.0), "Point B"));
    route.add_target(Target::new(Vector2::new(5.0, 3.0), "Point C"));
    for target in route.targets() {
        println!("{}", target);
    }
    field.set_route(route);

    field.run()?;
    for line in field.state_lines() {
        println!("{}", line);
    }

    Ok(field)
}

/// シナリオファイルを読み込んで実行
fn run_scenario(
    scenario_path: &str,
    info_only: bool,
    ground: Option<GroundType>,
    verbose_level: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = ScenarioConfig::from_file(scenario_path)?;

    if verbose_level > 0 {
        println!("Loaded scenario: {}", scenario_path);
    }

    if info_only {
        scenario.print_summary();
        return Ok(());
    }

    scenario.print_summary();
    println!();

    let mut simulation = SimulationEngine::new(scenario, verbose_level);
    if let Some(ground) = ground {
        simulation = simulation.with_ground(ground);
    }
    simulation.initialize()?;

    let report = simulation.run()?;
    println!();
    report.print();

    Ok(())
}

fn show_default_help() {
    println!("Usage:");
    println!("  robofield [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --scenario <FILE>           Run a mission file");
    println!("  -i, --info                      Print scenario summary only");
    println!("  -d, --demo                      Run the built-in demonstration");
    println!("  -g, --ground <R|H|S|O>          Override the ground type");
    println!("      --robust-distance <A> <B> <C>");
    println!("                                  Robust distance of three readings");
    println!("  -v, --verbose                   Verbose output (repeat for more)");
    println!("  -h, --help                      Show this help");
    println!();
    println!("Examples:");
    println!("  robofield -s scenarios/demo_mission.yaml");
    println!("  robofield -s scenarios/demo_mission.yaml -g S -v");
    println!("  robofield --robust-distance 2.0 2.1 15.0");
    println!("  robofield --demo");
}
