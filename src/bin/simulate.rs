//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 200 Classic runs on Normal
//!   cargo run --bin simulate -- -m chaos -d hard      # Chaos on Hard
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use code_runner::core::Difficulty;
use code_runner::modes::GameMode;
use code_runner::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CODE RUNNER BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Mode:           {}", config.game_mode.name());
    println!("  Difficulty:     {}", config.difficulty.name());
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Reaction:       {}", config.reaction_distance);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        let next = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                if let Some(value) = next {
                    config.num_runs = value.parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-m" | "--mode" => {
                if let Some(mode) = next.and_then(|v| GameMode::parse(v)) {
                    config.game_mode = mode;
                    i += 1;
                }
            }
            "-d" | "--difficulty" => {
                if let Some(difficulty) = next.and_then(|v| Difficulty::parse(v)) {
                    config.difficulty = difficulty;
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(value) = next {
                    config.seed = value.parse().ok();
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if let Some(value) = next {
                    config.max_frames_per_run = value.parse().unwrap_or(config.max_frames_per_run);
                    i += 1;
                }
            }
            "-r" | "--reaction" => {
                if let Some(value) = next {
                    config.reaction_distance = value.parse().unwrap_or(config.reaction_distance);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig::quick(config.game_mode, config.difficulty);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Code Runner Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Number of runs (default: 200)");
    println!("    -m, --mode <MODE>       classic, sprint, debug or chaos");
    println!("    -d, --difficulty <D>    easy, normal, hard or expert");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -f, --frames <F>        Max frames per run (default: 36000)");
    println!("    -r, --reaction <PX>     Bot jump distance (default: 110)");
    println!("    -v, --verbose           Per-run output");
    println!("    --json                  Save JSON report");
    println!("    --quick                 20 seeded runs, 3 minutes each");
    println!("    -h, --help              Show this help");
}
