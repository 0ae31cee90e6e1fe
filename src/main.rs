//! Genetic FSM CLI - Run an organism from JSON configuration.

use std::fs;
use std::path::PathBuf;

use genetic_fsm::{GenomeRng, OrganismConfig, save_to_path};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [steps] [--save <path>]", args[0]);
        eprintln!();
        eprintln!("Run an evolved state machine from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json    Path to organism configuration file");
        eprintln!("  steps          Number of state updates (default: 100)");
        eprintln!("  --save <path>  Write the organism record after the run");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let mut steps: u64 = 100;
    let mut save_path: Option<PathBuf> = None;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--save" {
            match rest.next() {
                Some(path) => save_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--save requires a path");
                    std::process::exit(1);
                }
            }
        } else {
            steps = arg.parse().unwrap_or_else(|e| {
                eprintln!("Invalid step count {:?}: {}", arg, e);
                std::process::exit(1);
            });
        }
    }

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: OrganismConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let mut organism = config.build().unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });

    let mut rng = match config.random_seed {
        Some(seed) => GenomeRng::new(seed),
        None => GenomeRng::random(),
    };

    println!("Genetic FSM");
    println!("===========");
    println!(
        "States: {} | Sensors: {}",
        organism.state_count(),
        organism.sensor_count()
    );
    for sensor in organism.sensors() {
        println!("  {} = {}", sensor.name, sensor.value);
    }
    println!("Steps: {}", steps);
    println!();

    let mut visits = vec![0u64; organism.state_count()];
    let mut switches = 0u64;

    for _ in 0..steps {
        let before = organism.current_state();
        let next = organism.update_state(&mut rng).unwrap_or_else(|e| {
            eprintln!("State update failed: {}", e);
            std::process::exit(1);
        });
        if next != before {
            switches += 1;
        }
        visits[next] += 1;
    }

    println!("Visits:");
    for (i, count) in visits.iter().enumerate() {
        let name = organism.state_name(i).unwrap_or("?");
        println!(
            "  {:<12} {:>8} ({:.1}%)",
            name,
            count,
            *count as f64 * 100.0 / steps.max(1) as f64
        );
    }
    println!("Switches: {}", switches);
    println!(
        "Final state: {}",
        organism.current_state_name().unwrap_or("?")
    );

    if let Some(path) = save_path {
        if let Err(e) = save_to_path(&organism, &path) {
            eprintln!("Error saving organism: {}", e);
            std::process::exit(1);
        }
        println!("Saved to {}", path.display());
    }
}

fn print_example_config() {
    let config = OrganismConfig::default();

    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
