/* 3rd party libraries */
use clap::Arg;
use crossbeam_channel as cbc;
use log::{info, warn};
use std::io;
use std::thread::Builder;
use std::time::{Duration, Instant};

/* Custom libraries */
use simulation::{Command, Simulation};

/* Modules */
mod config;
mod elevator;
mod requests;
mod shared;
mod simulation;

/* Main */
fn main() {
    // Initialize logging, RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = clap::Command::new("elevator-sim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tick-driven simulation of a single elevator, controlled from stdin")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = unwrap_or_exit!(config::load_config(config_path), "Failed to load configuration");

    // Input channel
    let (command_tx, command_rx) = cbc::unbounded::<Command>();

    // Start the input reader
    let input_thread = Builder::new().name("input".into());
    unwrap_or_exit!(
        input_thread.spawn(move || simulation::read_commands(io::stdin().lock(), command_tx)),
        "Failed to start input thread"
    );

    // Start the simulation
    let mut sim = Simulation::new(&config);
    let frame_time = Duration::from_secs_f64(1.0 / config.simulation.tick_rate);
    let mut last_tick = Instant::now();
    info!(
        "Elevator ready at floor {} of {}",
        sim.elevator().current_floor(),
        sim.elevator().n_floors()
    );

    loop {
        // All input of a frame is applied before the elevator is advanced
        cbc::select! {
            recv(command_rx) -> command => {
                match command {
                    Ok(Command::Quit) | Err(_) => break,
                    Ok(Command::Status) => match serde_json::to_string(&sim.status()) {
                        Ok(status) => println!("{}", status),
                        Err(e) => warn!("Failed to serialize status: {}", e),
                    },
                    Ok(Command::Layout) => match serde_json::to_string(sim.panel().layout()) {
                        Ok(layout) => println!("{}", layout),
                        Err(e) => warn!("Failed to serialize layout: {}", e),
                    },
                    Ok(command) => sim.apply(command),
                }
            }
            default(frame_time) => {}
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame_time {
            sim.tick(elapsed.as_secs_f64());
            last_tick = Instant::now();
        }
    }

    info!("Shutting down");
}
