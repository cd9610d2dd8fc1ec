/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Slowest accepted tick rate, one frame per second.
pub const MIN_TICK_RATE: f64 = 1.0;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub passenger: PassengerConfig,
    pub simulation: SimulationConfig,
}

/**
 * Cabin geometry and timing.
 *
 * # Fields
 * - `n_floors`:        Number of floors, valid floor indices are `0..n_floors`.
 * - `start_floor`:     Floor the cabin rests at when the simulation starts.
 * - `floor_spacing`:   Vertical distance between two floors, `position(floor) = floor * floor_spacing`.
 * - `speed`:           Cabin speed in position units per second.
 * - `door_speed`:      Door open ratio change per second.
 * - `door_open_time`:  Seconds the doors stay fully open before closing.
 * - `door_open_bonus`: Seconds added by the open button, once per door cycle.
 * - `floor_epsilon`:   Tolerance used when checking if the cabin is exactly at a floor.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub n_floors: u8,
    pub start_floor: u8,
    pub floor_spacing: f64,
    pub speed: f64,
    pub door_speed: f64,
    pub door_open_time: f64,
    pub door_open_bonus: f64,
    pub floor_epsilon: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PassengerConfig {
    pub start_floor: u8,
    pub entry_threshold: f64,
    pub doorway_tolerance: f64,
    pub doorway_x: f64,
    pub walk_step: f64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_rate: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

/***************************************/
/*              Defaults               */
/***************************************/
impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            n_floors: 8,
            start_floor: 2,
            floor_spacing: 3.0,
            speed: 2.0,
            door_speed: 1.8,
            door_open_time: 5.0,
            door_open_bonus: 5.0,
            floor_epsilon: 0.001,
        }
    }
}

impl Default for PassengerConfig {
    fn default() -> Self {
        PassengerConfig {
            start_floor: 1,
            entry_threshold: 0.9,
            doorway_tolerance: 0.6,
            doorway_x: 0.0,
            walk_step: 0.5,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig { tick_rate: 75.0 }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse configuration file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.elevator;
        if e.n_floors == 0 {
            return Err(ConfigError::Invalid("n_floors must be at least 1".into()));
        }
        if e.start_floor >= e.n_floors {
            return Err(ConfigError::Invalid(format!(
                "start_floor {} is outside 0..{}",
                e.start_floor, e.n_floors
            )));
        }
        if self.passenger.start_floor >= e.n_floors {
            return Err(ConfigError::Invalid(format!(
                "passenger start_floor {} is outside 0..{}",
                self.passenger.start_floor, e.n_floors
            )));
        }
        for (name, value) in [
            ("floor_spacing", e.floor_spacing),
            ("speed", e.speed),
            ("door_speed", e.door_speed),
            ("tick_rate", self.simulation.tick_rate),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }
        if self.simulation.tick_rate < MIN_TICK_RATE {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be at least {}",
                MIN_TICK_RATE
            )));
        }
        if e.door_open_time < 0.0 || e.door_open_bonus < 0.0 {
            return Err(ConfigError::Invalid("door times must not be negative".into()));
        }
        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(config_str) => parse_config(&config_str),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} not found, using default configuration", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}
