/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use serde::Serialize;
use std::io::BufRead;
use std::thread::sleep;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::elevator::ElevatorFSM;
use crate::requests::{ButtonPanel, PanelLayout, Passenger, ProximityCall};
use crate::shared::{ButtonId, ElevatorSnapshot, ElevatorState};

pub mod command;

pub use command::{Command, ParseCommandError};

/// Screen size the panel layout is computed for.
const SCREEN_WIDTH: f64 = 1600.0;
const SCREEN_HEIGHT: f64 = 900.0;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone)]
pub struct SimulationStatus {
    pub elevator: ElevatorSnapshot,
    pub passenger: Passenger,
    #[serde(rename = "litButtons")]
    pub lit_buttons: Vec<ButtonId>,
}

/**
 * One elevator, its panel and a passenger, advanced tick by tick.
 *
 * Commands are applied as they arrive; `tick` then feeds the call key to the
 * proximity adapter, advances the elevator once and refreshes the panel.
 *
 * # Fields
 * - `elevator`:      The cabin state machine.
 * - `panel`:         Cabin button panel.
 * - `passenger`:     The person walking and riding.
 * - `proximity`:     Corridor call adapter.
 * - `call_key_down`: Call key state for the coming tick.
 * - `walk_step`:     Distance of a single step toward the doorway.
 * - `last_state`:    State seen on the previous tick, for transition logging.
 */
pub struct Simulation {
    elevator: ElevatorFSM,
    panel: ButtonPanel,
    passenger: Passenger,
    proximity: ProximityCall,
    call_key_down: bool,
    walk_step: f64,
    last_state: ElevatorState,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Simulation {
    pub fn new(config: &Config) -> Simulation {
        let mut elevator = ElevatorFSM::new(&config.elevator);
        let layout = PanelLayout::new(elevator.n_floors(), SCREEN_WIDTH, SCREEN_HEIGHT);
        let panel = ButtonPanel::new(layout, &mut elevator);
        let last_state = elevator.state();

        Simulation {
            elevator,
            panel,
            passenger: Passenger::new(&config.passenger),
            proximity: ProximityCall::new(),
            call_key_down: false,
            walk_step: config.passenger.walk_step,
            last_state,
        }
    }

    pub fn elevator(&self) -> &ElevatorFSM {
        &self.elevator
    }

    pub fn panel(&self) -> &ButtonPanel {
        &self.panel
    }

    pub fn passenger(&self) -> &Passenger {
        &self.passenger
    }

    /// Applies one command. `Wait`, `Status`, `Layout` and `Quit` belong to the front end and are ignored here.
    pub fn apply(&mut self, command: Command) {
        let inside = self.passenger.is_inside();

        match command {
            Command::Floor(floor) => {
                self.elevator.request_floor(floor);
            }
            Command::Call => self.call_key_down = true,
            Command::Press(button) => {
                if !self.panel.press(button, inside, &mut self.elevator) {
                    debug!("{:?} had no effect", button);
                }
            }
            Command::Click(x, y) => {
                if self.panel.click(x, y, inside, &mut self.elevator).is_none() {
                    debug!("Click at ({}, {}) hit no button", x, y);
                }
            }
            Command::Walk(Some(dx)) => self.passenger.walk(dx, &self.elevator),
            Command::Walk(None) => {
                self.passenger
                    .step_toward_doorway(self.walk_step, &self.elevator)
            }
            Command::Enter => {
                if !self.passenger.try_enter(&self.elevator) {
                    info!("Cannot enter, the cabin is not open at floor {}", self.passenger.floor());
                }
            }
            Command::Exit => {
                if !self.passenger.try_exit(&self.elevator) {
                    info!("Cannot exit, the doors are not open");
                }
            }
            Command::Wait(_) | Command::Status | Command::Layout | Command::Quit => {}
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.proximity
            .poll(self.call_key_down, &self.passenger, &mut self.elevator);
        self.call_key_down = false;

        self.elevator.update(dt);
        self.panel.refresh(&self.elevator);
        self.passenger.follow(&self.elevator);

        let state = self.elevator.state();
        if state != self.last_state {
            info!("Elevator {} at floor {}", state, self.elevator.current_floor());
            self.last_state = state;
        }
    }

    pub fn status(&self) -> SimulationStatus {
        SimulationStatus {
            elevator: self.elevator.snapshot(),
            passenger: self.passenger.clone(),
            lit_buttons: self.panel.lit_buttons(),
        }
    }
}

/**
 * Reads line commands until end of input and forwards them to `command_tx`.
 *
 * Blank lines and lines starting with `#` are skipped, `wait` pauses the
 * reader itself. Returns when the input ends or the receiver is gone.
 */
pub fn read_commands<R: BufRead>(reader: R, command_tx: cbc::Sender<Command>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Wait(seconds)) => sleep(Duration::from_secs_f64(seconds)),
            Ok(command) => {
                if command_tx.send(command).is_err() {
                    break;
                }
            }
            Err(e) => warn!("Ignoring '{}': {}", line, e),
        }
    }
}
