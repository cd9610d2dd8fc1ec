/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::PassengerConfig;
use crate::elevator::ElevatorFSM;

/**
 * The person walking the corridors and riding the cabin.
 *
 * The corridor runs along `x` and ends at the doorway at `doorway_x`; the
 * cabin lies beyond it. While inside, the passenger's floor follows the cabin.
 *
 * # Fields
 * - `floor`:             Floor the passenger stands on, or the cabin floor while inside.
 * - `x`:                 Corridor position.
 * - `inside`:            Passenger is in the cabin.
 * - `entry_threshold`:   Door open ratio that must be exceeded to pass.
 * - `doorway_x`:         Corridor position of the doorway.
 * - `doorway_tolerance`: How far from the doorway still counts as standing at it.
 */
#[derive(Debug, Clone, Serialize)]
pub struct Passenger {
    floor: u8,
    x: f64,
    inside: bool,
    #[serde(skip)]
    entry_threshold: f64,
    #[serde(skip)]
    doorway_x: f64,
    #[serde(skip)]
    doorway_tolerance: f64,
}

impl Passenger {
    pub fn new(config: &PassengerConfig) -> Passenger {
        Passenger {
            floor: config.start_floor,
            x: config.doorway_x,
            inside: false,
            entry_threshold: config.entry_threshold,
            doorway_x: config.doorway_x,
            doorway_tolerance: config.doorway_tolerance,
        }
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn near_doorway(&self) -> bool {
        (self.x - self.doorway_x).abs() <= self.doorway_tolerance
    }

    /// Walks `dx` along the corridor. Inside the cabin only a step toward the doorway
    /// does anything, and it leaves the cabin when allowed.
    pub fn walk(&mut self, dx: f64, elevator: &ElevatorFSM) {
        if self.inside {
            if dx < 0.0 && self.try_exit(elevator) {
                self.x = self.doorway_x + dx;
            }
            return;
        }
        self.x = (self.x + dx).min(self.doorway_x);
    }

    /// Steps `step` toward the doorway from whichever side the passenger is on.
    pub fn step_toward_doorway(&mut self, step: f64, elevator: &ElevatorFSM) {
        let dx = if self.inside { -step.abs() } else { step.abs() };
        self.walk(dx, elevator);
    }

    pub fn try_enter(&mut self, elevator: &ElevatorFSM) -> bool {
        if self.inside || !self.near_doorway() || !self.doors_passable(elevator, self.floor) {
            return false;
        }
        self.inside = true;
        self.x = self.doorway_x;
        info!("Passenger entered the cabin at floor {}", self.floor);
        true
    }

    pub fn try_exit(&mut self, elevator: &ElevatorFSM) -> bool {
        if !self.inside || !self.doors_passable(elevator, elevator.current_floor()) {
            return false;
        }
        self.inside = false;
        self.floor = elevator.current_floor();
        self.x = self.doorway_x;
        info!("Passenger left the cabin at floor {}", self.floor);
        true
    }

    /// Keeps the passenger's floor in step with the cabin while riding.
    pub fn follow(&mut self, elevator: &ElevatorFSM) {
        if self.inside {
            self.floor = elevator.current_floor();
        }
    }

    fn doors_passable(&self, elevator: &ElevatorFSM, floor: u8) -> bool {
        elevator.door_open_ratio() > self.entry_threshold && elevator.is_exactly_at_floor(floor)
    }
}
