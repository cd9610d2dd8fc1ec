/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use super::call_queue::CallQueue;
use super::dispatcher::{self, Admission};
use crate::config::ElevatorConfig;
use crate::shared::{Direction, ElevatorSnapshot, ElevatorState};

/**
 * Simulates one elevator cabin: motion, doors, ventilation and the calls it serves.
 *
 * The `ElevatorFSM` is advanced once per simulation tick with `update(dt)`. All
 * requests and button presses of a tick must be applied before `update` runs.
 * Floor requests go through the admission policy in `dispatcher` and end up in
 * the owned `CallQueue`; the queue is never exposed mutably.
 *
 * # Fields
 * - `n_floors`:                 Number of floors served.
 * - `floor_spacing`:            Distance between floor reference positions.
 * - `speed`:                    Cabin speed in units per second.
 * - `door_speed`:               Door ratio change per second.
 * - `door_open_time`:           Seconds the doors stay open each cycle.
 * - `door_open_bonus`:          Seconds added by the open button.
 * - `floor_epsilon`:            Tolerance for `is_exactly_at_floor`.
 * - `state`:                    Current state.
 * - `current_floor`:            Last floor arrived at, only changed on arrival.
 * - `position`:                 Vertical cabin offset.
 * - `door_open_ratio`:          0 closed, 1 fully open.
 * - `door_open_timer`:          Seconds left before the doors start closing.
 * - `door_extended_this_cycle`: The open button bonus was used in this door cycle.
 * - `ventilation_on`:           Ventilation state.
 * - `vent_auto_off_floor`:      Floor where ventilation is forced off on arrival.
 * - `calls`:                    Active target and pending floors.
 * - `arrival_txs`:              Subscribers notified with the floor of each arrival.
 */
pub struct ElevatorFSM {
    // Configuration
    n_floors: u8,
    floor_spacing: f64,
    speed: f64,
    door_speed: f64,
    door_open_time: f64,
    door_open_bonus: f64,
    floor_epsilon: f64,

    // Private fields
    state: ElevatorState,
    current_floor: u8,
    position: f64,
    door_open_ratio: f64,
    door_open_timer: f64,
    door_extended_this_cycle: bool,
    ventilation_on: bool,
    vent_auto_off_floor: u8,
    calls: CallQueue,

    // Observer channels
    arrival_txs: Vec<cbc::Sender<u8>>,
}

impl ElevatorFSM {
    pub fn new(config: &ElevatorConfig) -> ElevatorFSM {
        let n_floors = config.n_floors.max(1);
        let start_floor = config.start_floor.min(n_floors - 1);

        ElevatorFSM {
            n_floors,
            floor_spacing: config.floor_spacing,
            speed: config.speed,
            door_speed: config.door_speed,
            door_open_time: config.door_open_time,
            door_open_bonus: config.door_open_bonus,
            floor_epsilon: config.floor_epsilon,
            state: ElevatorState::Idle,
            current_floor: start_floor,
            position: start_floor as f64 * config.floor_spacing,
            door_open_ratio: 0.0,
            door_open_timer: 0.0,
            door_extended_this_cycle: false,
            ventilation_on: false,
            vent_auto_off_floor: start_floor,
            calls: CallQueue::new(),
            arrival_txs: Vec::new(),
        }
    }

    /***************************************/
    /*           Simulation tick           */
    /***************************************/

    /// Advances the state machine by `dt` seconds. Non-positive `dt` is ignored.
    pub fn update(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }

        if self.state == ElevatorState::Idle {
            self.evaluate_calls();
        }

        match self.state {
            ElevatorState::Moving => self.process_moving(dt),
            ElevatorState::DoorsOpening => self.process_doors_opening(dt),
            ElevatorState::DoorsOpen => self.process_doors_open(dt),
            ElevatorState::DoorsClosing => self.process_doors_closing(dt),
            ElevatorState::Idle | ElevatorState::Stopped => {}
        }
    }

    fn evaluate_calls(&mut self) {
        if !self.calls.has_target() && self.calls.advance().is_some() {
            self.retarget_ventilation();
        }

        match self.calls.target() {
            Some(target) if target != self.current_floor => {
                info!("Departing floor {} for floor {}", self.current_floor, target);
                self.transition(ElevatorState::Moving);
            }
            Some(_) => {
                self.calls.clear_target();
                self.open_doors();
            }
            None => {}
        }
    }

    fn process_moving(&mut self, dt: f64) {
        let target = match self.calls.target() {
            Some(target) => target,
            None => {
                warn!("Moving without a target floor, stopping at floor {}", self.current_floor);
                self.transition(ElevatorState::Idle);
                return;
            }
        };

        let target_position = self.floor_position(target);
        let direction = Direction::between(self.position, target_position);
        self.position += direction.sign() * self.speed * dt;

        // Compare against the direction of travel, never overshoot
        let reached = match direction {
            Direction::Up => self.position >= target_position,
            Direction::Down => self.position <= target_position,
            Direction::Stop => true,
        };
        if reached {
            self.arrive(target);
        }
    }

    fn arrive(&mut self, floor: u8) {
        self.position = self.floor_position(floor);
        self.current_floor = floor;
        info!("Arrived at floor {}", floor);

        self.arrival_txs.retain(|tx| tx.send(floor).is_ok());

        if self.ventilation_on && self.current_floor == self.vent_auto_off_floor {
            info!("Ventilation switched off at floor {}", floor);
            self.ventilation_on = false;
        }

        if self.calls.advance().is_some() {
            self.retarget_ventilation();
        }

        self.door_open_ratio = 0.0;
        self.door_extended_this_cycle = false;
        self.transition(ElevatorState::DoorsOpening);
    }

    fn process_doors_opening(&mut self, dt: f64) {
        self.door_open_ratio = (self.door_open_ratio + self.door_speed * dt).min(1.0);
        if self.door_open_ratio >= 1.0 {
            self.door_open_timer = self.door_open_time;
            self.door_extended_this_cycle = false;
            self.transition(ElevatorState::DoorsOpen);
        }
    }

    fn process_doors_open(&mut self, dt: f64) {
        self.door_open_timer -= dt;
        if self.door_open_timer <= 0.0 {
            self.door_open_timer = 0.0;
            self.transition(ElevatorState::DoorsClosing);
        }
    }

    fn process_doors_closing(&mut self, dt: f64) {
        self.door_open_ratio = (self.door_open_ratio - self.door_speed * dt).max(0.0);
        if self.door_open_ratio <= 0.0 {
            self.transition(ElevatorState::Idle);
            self.evaluate_calls();
        }
    }

    /***************************************/
    /*              Commands               */
    /***************************************/

    /// Requests service to `floor`, clamping it into the valid range. Always succeeds.
    pub fn request_floor(&mut self, floor: i32) -> bool {
        let floor = self.clamp_floor(floor);
        self.dispatch(floor);
        true
    }

    /// Admits a request for an in-range `floor` and applies the outcome.
    pub fn dispatch(&mut self, floor: u8) -> Admission {
        let floor = floor.min(self.n_floors - 1);
        let admission = dispatcher::admit(self.state, self.current_floor, &self.calls, floor);

        match admission {
            Admission::OpenDoors => self.open_doors(),
            Admission::HoldDoors => {
                self.door_open_timer = self.door_open_timer.max(self.door_open_time)
            }
            Admission::SetTarget => {
                self.calls.set_target(floor);
                self.retarget_ventilation();
            }
            Admission::Enqueue => {
                self.calls.enqueue(floor);
            }
            Admission::AlreadyServing | Admission::Duplicate => {}
        }

        debug!("Request for floor {}: {:?}", floor, admission);
        admission
    }

    /// Extends open doors once per cycle, or reopens idle or closing doors.
    pub fn press_open(&mut self) -> bool {
        match self.state {
            ElevatorState::DoorsOpen if !self.door_extended_this_cycle => {
                self.door_open_timer += self.door_open_bonus;
                self.door_extended_this_cycle = true;
                true
            }
            ElevatorState::Idle | ElevatorState::DoorsClosing => {
                self.open_doors();
                true
            }
            _ => false,
        }
    }

    /// Cuts the open time short, or reverses doors that are still opening.
    pub fn press_close(&mut self) -> bool {
        match self.state {
            ElevatorState::DoorsOpen => {
                self.door_open_timer = 0.0;
                true
            }
            ElevatorState::DoorsOpening => {
                self.transition(ElevatorState::DoorsClosing);
                true
            }
            _ => false,
        }
    }

    /// Pauses or resumes travel. The target is kept while stopped.
    pub fn toggle_stop(&mut self) -> bool {
        match self.state {
            ElevatorState::Moving => self.transition(ElevatorState::Stopped),
            ElevatorState::Stopped => self.transition(ElevatorState::Moving),
            _ => return false,
        }
        true
    }

    pub fn toggle_ventilation(&mut self) -> bool {
        self.ventilation_on = !self.ventilation_on;
        if self.ventilation_on {
            self.vent_auto_off_floor = self
                .calls
                .target()
                .or_else(|| self.calls.front())
                .unwrap_or(self.current_floor);
            info!("Ventilation on until floor {}", self.vent_auto_off_floor);
        } else {
            info!("Ventilation off");
        }
        self.ventilation_on
    }

    /// Returns a receiver that gets the floor of every arrival from now on.
    pub fn subscribe_arrivals(&mut self) -> cbc::Receiver<u8> {
        let (arrival_tx, arrival_rx) = cbc::unbounded::<u8>();
        self.arrival_txs.push(arrival_tx);
        arrival_rx
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn door_open_ratio(&self) -> f64 {
        self.door_open_ratio
    }

    pub fn door_open_timer(&self) -> f64 {
        self.door_open_timer
    }

    pub fn door_extended_this_cycle(&self) -> bool {
        self.door_extended_this_cycle
    }

    pub fn ventilation_on(&self) -> bool {
        self.ventilation_on
    }

    pub fn vent_auto_off_floor(&self) -> u8 {
        self.vent_auto_off_floor
    }

    pub fn target_floor(&self) -> Option<u8> {
        self.calls.target()
    }

    pub fn has_target_floor(&self) -> bool {
        self.calls.has_target()
    }

    pub fn queued_floors(&self) -> Vec<u8> {
        self.calls.pending().collect()
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn floor_position(&self, floor: u8) -> f64 {
        floor as f64 * self.floor_spacing
    }

    pub fn is_exactly_at_floor(&self, floor: u8) -> bool {
        (self.position - self.floor_position(floor)).abs() < self.floor_epsilon
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            state: self.state,
            floor: self.current_floor,
            target: self.calls.target(),
            queue: self.queued_floors(),
            position: self.position,
            door_open_ratio: self.door_open_ratio,
            ventilation_on: self.ventilation_on,
        }
    }

    /***************************************/
    /*              Helpers                */
    /***************************************/
    fn open_doors(&mut self) {
        self.door_open_timer = self.door_open_time;
        self.door_extended_this_cycle = false;
        self.transition(ElevatorState::DoorsOpening);
    }

    fn retarget_ventilation(&mut self) {
        if !self.ventilation_on {
            return;
        }
        if let Some(target) = self.calls.target() {
            self.vent_auto_off_floor = target;
        }
    }

    fn clamp_floor(&self, floor: i32) -> u8 {
        let top = self.n_floors as i32 - 1;
        if floor < 0 || floor > top {
            warn!("Floor {} out of range, clamping to 0..={}", floor, top);
        }
        floor.clamp(0, top) as u8
    }

    fn transition(&mut self, next: ElevatorState) {
        if self.state != next {
            debug!("State {} -> {}", self.state, next);
            self.state = next;
        }
    }
}
