/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;

/***************************************/
/*           Local modules             */
/***************************************/
use super::passenger::Passenger;
use crate::elevator::ElevatorFSM;

/// Remembers the previous frame's key state so a held key fires once.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    pub fn new() -> EdgeDetector {
        EdgeDetector::default()
    }

    /// Feeds this frame's key state, true on a press that was released last frame.
    pub fn rising(&mut self, pressed: bool) -> bool {
        let just_pressed = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        just_pressed
    }
}

/**
 * Calls the cabin to the passenger's floor from the corridor.
 *
 * Fires once per key press, and only for a passenger standing at the doorway
 * outside the cabin.
 */
#[derive(Debug, Clone, Default)]
pub struct ProximityCall {
    call_key: EdgeDetector,
}

impl ProximityCall {
    pub fn new() -> ProximityCall {
        ProximityCall::default()
    }

    pub fn poll(&mut self, pressed: bool, passenger: &Passenger, elevator: &mut ElevatorFSM) -> Option<u8> {
        if !self.call_key.rising(pressed) {
            return None;
        }
        if passenger.is_inside() || !passenger.near_doorway() {
            return None;
        }

        let floor = passenger.floor();
        info!("Elevator called to floor {}", floor);
        elevator.request_floor(floor as i32);
        Some(floor)
    }
}
