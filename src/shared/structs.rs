/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorState {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "doorsOpening")]
    DoorsOpening,
    #[serde(rename = "doorsOpen")]
    DoorsOpen,
    #[serde(rename = "doorsClosing")]
    DoorsClosing,
    #[serde(rename = "stopped")]
    Stopped,
}

impl ElevatorState {
    /// True for the three states of a door cycle.
    pub fn is_door_phase(&self) -> bool {
        matches!(
            self,
            ElevatorState::DoorsOpening | ElevatorState::DoorsOpen | ElevatorState::DoorsClosing
        )
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElevatorState::Idle => "idle",
            ElevatorState::Moving => "moving",
            ElevatorState::DoorsOpening => "doors opening",
            ElevatorState::DoorsOpen => "doors open",
            ElevatorState::DoorsClosing => "doors closing",
            ElevatorState::Stopped => "stopped",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Stop,
}

impl Direction {
    /// Direction of travel from `from` to `to`.
    pub fn between(from: f64, to: f64) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Stop
        }
    }

    pub fn sign(&self) -> f64 {
        match *self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
            Direction::Stop => 0.0,
        }
    }
}

/// A button on the cabin panel, independent of how it was hit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ButtonId {
    Floor(u8),
    Open,
    Close,
    Stop,
    Ventilation,
}

/**
 * Read-only view of the elevator, published on `status`.
 *
 * # Fields
 * - `state`:           Current state of the state machine.
 * - `floor`:           Last floor the cabin arrived at.
 * - `target`:          Active target floor, if any.
 * - `queue`:           Pending floors in service order.
 * - `position`:        Vertical offset of the cabin.
 * - `door_open_ratio`: 0 closed, 1 fully open.
 * - `ventilation_on`:  Ventilation state.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub state: ElevatorState,
    pub floor: u8,
    pub target: Option<u8>,
    pub queue: Vec<u8>,
    pub position: f64,
    #[serde(rename = "doorOpenRatio")]
    pub door_open_ratio: f64,
    #[serde(rename = "ventilationOn")]
    pub ventilation_on: bool,
}
