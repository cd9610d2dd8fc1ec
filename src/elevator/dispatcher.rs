/***************************************/
/*           Local modules             */
/***************************************/
use super::call_queue::CallQueue;
use crate::shared::ElevatorState;

/***************************************/
/*       Public data structures        */
/***************************************/

/// What the elevator should do with one inbound floor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Cabin is at the floor with doors closed or closing, start a new door cycle.
    OpenDoors,
    /// Cabin is at the floor with doors open, restart the open timer.
    HoldDoors,
    /// Cabin is at the floor and already busy with it.
    AlreadyServing,
    /// Floor is already the target or waiting in the queue.
    Duplicate,
    /// Floor becomes the active target.
    SetTarget,
    /// Floor goes to the back of the queue.
    Enqueue,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Decides how a request for `floor` is admitted.
 *
 * A request for the floor the cabin sits at is handled through the doors and
 * never queued. Other floors are dropped when already known, become the
 * target when nothing else is pending and the cabin is not travelling, and
 * are queued otherwise.
 */
pub fn admit(state: ElevatorState, current_floor: u8, calls: &CallQueue, floor: u8) -> Admission {
    if floor == current_floor {
        return match state {
            ElevatorState::Idle | ElevatorState::DoorsClosing => Admission::OpenDoors,
            ElevatorState::DoorsOpen => Admission::HoldDoors,
            ElevatorState::Moving | ElevatorState::Stopped | ElevatorState::DoorsOpening => {
                Admission::AlreadyServing
            }
        };
    }

    if calls.contains(floor) {
        return Admission::Duplicate;
    }

    let nothing_pending = !calls.has_target() && calls.pending_len() == 0;
    if nothing_pending && (state == ElevatorState::Idle || state.is_door_phase()) {
        Admission::SetTarget
    } else {
        Admission::Enqueue
    }
}
