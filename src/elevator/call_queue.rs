/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::VecDeque;

/**
 * The active target floor plus the FIFO of floors waiting behind it.
 *
 * A floor never appears twice across `target` and `pending`. Only the
 * dispatcher admits floors, and only the elevator core advances the queue.
 *
 * # Fields
 * - `target`:  Floor the cabin is committed to, if any.
 * - `pending`: Floors waiting in request order.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallQueue {
    target: Option<u8>,
    pending: VecDeque<u8>,
}

impl CallQueue {
    pub fn new() -> CallQueue {
        CallQueue::default()
    }

    pub fn target(&self) -> Option<u8> {
        self.target
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn front(&self) -> Option<u8> {
        self.pending.front().copied()
    }

    pub fn pending(&self) -> impl Iterator<Item = u8> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True if `floor` is the active target or already waiting.
    pub fn contains(&self, floor: u8) -> bool {
        self.target == Some(floor) || self.pending.contains(&floor)
    }

    pub(super) fn set_target(&mut self, floor: u8) -> bool {
        if self.contains(floor) {
            return false;
        }
        self.target = Some(floor);
        true
    }

    pub(super) fn enqueue(&mut self, floor: u8) -> bool {
        if self.contains(floor) {
            return false;
        }
        self.pending.push_back(floor);
        true
    }

    /// Replaces the target with the next pending floor.
    pub(super) fn advance(&mut self) -> Option<u8> {
        self.target = self.pending.pop_front();
        self.target
    }

    pub(super) fn clear_target(&mut self) {
        self.target = None;
    }
}
